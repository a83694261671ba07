//! Scroll- and theme-driven backdrop color.
//!
//! The displayed color is smoothed towards a palette target once per tick.
//! Target selection is a pure function of the scroll fraction and theme; the
//! frame loop only re-evaluates it when one of those inputs changes.

use crate::constants::{DARK_PALETTE, DEFAULT_PALETTE, LIGHT_PALETTE, SCROLL_BAND_EDGES};
use crate::math::lerp;

/// sRGB triplet with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        Self::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }

    /// Euclidean distance in channel space.
    pub fn distance(self, other: Rgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Decode the sRGB transfer curve, for upload to an `*Srgb` target.
    pub fn to_linear(self) -> Self {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Self::new(decode(self.r), decode(self.g), decode(self.b))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Default,
    Light,
    Dark,
}

pub const SCROLL_BANDS: usize = 4;

/// Palette slots: one color per theme row and scroll band.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub default: [Rgb; SCROLL_BANDS],
    pub light: [Rgb; SCROLL_BANDS],
    pub dark: [Rgb; SCROLL_BANDS],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default: DEFAULT_PALETTE.map(Rgb::from_hex),
            light: LIGHT_PALETTE.map(Rgb::from_hex),
            dark: DARK_PALETTE.map(Rgb::from_hex),
        }
    }
}

impl Palette {
    pub fn row(&self, theme: Theme) -> &[Rgb; SCROLL_BANDS] {
        match theme {
            Theme::Default => &self.default,
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }

    pub fn slot(&self, theme: Theme, band: usize) -> Rgb {
        self.row(theme)[band.min(SCROLL_BANDS - 1)]
    }

    /// Target color for a scroll fraction under a theme.
    pub fn target_for(&self, scroll_fraction: f32, theme: Theme) -> Rgb {
        self.slot(theme, scroll_band(scroll_fraction))
    }
}

/// Map a scroll fraction of page height to its band index.
///
/// NaN and negative fractions fall into band 0; anything past the last edge
/// (overscroll beyond 1.0, up to `+inf`) lands in the final band.
pub fn scroll_band(scroll_fraction: f32) -> usize {
    if scroll_fraction.is_nan() || scroll_fraction <= 0.0 {
        return 0;
    }
    SCROLL_BAND_EDGES
        .iter()
        .position(|edge| scroll_fraction < *edge)
        .unwrap_or(SCROLL_BAND_EDGES.len())
}

/// Smoothed display color.
#[derive(Clone, Debug)]
pub struct ColorState {
    current: Rgb,
    target: Rgb,
}

impl ColorState {
    pub fn new(initial: Rgb) -> Self {
        Self {
            current: initial,
            target: initial,
        }
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn target(&self) -> Rgb {
        self.target
    }

    pub fn set_target(&mut self, target: Rgb) {
        if self.target != target {
            log::debug!(
                "[color] target -> ({:.2},{:.2},{:.2})",
                target.r,
                target.g,
                target.b
            );
            self.target = target;
        }
    }

    /// Move `current` a fraction `decay` of the way to `target`.
    ///
    /// `decay` is clamped to `[0, 1]`, so a single step never overshoots.
    pub fn step(&mut self, decay: f32) {
        let t = decay.clamp(0.0, 1.0);
        self.current = self.current.lerp(self.target, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_channels() {
        let c = Rgb::from_hex(0x00ffcc);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 1.0);
        assert!((c.b - 0.8).abs() < 1e-6);
    }

    #[test]
    fn linear_decode_darkens_midtones_and_keeps_ends() {
        let lin = Rgb::from_hex(0x6366f1).to_linear();
        assert!((lin.r - 0.125).abs() < 2e-3, "r={}", lin.r);
        assert!((lin.b - 0.879).abs() < 2e-3, "b={}", lin.b);
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).to_linear(), Rgb::new(0.0, 0.0, 0.0));
        let white = Rgb::new(1.0, 1.0, 1.0).to_linear();
        assert!((white.g - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scroll_bands_cover_edges() {
        assert_eq!(scroll_band(0.0), 0);
        assert_eq!(scroll_band(0.24), 0);
        assert_eq!(scroll_band(0.25), 1);
        assert_eq!(scroll_band(0.5), 2);
        assert_eq!(scroll_band(0.74), 2);
        assert_eq!(scroll_band(0.75), 3);
        assert_eq!(scroll_band(1.0), 3);
        assert_eq!(scroll_band(7.5), 3);
    }

    #[test]
    fn odd_scroll_values_pick_the_nearest_end() {
        assert_eq!(scroll_band(-0.3), 0);
        assert_eq!(scroll_band(f32::NEG_INFINITY), 0);
        assert_eq!(scroll_band(f32::NAN), 0);
        assert_eq!(scroll_band(f32::INFINITY), SCROLL_BANDS - 1);
    }

    #[test]
    fn theme_selects_palette_row() {
        let p = Palette::default();
        assert_eq!(p.target_for(0.0, Theme::Light), Rgb::from_hex(LIGHT_PALETTE[0]));
        assert_eq!(p.target_for(0.9, Theme::Dark), Rgb::from_hex(DARK_PALETTE[3]));
        assert_eq!(p.target_for(0.3, Theme::Default), Rgb::from_hex(DEFAULT_PALETTE[1]));
    }

    #[test]
    fn set_target_is_idempotent() {
        let mut s = ColorState::new(Rgb::new(0.0, 0.0, 0.0));
        let t = Rgb::new(1.0, 0.5, 0.25);
        s.set_target(t);
        s.step(0.5);
        let after_one = s.current();
        s.set_target(t);
        assert_eq!(s.current(), after_one);
        assert_eq!(s.target(), t);
    }

    #[test]
    fn full_decay_lands_on_target() {
        let mut s = ColorState::new(Rgb::new(0.2, 0.2, 0.2));
        s.set_target(Rgb::new(0.9, 0.1, 0.4));
        s.step(1.0);
        assert_eq!(s.current(), s.target());
    }
}
