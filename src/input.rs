use crate::constants::{DARK_MODE_CLASS, LIGHT_MODE_CLASS};
use backdrop_core::Theme;
use glam::Vec2;

/// Client-space pixel position to normalized device coordinates over a
/// viewport of `viewport` CSS pixels. Y points up. A degenerate viewport
/// maps everything to the center.
#[inline]
pub fn client_to_ndc(client: Vec2, viewport: Vec2) -> Vec2 {
    if !viewport.is_finite() || viewport.x <= 0.0 || viewport.y <= 0.0 || !client.is_finite() {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client.x / viewport.x) * 2.0 - 1.0,
        -(client.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Scroll offset as a fraction of the scrollable range.
///
/// Pages that do not scroll report 0. Overscroll is passed through; band
/// selection clamps it.
#[inline]
pub fn scroll_fraction(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let range = scroll_height - viewport_height;
    if !range.is_finite() || range <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / range).max(0.0) as f32
}

/// Theme selected by a list of body class names. Light wins if both marker
/// classes are present.
pub fn theme_from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Theme {
    let mut theme = Theme::Default;
    for class in classes {
        if class == LIGHT_MODE_CLASS {
            return Theme::Light;
        }
        if class == DARK_MODE_CLASS {
            theme = Theme::Dark;
        }
    }
    theme
}

/// Backing-store size for a CSS box at a device pixel ratio, capped and
/// never zero.
#[inline]
pub fn backing_size(
    css_width: f64,
    css_height: f64,
    device_pixel_ratio: f64,
    cap: f64,
) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(cap)
    } else {
        1.0
    };
    let px = |css: f64| ((css.max(0.0) * dpr) as u32).max(1);
    (px(css_width), px(css_height))
}
