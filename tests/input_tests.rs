// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use backdrop_core::Theme;
use glam::Vec2;
use input::*;

#[test]
fn corners_map_to_ndc_extremes() {
    let viewport = Vec2::new(1280.0, 720.0);
    assert_eq!(client_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
    assert_eq!(client_to_ndc(viewport, viewport), Vec2::new(1.0, -1.0));
    assert_eq!(client_to_ndc(viewport * 0.5, viewport), Vec2::ZERO);
}

#[test]
fn degenerate_viewport_maps_to_center() {
    assert_eq!(client_to_ndc(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    assert_eq!(
        client_to_ndc(Vec2::new(f32::NAN, 3.0), Vec2::new(100.0, 100.0)),
        Vec2::ZERO
    );
}

#[test]
fn scroll_fraction_spans_scrollable_range() {
    assert_eq!(scroll_fraction(0.0, 3000.0, 1000.0), 0.0);
    assert_eq!(scroll_fraction(1000.0, 3000.0, 1000.0), 0.5);
    assert_eq!(scroll_fraction(2000.0, 3000.0, 1000.0), 1.0);
}

#[test]
fn non_scrolling_page_reports_zero() {
    assert_eq!(scroll_fraction(0.0, 800.0, 800.0), 0.0);
    assert_eq!(scroll_fraction(50.0, 600.0, 800.0), 0.0);
    assert_eq!(scroll_fraction(f64::NAN, 3000.0, 1000.0), 0.0);
}

#[test]
fn negative_scroll_clamps_and_overscroll_passes_through() {
    assert_eq!(scroll_fraction(-40.0, 3000.0, 1000.0), 0.0);
    assert!(scroll_fraction(2100.0, 3000.0, 1000.0) > 1.0);
}

#[test]
fn body_classes_select_theme() {
    assert_eq!(theme_from_classes([] as [&str; 0]), Theme::Default);
    assert_eq!(theme_from_classes(["page", "light-mode"]), Theme::Light);
    assert_eq!(theme_from_classes(["dark-mode"]), Theme::Dark);
    assert_eq!(theme_from_classes(["dark-mode", "light-mode"]), Theme::Light);
    assert_eq!(theme_from_classes(["lightmode", "mode"]), Theme::Default);
    assert_eq!(
        theme_from_classes("nav-open  light-mode".split_whitespace()),
        Theme::Light
    );
}

#[test]
fn backing_size_caps_device_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 1.0, 2.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 3.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(800.0, 600.0, 1.5, 2.0), (1200, 900));
}

#[test]
fn backing_size_is_never_zero() {
    assert_eq!(backing_size(0.0, 0.0, 2.0, 2.0), (1, 1));
    assert_eq!(backing_size(100.0, 100.0, f64::NAN, 2.0), (100, 100));
}
