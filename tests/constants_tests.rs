// Host-side tests for web host constants and how they line up with the
// scene defaults.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use backdrop_core::{SceneConfig, SCROLL_BANDS, SCROLL_BAND_EDGES};
use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn pixel_ratio_cap_is_sane() {
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(MAX_DEVICE_PIXEL_RATIO <= 4.0);
}

#[test]
fn theme_classes_are_distinct_tokens() {
    assert_ne!(LIGHT_MODE_CLASS, DARK_MODE_CLASS);
    for class in [LIGHT_MODE_CLASS, DARK_MODE_CLASS, CANVAS_ID] {
        assert!(!class.is_empty());
        assert!(!class.contains(char::is_whitespace));
    }
}

#[test]
fn scroll_band_edges_are_increasing_and_inside_the_page() {
    assert_eq!(SCROLL_BAND_EDGES.len() + 1, SCROLL_BANDS);
    for pair in SCROLL_BAND_EDGES.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(SCROLL_BAND_EDGES.iter().all(|e| *e > 0.0 && *e < 1.0));
}

#[test]
fn default_scene_validates() {
    assert_eq!(SceneConfig::default().validate(), Ok(()));
}
