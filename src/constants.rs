/// Web host constants.
///
/// Scene tuning lives in `backdrop_core::constants`; these only describe how
/// the page is wired to the scene.
// Canvas the backdrop renders into
pub const CANVAS_ID: &str = "main-canvas";

// Body classes that select the palette row
pub const LIGHT_MODE_CLASS: &str = "light-mode";
pub const DARK_MODE_CLASS: &str = "dark-mode";

// Backing store is sized to CSS size * min(devicePixelRatio, cap)
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Start animating as soon as the GPU is ready
pub const AUTO_START: bool = true;
