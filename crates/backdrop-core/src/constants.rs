use glam::Vec3;

// Shared scene tuning constants used by both web and native frontends.

// Population
pub const NODE_COUNT: usize = 120;
pub const DEFAULT_SEED: u64 = 42;

// Bounding volume (half-extents per axis) and the smaller box nodes spawn in
pub const BOUND_HALF_EXTENTS: [f32; 3] = [35.0, 35.0, 25.0];
pub const SPAWN_HALF_EXTENTS: [f32; 3] = [30.0, 30.0, 20.0];

// Motion, in world units per tick
pub const MAX_SPEED_COMPONENT: f32 = 0.01;

// Cosmetic node radius range
pub const NODE_RADIUS_MIN: f32 = 0.05;
pub const NODE_RADIUS_MAX: f32 = 0.15;

// Linking
pub const LINK_THRESHOLD: f32 = 8.0;

// Pointer interaction
pub const REPULSION_RADIUS: f32 = 10.0;
pub const REPULSION_STEP: f32 = 0.1; // fixed nudge per tick, no falloff
pub const POINTER_PLANE_Z: f32 = 0.0; // world depth the pointer is projected onto

// Group rotation and simulation clock
pub const ROTATION_PER_TICK: f32 = 0.001; // radians about +Y
pub const CLOCK_PER_TICK: f32 = 0.002;

// Color smoothing factor applied once per tick
pub const COLOR_DECAY: f32 = 0.05;

// Fixed-rate ticking
pub const FIXED_TICK_HZ: f32 = 60.0;
pub const MAX_CATCHUP_TICKS: u32 = 4;

// Camera
pub const CAMERA_Z: f32 = 20.0;
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Scroll fraction upper edges for bands 0..2; band 3 is everything above
pub const SCROLL_BAND_EDGES: [f32; 3] = [0.25, 0.5, 0.75];

// Palettes, one color per scroll band
pub const DEFAULT_PALETTE: [u32; 4] = [0x00ffcc, 0x00d4ff, 0x7c5cff, 0xff4fd8];
pub const LIGHT_PALETTE: [u32; 4] = [0x6366f1, 0x0ea5e9, 0x8b5cf6, 0xdb2777];
pub const DARK_PALETTE: [u32; 4] = [0x00ffcc, 0x22d3ee, 0xa78bfa, 0xf472b6];

// Draw opacity
pub const NODE_OPACITY: f32 = 0.5;
pub const EDGE_OPACITY: f32 = 0.1;

#[inline]
pub fn bound_half_extents_vec3() -> Vec3 {
    Vec3::from(BOUND_HALF_EXTENTS)
}

#[inline]
pub fn spawn_half_extents_vec3() -> Vec3 {
    Vec3::from(SPAWN_HALF_EXTENTS)
}
