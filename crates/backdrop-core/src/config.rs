//! Scene configuration, fixed for the lifetime of a scene.

use crate::color::Palette;
use crate::constants::*;
use crate::state::Camera;
use glam::Vec3;
use thiserror::Error;

/// How wall-clock frame time is turned into simulation ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TickPolicy {
    /// One fixed tick per host paint; motion speed follows the frame rate.
    #[default]
    PerFrame,
    /// Accumulate elapsed time and run fixed ticks at `hz`, capped per frame.
    FixedRate { hz: f32, max_catchup: u32 },
}

/// Which proximity scan the frame loop builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkStrategy {
    #[default]
    AllPairs,
    UniformGrid,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub node_count: usize,
    pub seed: u64,
    pub bound_half_extents: Vec3,
    pub spawn_half_extents: Vec3,
    /// Per-axis velocity components are drawn from `[-max, max]`.
    pub max_speed_component: f32,
    pub radius_range: (f32, f32),
    pub reflect_axes: [bool; 3],
    pub link_threshold: f32,
    pub link_strategy: LinkStrategy,
    pub repulsion_radius: f32,
    pub repulsion_step: f32,
    pub pointer_plane_z: f32,
    pub rotation_per_tick: f32,
    pub clock_per_tick: f32,
    pub color_decay: f32,
    pub palette: Palette,
    pub tick_policy: TickPolicy,
    pub camera: Camera,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            node_count: NODE_COUNT,
            seed: DEFAULT_SEED,
            bound_half_extents: bound_half_extents_vec3(),
            spawn_half_extents: spawn_half_extents_vec3(),
            max_speed_component: MAX_SPEED_COMPONENT,
            radius_range: (NODE_RADIUS_MIN, NODE_RADIUS_MAX),
            reflect_axes: [true; 3],
            link_threshold: LINK_THRESHOLD,
            link_strategy: LinkStrategy::default(),
            repulsion_radius: REPULSION_RADIUS,
            repulsion_step: REPULSION_STEP,
            pointer_plane_z: POINTER_PLANE_Z,
            rotation_per_tick: ROTATION_PER_TICK,
            clock_per_tick: CLOCK_PER_TICK,
            color_decay: COLOR_DECAY,
            palette: Palette::default(),
            tick_policy: TickPolicy::default(),
            camera: Camera::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("node count must be at least 1")]
    EmptyPopulation,
    #[error("bounding half-extents must be positive and finite, got {0:?}")]
    BadBounds(Vec3),
    #[error("spawn half-extents {spawn:?} must be non-negative and lie inside bounds {bounds:?}")]
    SpawnOutsideBounds { spawn: Vec3, bounds: Vec3 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("radius range is inverted: min {min} > max {max}")]
    InvertedRadius { min: f32, max: f32 },
    #[error("color decay must be in (0, 1], got {0}")]
    BadDecay(f32),
    #[error("fixed tick policy needs a positive rate and at least one tick per frame")]
    BadTickPolicy,
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

impl SceneConfig {
    /// Check every field once; a scene is only built from a valid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        let b = self.bound_half_extents;
        if !(b.is_finite() && b.cmpgt(Vec3::ZERO).all()) {
            return Err(ConfigError::BadBounds(b));
        }
        let s = self.spawn_half_extents;
        if !(s.is_finite() && s.cmpge(Vec3::ZERO).all() && s.cmple(b).all()) {
            return Err(ConfigError::SpawnOutsideBounds {
                spawn: s,
                bounds: b,
            });
        }
        non_negative("max_speed_component", self.max_speed_component)?;
        let (rmin, rmax) = self.radius_range;
        non_negative("radius_range.min", rmin)?;
        non_negative("radius_range.max", rmax)?;
        if rmin > rmax {
            return Err(ConfigError::InvertedRadius {
                min: rmin,
                max: rmax,
            });
        }
        positive("link_threshold", self.link_threshold)?;
        non_negative("repulsion_radius", self.repulsion_radius)?;
        non_negative("repulsion_step", self.repulsion_step)?;
        finite("pointer_plane_z", self.pointer_plane_z)?;
        finite("rotation_per_tick", self.rotation_per_tick)?;
        non_negative("clock_per_tick", self.clock_per_tick)?;
        if !(self.color_decay > 0.0 && self.color_decay <= 1.0) {
            return Err(ConfigError::BadDecay(self.color_decay));
        }
        if let TickPolicy::FixedRate { hz, max_catchup } = self.tick_policy {
            if !(hz.is_finite() && hz > 0.0) || max_catchup == 0 {
                return Err(ConfigError::BadTickPolicy);
            }
        }
        positive("camera.fovy_radians", self.camera.fovy_radians)?;
        positive("camera.znear", self.camera.znear)?;
        positive("camera.zfar - camera.znear", self.camera.zfar - self.camera.znear)?;
        Ok(())
    }

    /// Fixed-rate variant of this config at the default tick rate.
    pub fn with_fixed_rate(mut self) -> Self {
        self.tick_policy = TickPolicy::FixedRate {
            hz: FIXED_TICK_HZ,
            max_catchup: MAX_CATCHUP_TICKS,
        };
        self
    }
}
