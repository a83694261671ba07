//! Frame loop: lifecycle state machine and the ordered per-tick sequence.
//!
//! The loop never schedules itself. A host hands it a [`FrameRequester`]
//! (requestAnimationFrame on the web, a redraw request on native) and calls
//! [`RenderLoop::on_frame`] from that callback. The next frame is requested
//! only after the current one has finished, so two ticks never overlap.

use crate::color::{scroll_band, ColorState, Rgb, Theme};
use crate::config::{ConfigError, SceneConfig, TickPolicy};
use crate::linker::{linker_for, EdgeList, ProximityLinker};
use crate::math::wrap_angle;
use crate::node::{Node, NodeField};
use crate::state::InputSnapshot;
use glam::{Vec2, Vec3};
use instant::Instant;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;
use std::time::Duration;

/// Registration with the host's once-per-paint callback.
pub trait FrameRequester {
    /// Ask for one more callback before the next paint.
    fn request_frame(&mut self);
    /// Drop a pending callback, if any. Must tolerate nothing being pending.
    fn cancel_frame(&mut self);
}

/// Everything a host needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a EdgeList,
    pub color: Rgb,
    /// Cosmetic rotation of the whole group about +Y, in `[0, TAU)`.
    pub rotation_y: f32,
    /// Simulation clock phase, in `[0, TAU)`.
    pub clock: f32,
}

/// Drawing surface plus the projection the pointer is unprojected through.
pub trait SceneHost {
    type Error: Debug;

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;

    fn on_resize(&mut self, width: u32, height: u32);

    fn world_point_from_ndc(&self, ndc: Vec2, depth: f32) -> Vec3;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub ticks: u64,
    pub edges: usize,
    pub draw_errors: u64,
}

/// Wall-clock time between host callbacks.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous lap (or construction).
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt
    }
}

pub struct RenderLoop<H, R> {
    state: LoopState,
    host: H,
    requester: R,
    config: SceneConfig,
    field: NodeField,
    linker: Box<dyn ProximityLinker>,
    edges: EdgeList,
    color: ColorState,
    color_key: Option<(usize, Theme)>,
    clock: f32,
    rotation_y: f32,
    accumulator: Duration,
    stats: LoopStats,
}

impl<H: SceneHost, R: FrameRequester> RenderLoop<H, R> {
    /// Validate `config`, seed the population and build a stopped loop.
    pub fn new(config: SceneConfig, host: H, requester: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let field = NodeField::initialize(&config, &mut rng);
        Ok(Self::assemble(config, field, host, requester))
    }

    /// Build a stopped loop around an existing field.
    pub fn with_field(
        config: SceneConfig,
        field: NodeField,
        host: H,
        requester: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, field, host, requester))
    }

    fn assemble(config: SceneConfig, field: NodeField, host: H, requester: R) -> Self {
        let initial = config.palette.target_for(0.0, Theme::Default);
        let linker = linker_for(config.link_strategy);
        log::info!(
            "[loop] nodes={} threshold={:.1} linker={} policy={:?}",
            field.len(),
            config.link_threshold,
            linker.name(),
            config.tick_policy
        );
        Self {
            state: LoopState::Stopped,
            host,
            requester,
            field,
            linker,
            edges: EdgeList::with_capacity(config.node_count * 2),
            color: ColorState::new(initial),
            color_key: None,
            clock: 0.0,
            rotation_y: 0.0,
            accumulator: Duration::ZERO,
            stats: LoopStats::default(),
            config,
        }
    }

    /// Swap the proximity scan without touching any other state.
    pub fn set_linker(&mut self, linker: Box<dyn ProximityLinker>) {
        log::debug!("[loop] linker {} -> {}", self.linker.name(), linker.name());
        self.linker = linker;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn start(&mut self) {
        if self.is_running() {
            log::debug!("[loop] start ignored; already running");
            return;
        }
        self.state = LoopState::Running;
        self.accumulator = Duration::ZERO;
        self.requester.request_frame();
        log::info!("[loop] started");
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            log::debug!("[loop] stop ignored; already stopped");
            return;
        }
        self.requester.cancel_frame();
        self.state = LoopState::Stopped;
        log::info!("[loop] stopped after {} frames", self.stats.frames);
    }

    /// Host callback. Runs the tick sequence, draws once, then asks for the
    /// next frame. Does nothing while stopped.
    pub fn on_frame(&mut self, elapsed: Duration, input: &InputSnapshot) {
        if !self.is_running() {
            log::trace!("[loop] frame while stopped; skipping");
            return;
        }
        let ticks = self.ticks_for(elapsed);

        if ticks > 0 {
            let pointer = self
                .host
                .world_point_from_ndc(input.pointer_ndc, self.config.pointer_plane_z);
            for _ in 0..ticks {
                self.clock = wrap_angle(self.clock + self.config.clock_per_tick);
                self.field.step(Some(pointer));
            }
            self.linker
                .rebuild(self.field.nodes(), self.config.link_threshold, &mut self.edges);
            self.retarget_color(input);
            for _ in 0..ticks {
                self.color.step(self.config.color_decay);
            }
            // wrapped so the per-tick step never drops below one ulp
            self.rotation_y =
                wrap_angle(self.rotation_y + self.config.rotation_per_tick * ticks as f32);
            self.stats.ticks += u64::from(ticks);
            self.stats.edges = self.edges.len();
        }

        let frame = Frame {
            nodes: self.field.nodes(),
            edges: &self.edges,
            color: self.color.current(),
            rotation_y: self.rotation_y,
            clock: self.clock,
        };
        if let Err(e) = self.host.draw(&frame) {
            self.stats.draw_errors += 1;
            log::error!("render error: {:?}", e);
        }
        self.stats.frames += 1;
        log::trace!(
            "[loop] frame={} ticks={} edges={}",
            self.stats.frames,
            ticks,
            self.stats.edges
        );

        if self.is_running() {
            self.requester.request_frame();
        }
    }

    fn ticks_for(&mut self, elapsed: Duration) -> u32 {
        match self.config.tick_policy {
            TickPolicy::PerFrame => 1,
            TickPolicy::FixedRate { hz, max_catchup } => {
                let step = Duration::from_secs_f32(1.0 / hz);
                self.accumulator += elapsed;
                let mut ticks = 0;
                while self.accumulator >= step && ticks < max_catchup {
                    self.accumulator -= step;
                    ticks += 1;
                }
                if ticks == max_catchup && self.accumulator >= step {
                    // fell behind; drop the backlog instead of spiralling
                    self.accumulator = Duration::ZERO;
                }
                ticks
            }
        }
    }

    fn retarget_color(&mut self, input: &InputSnapshot) {
        let key = (scroll_band(input.scroll_fraction), input.theme);
        if self.color_key != Some(key) {
            self.color_key = Some(key);
            self.color.set_target(self.config.palette.slot(key.1, key.0));
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.host.on_resize(width, height);
    }

    /// Put every node back at its spawn position.
    pub fn reset_nodes(&mut self) {
        self.field.reset();
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn field(&self) -> &NodeField {
        &self.field
    }

    pub fn edges(&self) -> &EdgeList {
        &self.edges
    }

    pub fn color(&self) -> &ColorState {
        &self.color
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    pub fn requester_mut(&mut self) -> &mut R {
        &mut self.requester
    }
}
