// Test doubles for the host-side traits.

#![allow(dead_code)]

use backdrop_core::{Frame, FrameRequester, Node, Rgb, SceneHost};
use glam::{Vec2, Vec3};

/// Maps NDC linearly onto a 40x40 window around the origin.
pub const NDC_SCALE: f32 = 20.0;

#[derive(Default)]
pub struct RecordingHost {
    pub draws: usize,
    pub last_edges: usize,
    pub last_color: Option<Rgb>,
    pub last_rotation: f32,
    pub last_clock: f32,
    pub positions: Vec<Vec3>,
    pub resizes: Vec<(u32, u32)>,
    pub fail_draws: bool,
}

impl SceneHost for RecordingHost {
    type Error = &'static str;

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        self.draws += 1;
        self.last_edges = frame.edges.len();
        self.last_color = Some(frame.color);
        self.last_rotation = frame.rotation_y;
        self.last_clock = frame.clock;
        self.positions = frame.nodes.iter().map(|n| n.position).collect();
        if self.fail_draws {
            Err("surface lost")
        } else {
            Ok(())
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn world_point_from_ndc(&self, ndc: Vec2, depth: f32) -> Vec3 {
        Vec3::new(ndc.x * NDC_SCALE, ndc.y * NDC_SCALE, depth)
    }
}

#[derive(Default)]
pub struct CountingFrames {
    pub requests: usize,
    pub cancels: usize,
    pub pending: bool,
}

impl FrameRequester for CountingFrames {
    fn request_frame(&mut self) {
        assert!(!self.pending, "a frame was requested while one was pending");
        self.requests += 1;
        self.pending = true;
    }

    fn cancel_frame(&mut self) {
        self.cancels += 1;
        self.pending = false;
    }
}

impl CountingFrames {
    /// Simulate the host firing the pending callback.
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

pub fn node_at(x: f32, y: f32, z: f32) -> Node {
    let p = Vec3::new(x, y, z);
    Node {
        position: p,
        velocity: Vec3::ZERO,
        original_position: p,
        radius: 0.1,
    }
}

pub type TestLoop = backdrop_core::RenderLoop<RecordingHost, CountingFrames>;

pub const FRAME_DT: std::time::Duration = std::time::Duration::from_millis(16);

/// Fire the pending callback, if any, the way a browser would.
pub fn pump(l: &mut TestLoop, input: &backdrop_core::InputSnapshot) -> bool {
    if l.requester_mut().fire() {
        l.on_frame(FRAME_DT, input);
        true
    } else {
        false
    }
}
