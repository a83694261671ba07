//! wgpu drawing for the backdrop scene.
//!
//! [`GpuState`] owns a configured surface plus two pipelines (instanced node
//! billboards and a line list for edges) and implements
//! [`backdrop_core::SceneHost`], so the same renderer serves the browser
//! canvas and a native window.

mod gpu;
mod pipelines;

pub use gpu::GpuState;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
