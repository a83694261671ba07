use crate::events::PageInput;
use backdrop_core::{FrameClock, FrameRequester, InputSource, RenderLoop};
use backdrop_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebLoop = RenderLoop<GpuState<'static>, RafFrames>;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` registration for the scene loop.
#[derive(Default)]
pub struct RafFrames {
    callback: FrameCallback,
    handle: Option<i32>,
}

impl RafFrames {
    pub fn new() -> Self {
        Self::default()
    }

    fn mark_fired(&mut self) {
        self.handle = None;
    }
}

impl FrameRequester for RafFrames {
    fn request_frame(&mut self) {
        let Some(window) = web::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(cb) = callback.as_ref() else {
            log::warn!("[frame] no callback installed");
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.handle = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel_frame(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }
}

/// Install the animation-frame callback that drives `scene` with samples
/// from `input`. The callback holds the scene weakly.
pub fn install(scene: &Rc<RefCell<WebLoop>>, input: PageInput) {
    let weak = Rc::downgrade(scene);
    let mut clock = FrameClock::new();
    let closure = Closure::wrap(Box::new(move |_timestamp: f64| {
        let Some(scene) = weak.upgrade() else {
            return;
        };
        let elapsed = clock.lap();
        let snapshot = input.sample();
        match scene.try_borrow_mut() {
            Ok(mut l) => {
                l.requester_mut().mark_fired();
                l.on_frame(elapsed, &snapshot);
            }
            Err(_) => log::error!("[frame] scene already borrowed; frame dropped"),
        }
    }) as Box<dyn FnMut(f64)>);
    let slot = scene.borrow().requester().callback.clone();
    *slot.borrow_mut() = Some(closure);
}
