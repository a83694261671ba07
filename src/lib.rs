#![cfg(target_arch = "wasm32")]
use backdrop_core::{RenderLoop, SceneConfig};
use backdrop_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;

use constants::{AUTO_START, CANVAS_ID};
use frame::{RafFrames, WebLoop};

thread_local! {
    static SCENE: RefCell<Option<Rc<RefCell<WebLoop>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let config = SceneConfig::default();
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let gpu = GpuState::new(&instance, surface, width, height, config.camera.clone()).await?;
    let scene = Rc::new(RefCell::new(RenderLoop::new(config, gpu, RafFrames::new())?));

    let input = events::PageInput::new();
    frame::install(&scene, input.clone());
    events::wire_pointermove(&input);
    events::wire_scroll(&input);
    let weak = Rc::downgrade(&scene);
    events::wire_resize(&canvas, move |w, h| {
        if let Some(scene) = weak.upgrade() {
            if let Ok(mut s) = scene.try_borrow_mut() {
                s.resize(w, h);
            }
        }
    });

    if AUTO_START {
        scene.borrow_mut().start();
    }
    SCENE.with(|slot| *slot.borrow_mut() = Some(scene));
    Ok(())
}

fn with_scene(action: &str, f: impl FnOnce(&mut WebLoop)) {
    SCENE.with(|slot| match slot.borrow().as_ref() {
        Some(scene) => match scene.try_borrow_mut() {
            Ok(mut s) => f(&mut s),
            Err(_) => log::warn!("{} ignored; scene busy", action),
        },
        None => log::warn!("{} ignored; backdrop not initialized", action),
    });
}

/// Resume the animation. No effect if already running.
#[wasm_bindgen]
pub fn backdrop_start() {
    with_scene("backdrop_start", |s| s.start());
}

/// Pause the animation and drop any pending frame. No effect if already
/// stopped.
#[wasm_bindgen]
pub fn backdrop_stop() {
    with_scene("backdrop_stop", |s| s.stop());
}
