use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use crate::input;
use backdrop_core::Theme;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(
    document: &web::Document,
    id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", id, e)))
}

/// Match the canvas backing store to its CSS box and return the new size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) =
        input::backing_size(rect.width(), rect.height(), dpr, MAX_DEVICE_PIXEL_RATIO);
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Window inner size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> Vec2 {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Vec2::new(dim(window.inner_width()), dim(window.inner_height()))
}

pub fn page_scroll_fraction(window: &web::Window) -> f32 {
    let scroll_top = window.scroll_y().unwrap_or(0.0);
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map_or(0.0, |el| f64::from(el.scroll_height()));
    let viewport_height = f64::from(viewport_size(window).y);
    input::scroll_fraction(scroll_top, scroll_height, viewport_height)
}

pub fn body_theme(document: &web::Document) -> Theme {
    document.body().map_or(Theme::Default, |b| {
        input::theme_from_classes(b.class_name().split_whitespace())
    })
}
