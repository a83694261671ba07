use crate::dom;
use crate::input;
use backdrop_core::{InputSnapshot, InputSource};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer and scroll as last reported by the page. The theme is read from
/// the body classes at sample time so class toggles need no listener.
#[derive(Clone, Default)]
pub struct PageInput {
    latest: Rc<RefCell<InputSnapshot>>,
}

impl PageInput {
    pub fn new() -> Self {
        let input = Self::default();
        if let Some(window) = web::window() {
            input.latest.borrow_mut().scroll_fraction = dom::page_scroll_fraction(&window);
        }
        input
    }

    fn set_pointer(&self, ndc: Vec2) {
        self.latest.borrow_mut().pointer_ndc = ndc;
    }

    fn set_scroll(&self, fraction: f32) {
        self.latest.borrow_mut().scroll_fraction = fraction;
    }
}

impl InputSource for PageInput {
    fn sample(&self) -> InputSnapshot {
        let mut snapshot = *self.latest.borrow();
        if let Some(document) = dom::window_document() {
            snapshot.theme = dom::body_theme(&document);
        }
        snapshot
    }
}

pub fn wire_pointermove(input: &PageInput) {
    let input = input.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(window) = web::window() else {
            return;
        };
        let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        input.set_pointer(input::client_to_ndc(client, dom::viewport_size(&window)));
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_scroll(input: &PageInput) {
    let input = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(window) = web::window() {
            input.set_scroll(dom::page_scroll_fraction(&window));
        }
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Keep the canvas backing store in step with its CSS size and report each
/// change to `on_resize`.
pub fn wire_resize(
    canvas: &web::HtmlCanvasElement,
    mut on_resize: impl FnMut(u32, u32) + 'static,
) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        on_resize(w, h);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
