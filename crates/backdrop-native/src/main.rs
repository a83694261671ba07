use backdrop_core::{
    linker_for, FrameClock, FrameRequester, InputSnapshot, LinkStrategy, RenderLoop, SceneConfig,
    Theme,
};
use backdrop_render::GpuState;
use glam::Vec2;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

// Height of the pretend page the mouse wheel scrolls through, in pixels
const VIRTUAL_PAGE_HEIGHT: f64 = 4000.0;
// Pixels per wheel line on devices that report lines
const WHEEL_LINE_PX: f64 = 40.0;
// Log loop stats every this many frames
const STATS_EVERY_FRAMES: u64 = 600;

/// Redraw requests stand in for animation frames.
struct NativeFrames<'w> {
    window: &'w Window,
    pending: bool,
}

impl<'w> NativeFrames<'w> {
    fn new(window: &'w Window) -> Self {
        Self {
            window,
            pending: false,
        }
    }

    /// Consume the pending request, if any.
    fn take_pending(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

impl FrameRequester for NativeFrames<'_> {
    fn request_frame(&mut self) {
        self.pending = true;
        self.window.request_redraw();
    }

    fn cancel_frame(&mut self) {
        self.pending = false;
    }
}

/// Wheel-driven stand-in for page scrolling.
#[derive(Clone, Copy, Debug)]
struct WheelScroll {
    offset: f64,
    page_height: f64,
}

impl WheelScroll {
    fn new(page_height: f64) -> Self {
        Self {
            offset: 0.0,
            page_height,
        }
    }

    /// Scroll by `delta_px` (positive scrolls down the page), clamped to the
    /// scrollable range for a viewport of `viewport_height`.
    fn scroll_by(&mut self, delta_px: f64, viewport_height: f64) {
        let range = (self.page_height - viewport_height).max(0.0);
        self.offset = (self.offset + delta_px).clamp(0.0, range);
    }

    fn fraction(&self, viewport_height: f64) -> f32 {
        let range = self.page_height - viewport_height;
        if range <= 0.0 {
            return 0.0;
        }
        (self.offset / range) as f32
    }
}

fn next_theme(theme: Theme) -> Theme {
    match theme {
        Theme::Default => Theme::Light,
        Theme::Light => Theme::Dark,
        Theme::Dark => Theme::Default,
    }
}

fn cursor_to_ndc(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    if width == 0 || height == 0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (x / f64::from(width) * 2.0 - 1.0) as f32,
        (1.0 - y / f64::from(height) * 2.0) as f32,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Neural backdrop (native preview)")
        .build(&event_loop)?;

    let config = SceneConfig::default().with_fixed_rate();
    let size = window.inner_size();
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(&window)?;
    let gpu = pollster::block_on(GpuState::new(
        &instance,
        surface,
        size.width,
        size.height,
        config.camera.clone(),
    ))?;
    let mut scene = RenderLoop::new(config, gpu, NativeFrames::new(&window))?;

    let mut input = InputSnapshot::default();
    let mut wheel = WheelScroll::new(VIRTUAL_PAGE_HEIGHT);
    let mut strategy = scene.config().link_strategy;
    let mut clock = FrameClock::new();
    log::info!("keys: space = start/stop, L = theme, G = linker, R = reset, Esc = quit");
    scene.start();

    let window = &window;
    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => scene.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                let size = window.inner_size();
                input.pointer_ndc = cursor_to_ndc(position.x, position.y, size.width, size.height);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_px = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => -p.y,
                };
                let viewport = f64::from(window.inner_size().height);
                wheel.scroll_by(delta_px, viewport);
                input.scroll_fraction = wheel.fraction(viewport);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key.as_ref() {
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Named(NamedKey::Space) => {
                    if scene.is_running() {
                        scene.stop();
                    } else {
                        clock = FrameClock::new();
                        scene.start();
                    }
                }
                Key::Character(c) if c.eq_ignore_ascii_case("l") => {
                    input.theme = next_theme(input.theme);
                    log::info!("[input] theme {:?}", input.theme);
                }
                Key::Character(c) if c.eq_ignore_ascii_case("g") => {
                    strategy = match strategy {
                        LinkStrategy::AllPairs => LinkStrategy::UniformGrid,
                        LinkStrategy::UniformGrid => LinkStrategy::AllPairs,
                    };
                    scene.set_linker(linker_for(strategy));
                }
                Key::Character(c) if c.eq_ignore_ascii_case("r") => scene.reset_nodes(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                if !scene.requester_mut().take_pending() {
                    return;
                }
                scene.on_frame(clock.lap(), &input);
                let stats = scene.stats();
                if stats.frames % STATS_EVERY_FRAMES == 0 {
                    log::info!(
                        "[stats] frames={} ticks={} edges={} draw_errors={}",
                        stats.frames,
                        stats.ticks,
                        stats.edges,
                        stats.draw_errors
                    );
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}
