// Color Space Visualization
//
// This is the main entry point for the application. It owns the window and
// the input-to-request plumbing: mouse drags rotate the volume, clicks look
// up the color under the cursor, and key presses flip between spaces,
// view modes and highlight settings. All rendering goes through the
// orchestrator in `render_metal`.

mod color;
mod geometry;
mod memory;
mod render;
mod render_metal;
mod telemetry;

use glam::{Mat4, Quat};
use winit::{
    event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::color::{NamedColor, Palette, RgbColor, SpaceId};
use crate::render::{AxisSlices, RenderRequest, ViewMode};

fn demo_palette() -> Palette {
    let colors = vec![
        NamedColor::new("Red", RgbColor::from_bytes(230, 25, 75)),
        NamedColor::new("Orange", RgbColor::from_bytes(245, 130, 48)),
        NamedColor::new("Yellow", RgbColor::from_bytes(255, 225, 25)),
        NamedColor::new("Green", RgbColor::from_bytes(60, 180, 75)),
        NamedColor::new("Cyan", RgbColor::from_bytes(70, 240, 240)),
        NamedColor::new("Blue", RgbColor::from_bytes(0, 130, 200)),
        NamedColor::new("Purple", RgbColor::from_bytes(145, 30, 180)),
        NamedColor::new("Gray", RgbColor::from_bytes(128, 128, 128)),
    ];
    Palette::new(colors).unwrap_or_else(|err| {
        error!("demo palette rejected: {}", err);
        Palette::empty()
    })
}

struct App {
    orchestrator: render_metal::MetalOrchestrator,
    window: winit::window::Window,
    request: RenderRequest,
    yaw: f32,
    pitch: f32,
    dragging: bool,
    last_cursor: (f64, f64),
}

impl App {
    fn new(window: winit::window::Window) -> Result<Self, String> {
        let orchestrator = render_metal::MetalOrchestrator::try_new(&window)
            .map_err(|err| err.to_string())?;

        let mut request = RenderRequest::new(
            SpaceId::Hsv,
            AxisSlices::full_volume(SpaceId::Hsv),
            ViewMode::Volume3D,
        );
        request.palette = demo_palette();

        Ok(Self {
            orchestrator,
            window,
            request,
            yaw: 0.6,
            pitch: -0.4,
            dragging: false,
            last_cursor: (0.0, 0.0),
        })
    }

    fn rotation(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw))
    }

    fn queue_render(&mut self) {
        self.request.rotation = self.rotation();
        // Slider-style interactions coalesce; nothing here feeds readback.
        self.orchestrator.render_deferred(self.request.clone());
    }

    fn set_space(&mut self, space: SpaceId) {
        self.request.space = space;
        self.request.slices = AxisSlices::full_volume(space);
        self.queue_render();
    }

    fn report_color(&mut self) {
        // Readback needs the submitted frame, not a pending one.
        if let Some(result) = self.orchestrator.pump_deferred() {
            if let Err(err) = result {
                warn!("deferred render failed: {}", err);
                return;
            }
        }
        self.orchestrator.wait_for_render();
        let (x, y) = (self.last_cursor.0 as i32, self.last_cursor.1 as i32);
        match self.orchestrator.color_at(x, y) {
            (Some(rgb), Some(named)) => println!("{} -> {} ({})", rgb, named.name, named.rgb),
            (Some(rgb), None) => println!("{} -> no palette match", rgb),
            _ => println!("({}, {}) outside the color space", x, y),
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => {
                self.orchestrator
                    .resize(size.width, size.height, self.window.scale_factor());
                self.queue_render();
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: ElementState::Pressed,
                ..
            } => {
                self.report_color();
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging && self.request.mode == ViewMode::Volume3D {
                    let dx = (position.x - self.last_cursor.0) as f32 * 0.01;
                    let dy = (position.y - self.last_cursor.1) as f32 * 0.01;
                    self.yaw += dx;
                    self.pitch = (self.pitch + dy).clamp(-1.5, 1.5);
                    self.queue_render();
                }
                self.last_cursor = (position.x, position.y);
            }
            WindowEvent::KeyboardInput { input, .. } => {
                if input.state != ElementState::Pressed {
                    return;
                }
                match input.virtual_keycode {
                    Some(VirtualKeyCode::Key1) => self.set_space(SpaceId::Rgb),
                    Some(VirtualKeyCode::Key2) => self.set_space(SpaceId::Hsv),
                    Some(VirtualKeyCode::Key3) => self.set_space(SpaceId::Hsl),
                    Some(VirtualKeyCode::P) => {
                        self.request.polar = !self.request.polar
                            && self.request.space.space().polar_axis().is_some();
                        self.queue_render();
                    }
                    Some(VirtualKeyCode::B) => {
                        self.request.show_boundaries = !self.request.show_boundaries;
                        self.queue_render();
                    }
                    Some(VirtualKeyCode::U) => {
                        self.request.show_unmatched = !self.request.show_unmatched;
                        self.queue_render();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn pump(&mut self) {
        if let Some(Err(err)) = self.orchestrator.pump_deferred() {
            warn!("deferred render failed: {}", err);
        }
    }
}

fn main() {
    telemetry::init();

    if !cfg!(target_os = "macos") {
        error!("The windowed visualizer currently requires the macOS Metal backend.");
        return;
    }

    let event_loop = EventLoop::new();
    let window = match WindowBuilder::new()
        .with_title("Color Space Visualization")
        .with_inner_size(winit::dpi::LogicalSize::new(900, 900))
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(err) => {
            error!("Failed to create window: {}", err);
            return;
        }
    };

    let mut app = match App::new(window) {
        Ok(app) => app,
        Err(err) => {
            error!("Failed to initialize application: {}", err);
            return;
        }
    };
    app.queue_render();

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, window_id } if window_id == app.window.id() => match event {
            WindowEvent::CloseRequested => {
                *control_flow = ControlFlow::Exit;
            }
            _ => {
                app.handle_window_event(&event);
            }
        },
        Event::RedrawRequested(window_id) if window_id == app.window.id() => {
            app.pump();
        }
        Event::MainEventsCleared => {
            app.window.request_redraw();
        }
        _ => {}
    });
}
