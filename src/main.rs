//! Morphprism - interactive morphing prism viewer
//!
//! Renders a hexagonal prism whose cross-section morphs toward a cylinder.
//! Drag to rotate; drag the bar at the bottom of the window to set the morph
//! factor.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use morphprism::config::AppConfig;
use morphprism::systems::{RenderError, RenderSystem, WindowSystem};
use morphprism_core::PrismParams;
use morphprism_input::InteractionState;

/// Main application state
struct App {
    config: AppConfig,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    /// Shape constants for the generator
    prism: PrismParams,
    /// Rotation angles, morph factor, and active pointer mode
    interaction: InteractionState,
}

impl App {
    fn new() -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let prism = config.prism.to_params();
        let interaction =
            InteractionState::new(config.control_bar.to_bounds(config.window.height as f32))
                .with_drag_sensitivity(config.input.drag_sensitivity);

        Self {
            config,
            window_system: None,
            render_system: None,
            prism,
            interaction,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_none() {
            let window_system = WindowSystem::create(event_loop, &self.config.window)
                .expect("Failed to create window");

            let render_system =
                RenderSystem::new(window_system.window().clone(), &self.config);

            // Anchor the control bar to the actual surface size (the physical
            // size can differ from the configured logical size)
            let size = window_system.window().inner_size();
            self.interaction
                .set_bar_bounds(self.config.control_bar.to_bounds(size.height as f32));

            window_system.request_redraw();
            self.window_system = Some(window_system);
            self.render_system = Some(render_system);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(physical_size.width, physical_size.height);
                }
                self.interaction.set_bar_bounds(
                    self.config
                        .control_bar
                        .to_bounds(physical_size.height as f32),
                );
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(KeyCode::Escape) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        event_loop.exit();
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.interaction.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.interaction.process_mouse_button(button, state);
            }

            WindowEvent::RedrawRequested => {
                // Regenerate from the current morph factor every frame; the
                // vertex list is ephemeral by design
                let mesh = self.prism.generate(self.interaction.morph());

                if let Some(render_system) = &mut self.render_system {
                    match render_system.render_frame(
                        &mesh,
                        self.interaction.angles(),
                        self.interaction.morph(),
                    ) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => {
                            let (width, height) = render_system.size();
                            render_system.resize(width, height);
                        }
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("Surface error: {}", e);
                        }
                    }
                }

                if let Some(window_system) = &self.window_system {
                    let (angle_x, angle_y) = self.interaction.angles();
                    window_system.update_title(self.interaction.morph(), angle_x, angle_y);
                    window_system.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting morphprism");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
