mod config;
mod hud;

use anyhow::{Context as _, Result, anyhow};
use clap::{Parser, ValueEnum};
use config::{Overrides, ViewerConfig, WindowConfig};
use egui::Context as EguiContext;
use hud::FpsCounter;
use mapviz_camera::{CameraController, FreeCamera, Projection};
use mapviz_grid::HeightGrid;
use mapviz_input::{Bindings, InputFrame, Key, KeyboardSnapshot, Scheme, Speeds};
use mapviz_render::FrameView;
use mapviz_render_wgpu::GridRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemeArg {
    Fly,
    Orbit,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Fly => Scheme::Fly,
            SchemeArg::Orbit => Scheme::Orbit,
        }
    }
}

#[derive(Parser)]
#[command(name = "mapviz-desktop", about = "Fly over a height grid of boxes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML viewer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Height-map CSV to display instead of a procedural grid
    #[arg(long)]
    map: Option<PathBuf>,

    /// Procedural grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Procedural grid columns
    #[arg(long)]
    columns: Option<usize>,

    /// Distance between neighbouring boxes
    #[arg(long)]
    spacing: Option<f32>,

    /// Key binding scheme
    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,

    /// Start with box outlines hidden
    #[arg(long)]
    no_wireframe: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            map: self.map.clone(),
            rows: self.rows,
            columns: self.columns,
            spacing: self.spacing,
            scheme: self.scheme.map(Scheme::from),
            no_wireframe: self.no_wireframe,
        }
    }
}

/// Translate a physical key into the viewer's key set.
fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyO => Key::O,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

/// Application state.
struct AppState {
    controller: CameraController,
    projection: Projection,
    bindings: Bindings,
    speeds: Speeds,
    grid: HeightGrid,
    wireframe: bool,
    show_hud: bool,
    // Input state
    keys_held: KeyboardSnapshot,
    input: InputFrame,
    fps: FpsCounter,
    last_frame: Instant,
    exit_requested: bool,
}

impl AppState {
    fn new(config: &ViewerConfig, grid: HeightGrid) -> Self {
        let speeds = config.speeds(&grid);
        tracing::info!(
            movement = speeds.movement,
            vertical = speeds.vertical,
            angular = speeds.angular,
            scheme = ?config.scheme,
            "controls ready"
        );
        Self {
            controller: CameraController::new(
                FreeCamera::from_config(&config.camera),
                config.orbit(),
            ),
            projection: config.projection,
            bindings: Bindings::for_scheme(config.scheme),
            speeds,
            grid,
            wireframe: config.wireframe,
            show_hud: true,
            keys_held: KeyboardSnapshot::new(),
            input: InputFrame::default(),
            fps: FpsCounter::new(),
            last_frame: Instant::now(),
            exit_requested: false,
        }
    }

    /// One frame of input and camera motion.
    fn update(&mut self, dt: f32) {
        self.input = self.input.advance(self.keys_held);
        if self.input.pressed(Key::O) {
            self.wireframe = !self.wireframe;
        }

        let actions = self.bindings.actions(&self.input, dt, &self.speeds);
        if self.controller.apply(&actions) {
            self.exit_requested = true;
        }
        self.controller.advance(dt);
        self.fps.tick(dt);
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if code == KeyCode::F1 && pressed {
            self.show_hud = !self.show_hud;
            return;
        }
        if let Some(key) = map_key(code) {
            self.keys_held.set(key, pressed);
        }
    }

    fn frame_view(&self) -> FrameView {
        FrameView::new(
            self.controller.camera.view_matrix(),
            self.projection.matrix(),
        )
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let camera = &self.controller.camera;
        let (p, f, u) = (camera.position, camera.forward(), camera.up());
        egui::Window::new("Map Visualizer")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.0}", self.fps.fps()));
                ui.label(format!(
                    "Grid: {}x{} ({} boxes)",
                    self.grid.rows(),
                    self.grid.columns(),
                    self.grid.len()
                ));
                ui.separator();
                ui.label(format!("Position: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
                ui.label(format!("Forward:  ({:.2}, {:.2}, {:.2})", f.x, f.y, f.z));
                ui.label(format!("Up:       ({:.2}, {:.2}, {:.2})", u.x, u.y, u.z));
                ui.label(format!(
                    "Orbit: {}",
                    if self.controller.orbit.is_active() {
                        "on"
                    } else {
                        "off"
                    }
                ));
                ui.checkbox(&mut self.wireframe, "Outlines (O)");
                ui.separator();
                ui.small("F1: Toggle HUD | WASD: Move | Arrows: Look | Esc: Quit");
            });
    }
}

/// Everything that exists only once a window is up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: GridRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        window_config: &WindowConfig,
        grid: &HeightGrid,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("mapviz_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer =
            GridRenderer::new(&device, surface_format, config.width, config.height, grid)?;

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            instances = renderer.instance_count(),
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw(&mut self, state: &mut AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &state.frame_view(),
            state.wireframe,
        );

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
        self.window.request_redraw();
    }
}

struct GpuApp {
    state: AppState,
    window_config: WindowConfig,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    /// Set when startup fails inside the event loop; returned from `main`.
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, window_config: WindowConfig) -> Self {
        Self {
            state,
            window_config,
            gpu: None,
            egui_ctx: EguiContext::default(),
            error: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(
            event_loop,
            &self.window_config,
            &self.state.grid,
            &self.egui_ctx,
        ) {
            Ok(gpu) => {
                self.state
                    .projection
                    .set_viewport(gpu.config.width, gpu.config.height);
                self.state.last_frame = Instant::now();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("GPU setup failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state
                    .projection
                    .set_viewport(gpu.config.width, gpu.config.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => {
                // Key-up events are not delivered while unfocused.
                self.state.keys_held = KeyboardSnapshot::new();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                if self.state.exit_requested {
                    tracing::info!("exit requested");
                    event_loop.exit();
                    return;
                }

                gpu.draw(&mut self.state, &self.egui_ctx);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("mapviz-desktop starting");

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    config.apply(&cli.overrides());

    let grid = HeightGrid::build(&config.grid).context("failed to build grid")?;
    let state = AppState::new(&config, grid);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, config.window.clone());
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
