use anyhow::Result;
use clap::Parser;
use spincube_render::{CubeRenderer, DeviceError, FrameHandler, RenderError};
use spincube_render_wgpu::{SurfaceSettings, WgpuDevice};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 768;

#[derive(Parser)]
#[command(name = "spincube-desktop", about = "Render a spinning red cube")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Present as fast as possible instead of syncing to the display
    #[arg(long)]
    no_vsync: bool,
}

/// Top-left corner that centers `window` on a monitor.
fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let dx = (monitor.width.saturating_sub(window.width) / 2) as i32;
    let dy = (monitor.height.saturating_sub(window.height) / 2) as i32;
    PhysicalPosition::new(monitor_origin.x + dx, monitor_origin.y + dy)
}

/// Owns the window and GPU device and forwards host events to a [`FrameHandler`].
struct CubeApp<H> {
    handler: H,
    settings: SurfaceSettings,
    window: Option<Arc<Window>>,
    gpu: Option<WgpuDevice>,
    last_frame: Instant,
    startup_error: Option<anyhow::Error>,
}

impl<H: FrameHandler<WgpuDevice>> CubeApp<H> {
    fn new(handler: H, settings: SurfaceSettings) -> Self {
        Self {
            handler,
            settings,
            window: None,
            gpu: None,
            last_frame: Instant::now(),
            startup_error: None,
        }
    }

    /// Record why the window could not be brought up.
    fn fail_startup(&mut self, err: anyhow::Error) {
        tracing::error!("startup failed: {err:#}");
        self.startup_error = Some(err);
    }

    /// Outcome of the event loop run: the startup failure, if any.
    fn finish(&mut self) -> Result<()> {
        match self.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = PhysicalSize::new(self.settings.width, self.settings.height);
        let mut attrs = Window::default_attributes()
            .with_title("Spinning Cube")
            .with_inner_size(size);
        if let Some(monitor) = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
        {
            let position = centered_position(monitor.position(), monitor.size(), size);
            attrs = attrs.with_position(position);
        }
        let window = Arc::new(event_loop.create_window(attrs)?);

        let inner = window.inner_size();
        let mut gpu = WgpuDevice::new(
            window.clone(),
            SurfaceSettings {
                width: inner.width,
                height: inner.height,
                ..self.settings
            },
        )?;

        self.handler.load(&mut gpu)?;
        self.handler.resize(&mut gpu, inner.width, inner.height);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.handler.update(dt);
        match self.handler.render(gpu) {
            Ok(()) => {}
            Err(RenderError::Device(DeviceError::SurfaceLost)) => {
                tracing::debug!("surface lost, frame skipped");
            }
            Err(e) => tracing::error!("render failed: {e}"),
        }
    }
}

impl<H: FrameHandler<WgpuDevice>> ApplicationHandler for CubeApp<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail_startup(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize_surface(new_size.width, new_size.height);
                    self.handler.resize(gpu, new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut gpu) = self.gpu.take() {
            self.handler.unload(&mut gpu);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        width = cli.width,
        height = cli.height,
        "spincube-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let settings = SurfaceSettings {
        width: cli.width,
        height: cli.height,
        vsync: !cli.no_vsync,
    };
    let mut app = CubeApp::new(CubeRenderer::new(cli.width, cli.height), settings);
    event_loop.run_app(&mut app)?;

    app.finish()
}
