//! Gridwave - a grid-of-discs animation player synced to an audio track
//!
//! Loads a run-length encoded frame sequence in the background, starts
//! the music on demand, and repaints the grid each display refresh at
//! whatever frame the elapsed playback time calls for.

use std::sync::{mpsc, Arc};
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use clap::Parser;

use gridwave::audio::{AudioSystem, AudioTrack};
use gridwave::cli::Args;
use gridwave::frames::{spawn_loader_thread, FrameStore, Grid};
use gridwave::params::{CellLayout, GridConfig, RenderConfig};
use gridwave::playback::FramePacer;
use gridwave::rendering::{RenderSystem, Uniforms};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Playback systems
    audio: Option<AudioSystem>,
    pacer: FramePacer,

    // Frame data
    store: FrameStore,
    loader: Option<mpsc::Receiver<Result<FrameStore, String>>>,
    grid: Grid,

    // Configuration
    grid_config: GridConfig,
    render_config: RenderConfig,
    audio_path: std::path::PathBuf,
}

impl App {
    fn new(args: Args) -> Self {
        let grid_config = GridConfig::default();
        let render_config = RenderConfig::default();

        // Kick off the one-shot frame-sequence load right away
        let loader = spawn_loader_thread(args.frames, grid_config.cell_count());

        Self {
            window: None,
            render_system: None,
            audio: None,
            pacer: FramePacer::new(grid_config.fps),
            store: FrameStore::empty(),
            loader: Some(loader),
            grid: Grid::new(grid_config.width, grid_config.height),
            grid_config,
            render_config,
            audio_path: args.audio,
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        self.poll_loader();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Gridwave")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        // Initialize rendering system
        let render_system =
            pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.grid_config)).unwrap();

        // Initialize audio; without it the animation can never start
        let audio = AudioTrack::load(&self.audio_path)
            .and_then(AudioSystem::new)
            .map_err(|e| log::error!("audio unavailable: {}", e))
            .ok();

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.audio = audio;
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => {
                    self.shutdown();
                    event_loop.exit();
                }
                KeyCode::Space => self.try_start(),
                _ => {}
            },
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

impl App {
    /// Pick up the frame-sequence load result, if it has arrived
    fn poll_loader(&mut self) {
        let Some(receiver) = &self.loader else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(store)) => {
                println!(
                    "Frames loaded: {} ({}x{} grid @ {} fps)",
                    store.len(),
                    self.grid_config.width,
                    self.grid_config.height,
                    self.grid_config.fps
                );
                println!("Press SPACE to start, ESC to quit\n");
                self.store = store;
                self.loader = None;
            }
            Ok(Err(e)) => {
                // Store stays empty; starting is a logged no-op
                log::error!("frame sequence load failed: {}", e);
                self.loader = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                log::error!("frame loader thread died without a result");
                self.loader = None;
            }
        }
    }

    /// Start audio, then pacing, if everything is ready
    fn try_start(&mut self) {
        if self.pacer.is_running() {
            return;
        }
        if self.store.is_empty() {
            log::warn!("not ready: frame sequence is not loaded");
            return;
        }
        let Some(audio) = &self.audio else {
            log::error!("cannot start: audio system unavailable");
            return;
        };

        match audio.play() {
            Ok(()) => {
                // Playback baseline is captured exactly once, here
                self.pacer.start(Instant::now(), self.store.len());
                log::info!("playback started");
            }
            Err(e) => log::error!("error playing audio: {}", e),
        }
    }

    /// One pacing tick: advance, decode, repaint
    fn redraw(&mut self) {
        if let Some(index) = self.pacer.tick(Instant::now(), self.store.len()) {
            if let Some(frame) = self.store.get(index) {
                self.grid.apply_frame(frame);
            }
        }

        let Some(render_system) = &mut self.render_system else {
            return;
        };

        let (width, height) = render_system.surface_size();
        let layout = CellLayout::fit(
            [width as f32, height as f32],
            self.grid_config.width,
            self.grid_config.height,
        );
        render_system.update_uniforms(&Uniforms {
            viewport_px: [width as f32, height as f32],
            origin_px: layout.origin_px,
            grid_size: [
                self.grid_config.width as f32,
                self.grid_config.height as f32,
            ],
            cell_px: layout.cell_px,
            _padding: 0.0,
        });
        render_system.update_cells(&self.grid);

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.surface_size();
                render_system.resize(width, height);
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    /// Cancel pacing and stop the music
    fn shutdown(&mut self) {
        self.pacer.stop();
        if let Some(audio) = &self.audio {
            audio.stop();
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("Gridwave - grid animation synced to audio");
    println!("Loading {} ...\n", args.frames.display());

    let mut app = App::new(args);
    let event_loop = EventLoop::new().unwrap();
    let _ = event_loop.run_app(&mut app);
}
