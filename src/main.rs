//! BounceBlitz entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::sync::Arc;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use winit::application::ApplicationHandler;
    use winit::dpi::LogicalSize;
    use winit::event::{ElementState, KeyEvent, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::keyboard::{KeyCode, PhysicalKey};
    use winit::window::{Window, WindowId};

    use bounce_blitz::audio::LogAudio;
    use bounce_blitz::renderer::{RenderInitError, RenderState, build_scene};
    use bounce_blitz::sim::{GameState, TickInput, TickOutcome, tick};
    use bounce_blitz::{OrbitCamera, Settings};

    /// Overrides the time-based RNG seed
    const SEED_ENV: &str = "BOUNCE_BLITZ_SEED";

    /// How the event loop ended
    pub enum Exit {
        /// Window closed or Escape pressed
        Closed,
        /// Ball fell through the floor
        GameOver { score: u32 },
        /// The GPU gave up mid-game
        GpuFailure,
    }

    /// Window and GPU resources, created on the first `resumed`
    struct Gpu {
        window: Arc<Window>,
        render_state: RenderState,
    }

    struct App {
        settings: Settings,
        state: GameState,
        camera: OrbitCamera,
        input: TickInput,
        audio: LogAudio,
        gpu: Option<Gpu>,
        last_frame: Option<Instant>,
        shown_score: Option<u32>,
        init_error: Option<RenderInitError>,
        exit: Exit,
    }

    impl App {
        fn new(settings: Settings, seed: u64) -> Self {
            let state = GameState::new(seed);
            log::info!("Game initialized with seed: {}", state.seed);
            Self {
                camera: OrbitCamera::new(settings.mouse_sensitivity),
                settings,
                state,
                input: TickInput::default(),
                audio: LogAudio,
                gpu: None,
                last_frame: None,
                shown_score: None,
                init_error: None,
                exit: Exit::Closed,
            }
        }

        fn on_key(&mut self, code: KeyCode, pressed: bool) {
            match code {
                KeyCode::KeyW => self.input.forward = pressed,
                KeyCode::KeyS => self.input.back = pressed,
                KeyCode::KeyA => self.input.left = pressed,
                KeyCode::KeyD => self.input.right = pressed,
                KeyCode::Escape => self.input.quit = pressed,
                _ => {}
            }
        }

        /// One loop iteration: simulate, then draw
        fn frame(&mut self, event_loop: &ActiveEventLoop) {
            let now = Instant::now();
            let dt = self
                .last_frame
                .map(|t| now.duration_since(t).as_secs_f32())
                .unwrap_or(0.0);
            self.last_frame = Some(now);

            match tick(&mut self.state, &self.input, dt, &mut self.audio) {
                TickOutcome::Continue => {}
                TickOutcome::CloseRequested => {
                    log::info!("Close requested");
                    event_loop.exit();
                    return;
                }
                TickOutcome::GameOver { score } => {
                    self.exit = Exit::GameOver { score };
                    event_loop.exit();
                    return;
                }
            }

            let Some(gpu) = self.gpu.as_mut() else {
                return;
            };

            if self.shown_score != Some(self.state.score) {
                gpu.window.set_title(&window_title(self.state.score));
                self.shown_score = Some(self.state.score);
            }

            let scene = build_scene(
                &self.state,
                &self.camera,
                gpu.render_state.aspect(),
                self.settings.effective_fov(),
            );
            match gpu.render_state.render(&scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = gpu.render_state.size;
                    gpu.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory");
                    self.exit = Exit::GpuFailure;
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.gpu.is_some() {
                return;
            }

            match pollster::block_on(init_gpu(event_loop, &self.settings)) {
                Ok(gpu) => {
                    gpu.window.request_redraw();
                    self.gpu = Some(gpu);
                    self.last_frame = None;
                }
                Err(e) => {
                    self.init_error = Some(e);
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
            match event {
                WindowEvent::CloseRequested => event_loop.exit(),
                WindowEvent::Resized(size) => {
                    if let Some(gpu) = self.gpu.as_mut() {
                        gpu.render_state.resize(size.width, size.height);
                    }
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state,
                            ..
                        },
                    ..
                } => self.on_key(code, state == ElementState::Pressed),
                WindowEvent::CursorMoved { position, .. } => {
                    self.camera.on_cursor_moved(position.x);
                }
                WindowEvent::CursorLeft { .. } => self.camera.reset_cursor(),
                WindowEvent::Focused(false) => self.input = TickInput::default(),
                WindowEvent::RedrawRequested => self.frame(event_loop),
                _ => {}
            }
        }

        fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
            if let Some(gpu) = &self.gpu {
                gpu.window.request_redraw();
            }
        }
    }

    async fn init_gpu(
        event_loop: &ActiveEventLoop,
        settings: &Settings,
    ) -> Result<Gpu, RenderInitError> {
        let attributes = Window::default_attributes()
            .with_title(window_title(0))
            .with_inner_size(LogicalSize::new(
                settings.window_width,
                settings.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state =
            RenderState::new(surface, &adapter, size.width, size.height, settings).await?;

        Ok(Gpu {
            window,
            render_state,
        })
    }

    fn window_title(score: u32) -> String {
        format!("BounceBlitz — Points: {}", score)
    }

    fn seed() -> u64 {
        if let Some(seed) = std::env::var(SEED_ENV).ok().and_then(|s| s.parse().ok()) {
            return seed;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> Result<Exit, RenderInitError> {
        log::info!("BounceBlitz starting...");
        let settings = Settings::load();
        let seed = seed();

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(settings, seed);
        event_loop.run_app(&mut app)?;

        match app.init_error {
            Some(e) => Err(e),
            None => Ok(app.exit),
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use bounce_blitz::audio::AudioManager;
    use bounce_blitz::renderer::{RenderState, build_scene, scaled_surface_size};
    use bounce_blitz::sim::{GameState, TickInput, TickOutcome, final_score_message, tick};
    use bounce_blitz::{OrbitCamera, Settings};

    /// Game instance holding all state
    struct Game {
        settings: Settings,
        state: GameState,
        camera: OrbitCamera,
        input: TickInput,
        audio: AudioManager,
        muted: bool,
        render_state: Option<RenderState>,
        last_time: f64,
        shown_score: Option<u32>,
        running: bool,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let state = GameState::new(seed);
            log::info!("Game initialized with seed: {}", state.seed);
            Self {
                state,
                camera: OrbitCamera::new(settings.mouse_sensitivity),
                input: TickInput::default(),
                audio: AudioManager::new(&settings),
                muted: settings.muted,
                render_state: None,
                last_time: 0.0,
                shown_score: None,
                running: true,
                settings,
            }
        }

        fn on_key(&mut self, key: &str, pressed: bool) {
            match key {
                "w" | "W" => self.input.forward = pressed,
                "s" | "S" => self.input.back = pressed,
                "a" | "A" => self.input.left = pressed,
                "d" | "D" => self.input.right = pressed,
                "Escape" => self.input.quit = pressed,
                "m" | "M" if pressed => {
                    self.muted = !self.muted;
                    self.audio.set_muted(self.muted);
                    log::info!("Muted: {}", self.muted);
                }
                _ => {}
            }
        }

        /// Run one simulation step
        fn update(&mut self, dt: f32) {
            match tick(&mut self.state, &self.input, dt, &mut self.audio) {
                TickOutcome::Continue => {}
                TickOutcome::CloseRequested => {
                    log::info!("Close requested");
                    self.running = false;
                }
                TickOutcome::GameOver { score } => {
                    log::info!("{}", final_score_message(score));
                    self.running = false;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let scene = build_scene(
                    &self.state,
                    &self.camera,
                    render_state.aspect(),
                    self.settings.effective_fov(),
                );
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                        self.running = false;
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update the score element in the DOM
        fn update_hud(&mut self) {
            if self.shown_score == Some(self.state.score) {
                return;
            }
            self.shown_score = Some(self.state.score);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("BounceBlitz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let (width, height) = scaled_surface_size(
            canvas.client_width(),
            canvas.client_height(),
            window.device_pixel_ratio(),
        );
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("No suitable GPU adapter: {}", e);
                return;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height, &settings).await {
            Ok(render_state) => render_state,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("BounceBlitz running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().on_key(event.key().as_str(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().on_key(event.key().as_str(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move drives the orbit angle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .camera
                    .on_cursor_moved(event.offset_x() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer left the canvas: next move sets a fresh baseline
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().camera.reset_cursor();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click unlocks audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow().audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize: match the canvas backing store to its CSS size
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (width, height) = scaled_surface_size(
                    canvas.client_width(),
                    canvas.client_height(),
                    window.device_pixel_ratio(),
                );
                canvas.set_width(width);
                canvas.set_height(height);
                if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                    render_state.resize(width, height);
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur drops held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input = TickInput::default();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            if !g.running {
                return;
            }
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bounce_blitz::sim::final_score_message;
    use native_game::Exit;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match native_game::run() {
        Ok(Exit::Closed) => {}
        Ok(Exit::GameOver { score }) => println!("{}", final_score_message(score)),
        Ok(Exit::GpuFailure) => std::process::exit(1),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
