//! Firework Horse entry point
//!
//! Handles platform-specific initialization and starts the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent, Window};

    use firework_horse::platform::{
        AnimationFrameScheduler, PointerInput, Scene, handle_pointer, start_loop,
    };
    use firework_horse::renderer::CanvasSurface;
    use firework_horse::{Settings, Simulation};

    type SharedScene = Rc<RefCell<Scene<CanvasSurface>>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Firework Horse starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = fit_canvas(&window, &canvas);
        let surface = CanvasSurface::new(&canvas).expect("no 2d context");

        // Write back so the effective settings can be edited in LocalStorage
        let settings = Settings::load();
        settings.save();
        let seed = js_sys::Date::now() as u64;
        log::info!(
            "Seed {}, surface {}x{}, {} quality",
            seed,
            width,
            height,
            settings.quality.as_str()
        );
        let sim = Simulation::new(seed, width, height, settings);

        let scene: SharedScene = Rc::new(RefCell::new(Scene::new(sim, surface)));

        setup_resize(&window, &canvas, scene.clone());
        setup_input_handlers(&window, scene.clone());

        start_loop(scene, Rc::new(AnimationFrameScheduler::new(window)));

        log::info!("Firework Horse running!");
    }

    /// Size the canvas to the viewport; zero if the viewport is unknown
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (f32, f32) {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let width = read(window.inner_width()).max(0.0);
        let height = read(window.inner_height()).max(0.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        (width as f32, height as f32)
    }

    fn setup_resize(window: &Window, canvas: &HtmlCanvasElement, scene: SharedScene) {
        let window_clone = window.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&window_clone, &canvas);
            scene.borrow_mut().sim.resize(width, height);
        });
        if window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for resize");
        }
        closure.forget();
    }

    fn setup_input_handlers(window: &Window, scene: SharedScene) {
        // Mouse down
        {
            let scene = scene.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let input = PointerInput::Down {
                    x: event.client_x() as f32,
                    y: event.client_y() as f32,
                };
                handle_pointer(&mut scene.borrow_mut().sim, &input);
            });
            if window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("Could not listen for mousedown");
            }
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let touches = event.touches();
                let points = (0..touches.length())
                    .filter_map(|i| touches.get(i))
                    .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
                    .collect();
                handle_pointer(&mut scene.borrow_mut().sim, &PointerInput::TouchStart(points));
            });
            if window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("Could not listen for touchstart");
            }
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    // firework-horse [frames] [settings.json] [--quality low|medium|high]
    let mut positional = Vec::new();
    let mut quality = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--quality" {
            match args.next().as_deref().and_then(firework_horse::QualityPreset::from_str) {
                Some(preset) => quality = Some(preset),
                None => log::warn!("--quality expects low, medium or high"),
            }
        } else {
            positional.push(arg);
        }
    }

    let frames = positional
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(600);
    let mut settings = match positional.get(1) {
        Some(path) => headless::load_settings(path),
        None => firework_horse::Settings::default(),
    };
    if let Some(preset) = quality {
        settings.quality = preset;
    }

    log::info!("Firework Horse (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to see it in a browser");

    headless::run(frames, settings);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use firework_horse::platform::{ManualScheduler, PointerInput, Scene, handle_pointer, start_loop};
    use firework_horse::renderer::RecordingSurface;
    use firework_horse::{Settings, Simulation};

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Simulated click every half second
    const CLICK_EVERY: u64 = 30;

    pub fn load_settings(path: &str) -> Settings {
        match std::fs::read_to_string(path) {
            Ok(json) => match Settings::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path, e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path, e);
                Settings::default()
            }
        }
    }

    pub fn run(frames: u64, settings: Settings) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        log::info!(
            "Seed {}, surface {}x{}, {} frames, {} quality",
            seed,
            WIDTH,
            HEIGHT,
            frames,
            settings.quality.as_str()
        );

        let sim = Simulation::new(seed, WIDTH, HEIGHT, settings);
        let scene = Rc::new(RefCell::new(Scene::new(sim, RecordingSurface::new())));
        let scheduler = Rc::new(ManualScheduler::new());
        start_loop(Rc::clone(&scene), Rc::clone(&scheduler));

        let mut peak_particles = 0;
        let mut peak_calls = 0;
        for frame in 0..frames {
            if frame % CLICK_EVERY == 0 {
                let column = (frame / CLICK_EVERY % 5 + 1) as f32;
                let click = PointerInput::Down {
                    x: WIDTH * column / 6.0,
                    y: HEIGHT * 0.2,
                };
                handle_pointer(&mut scene.borrow_mut().sim, &click);
            }

            scene.borrow_mut().surface.clear();
            scheduler.fire(frame as f64 * FRAME_MS);

            let scene = scene.borrow();
            peak_particles = peak_particles.max(scene.sim.particles.len());
            peak_calls = peak_calls.max(scene.surface.calls.len());
            if frame % 60 == 0 {
                log::info!(
                    "frame {}: {} rockets, {} sparks, {} draw calls",
                    frame,
                    scene.sim.projectiles.len(),
                    scene.sim.particles.len(),
                    scene.surface.calls.len()
                );
            }
        }

        let scene = scene.borrow();
        log::info!(
            "Done after {} frames: horse on lap {}, peak {} sparks, peak {} draw calls, {} events",
            scene.frames,
            scene.sim.mover.laps,
            peak_particles,
            peak_calls,
            scene.reported
        );
    }
}
