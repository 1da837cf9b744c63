//! Astro Drift entry point
//!
//! Browser builds wire DOM input and audio to the simulation and hand each
//! frame to the page's renderer. Native builds run a scripted headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use astro_drift::audio::AudioManager;
    use astro_drift::consts::REFERENCE_FPS;
    use astro_drift::sim::{GamePhase, GameState, Presenter, Sound, TickInput, tick};
    use astro_drift::Tuning;

    // Rendering lives on the page; it receives one JSON frame per tick
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (typeof window.renderAstroFrame === 'function') {
                window.renderAstroFrame(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
    }

    /// Audio and DOM panels driven by simulation events
    struct WebPresenter {
        document: Document,
        audio: AudioManager,
    }

    impl WebPresenter {
        fn new(document: Document) -> Self {
            Self {
                document,
                audio: AudioManager::new(),
            }
        }

        fn set_panel(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    impl Presenter for WebPresenter {
        fn play_sound(&mut self, sound: Sound) {
            self.audio.play(sound);
        }

        fn show_end_screen(&mut self, score: &str) {
            if let Some(el) = self.document.get_element_by_id("final-score") {
                el.set_text_content(Some(score));
            }
            self.set_panel("game-over", true);
            self.audio.play_game_over();
        }

        fn set_intro_visible(&mut self, visible: bool) {
            self.set_panel("intro", visible);
        }

        fn set_restart_visible(&mut self, visible: bool) {
            self.set_panel("restart", visible);
            if !visible {
                self.set_panel("game-over", false);
            }
        }

        fn set_pause_visible(&mut self, visible: bool) {
            self.set_panel("pause-menu", visible);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        presenter: WebPresenter,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, presenter: WebPresenter) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                input: TickInput::default(),
                presenter,
                last_time: 0.0,
            }
        }

        /// Advance one frame, then flush events and the frame snapshot
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                1.0 / REFERENCE_FPS
            };
            self.last_time = time;

            tick(&mut self.state, &self.input, dt);
            self.input.clear_commands();
            self.state.present(&mut self.presenter);

            match self.state.snapshot().to_json() {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Failed to serialize frame: {}", e),
            }
        }
    }

    /// Read overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(text) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&text) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning block: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Astro Drift starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let presenter = WebPresenter::new(document.clone());
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, presenter)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&document, game.clone());

        request_animation_frame(game);

        log::info!("Astro Drift running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - cursor normalized to [-1, 1] around the canvas center
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let w = rect.width() as f32;
                let h = rect.height() as f32;
                let x = (event.client_x() as f32 - rect.left() as f32) / w * 2.0 - 1.0;
                // Screen Y grows downward
                let y = 1.0 - (event.client_y() as f32 - rect.top() as f32) / h * 2.0;
                game.borrow_mut().input.cursor = Some(glam::Vec2::new(x, y));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.presenter.audio.resume();
                g.input.fire = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                " " => {
                    event.prevent_default();
                    g.input.fire = true;
                }
                "p" | "P" | "Escape" => g.input.pause = true,
                "m" | "M" => {
                    let muted = !g.presenter.audio.is_muted();
                    g.presenter.audio.set_muted(muted);
                    log::info!("Muted: {}", muted);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-button") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.presenter.audio.resume();
                g.input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.reset = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase() == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            if g.state.phase() == GamePhase::Playing {
                g.input.pause = true;
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use astro_drift::Tuning;
    use astro_drift::consts::REFERENCE_FPS;
    use astro_drift::sim::{GamePhase, GameState, LogPresenter, TickInput, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Astro Drift (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| Tuning::from_json(&text).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    const MAX_FRAMES: u64 = 60 * 120;
    const FIRE_EVERY: u64 = 15;
    let dt = 1.0 / REFERENCE_FPS;

    let mut state = GameState::with_tuning(seed, tuning);
    let mut presenter = LogPresenter;
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    for frame in 0..MAX_FRAMES {
        // Slow weave left and right while climbing and diving
        let t = frame as f32 * dt;
        input.cursor = Some(glam::Vec2::new((t * 0.7).sin(), (t * 0.3).sin() * 0.5));
        input.fire = frame % FIRE_EVERY == 0;

        tick(&mut state, &input, dt);
        input.clear_commands();
        state.present(&mut presenter);

        if state.phase() == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Session finished after {} frames: {} ({} asteroids, {} projectiles in flight)",
        state.frame,
        state
            .session
            .score_text()
            .unwrap_or_else(|| format!("still flying at {:.2}s", state.session.elapsed())),
        state.store.asteroid_count(),
        state.store.projectile_count(),
    );
}
