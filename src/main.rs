//! Ridge Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, VisibilityState};

    use ridge_runner::consts::*;
    use ridge_runner::persistence::{self, SaveState};
    use ridge_runner::sim::{GameEvent, GameState, tick};
    use ridge_runner::{Action, FpsMeter, FrameClock, InputState, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: InputState,
        settings: Settings,
        // FPS tracking
        fps: FpsMeter,
        last_frame: Option<f64>,
        /// A frame callback is pending
        loop_active: bool,
    }

    impl Game {
        fn new(state: GameState, settings: Settings) -> Self {
            Self {
                state,
                clock: FrameClock::new(),
                input: InputState::new(),
                settings,
                fps: FpsMeter::new(),
                last_frame: None,
                loop_active: false,
            }
        }

        /// Run the fixed steps owed for this frame
        fn update(&mut self, time: f64) {
            let steps = self.clock.advance_to(time);
            let input = self.input.snapshot();
            for _ in 0..steps {
                tick(&mut self.state, &input, SIM_DT);
            }

            if let Some(last) = self.last_frame {
                let dt = ((time - last) / 1000.0) as f32;
                if let Some(fps) = self.fps.record(dt) {
                    if self.settings.show_fps {
                        set_text("fpsLabel", &format!("{fps} fps"));
                    }
                }
            }
            self.last_frame = Some(time);
        }

        /// Forward queued simulation events to the page
        fn dispatch_events(&mut self) {
            if self.state.pending_events().is_empty() {
                return;
            }
            for event in self.state.drain_events() {
                match event {
                    GameEvent::LevelChanged(index) => {
                        set_text("levelLabel", &format!("Level {index}"));
                    }
                    GameEvent::LevelCompleteStarted if self.state.is_milestone_level() => {
                        log::info!("Milestone level {} cleared", self.state.level_index);
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        fn save_game(&self) {
            if !self.settings.autosave {
                return;
            }
            let save = SaveState::capture(&self.state, js_sys::Date::now());
            if let Err(e) = persistence::write_save(&save) {
                log::warn!("Save failed: {}", e);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn viewport_width() -> Option<f32> {
        let width = web_sys::window()?.inner_width().ok()?.as_f64()?;
        Some(width as f32)
    }

    /// Load the saved run, or start at level 1. A save that fails to load is dropped.
    fn initial_state() -> GameState {
        let mut state = GameState::new(1);
        let restored = persistence::load_save()
            .and_then(|save| save.map(|s| s.restore(&mut state)).transpose());
        match restored {
            Ok(Some(())) => log::info!("Resuming at level {}", state.level_index),
            Ok(None) => {}
            Err(e) => {
                log::warn!("Failed to restore state: {}", e);
                if let Err(e) = persistence::clear_save() {
                    log::warn!("Could not clear bad save: {}", e);
                }
            }
        }
        state
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Ridge Runner starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        if !settings.show_fps {
            set_text("fpsLabel", "");
        }

        let game = Rc::new(RefCell::new(Game::new(initial_state(), settings)));
        if let Some(width) = viewport_width() {
            game.borrow_mut().state.set_viewport_width(width);
        }

        setup_input_handlers(&window, game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_resize(&window, game.clone());
        setup_autosave(&window, &document, game.clone());

        start_loop(&game);

        log::info!("Ridge Runner running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.code()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup never arrives for keys held while focus leaves
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Bind the on-screen buttons. Pages without them just skip this.
    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for action in Action::ALL {
            let Some(button) = document.query_selector(action.button_selector()).ok().flatten()
            else {
                log::debug!("No button for {:?}", action);
                continue;
            };
            for (name, down) in [
                ("touchstart", true),
                ("mousedown", true),
                ("touchend", false),
                ("touchcancel", false),
                ("mouseup", false),
            ] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    // No synthetic mouse events or page scroll from touches
                    event.prevent_default();
                    game.borrow_mut().input.set_action(action, down);
                });
                let _ = button
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Dragging off the button releases it
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release(action);
            });
            let _ = button
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(width) = viewport_width() {
                game.borrow_mut().state.set_viewport_width(width);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_autosave(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize): save and pause the loop
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.save_game();
                    g.clock.stop();
                    g.input.clear();
                    log::info!("Paused (tab hidden)");
                } else {
                    start_loop(&game);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Page hide (navigation, close)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow().save_game();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start the clock and schedule a frame unless one is already pending
    fn start_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.clock.start();
            g.last_frame = None;
            if g.loop_active {
                return;
            }
            g.loop_active = true;
        }
        request_animation_frame(game.clone());
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
        {
            let mut g = game.borrow_mut();
            if !g.clock.is_running() {
                g.loop_active = false;
                return;
            }
            g.update(time);
            g.dispatch_events();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ridge Runner (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let level = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u32>().ok())
        .unwrap_or(1);
    headless::run(level, 10.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use ridge_runner::consts::SIM_DT;
    use ridge_runner::sim::{GameEvent, GameState, TickInput, tick};
    use ridge_runner::{FpsMeter, FrameClock, SaveState};

    /// Simulated display refresh
    const FRAME_DT: f32 = 1.0 / 144.0;

    /// Run right and hop every half second for `seconds` of game time
    pub fn run(level: u32, seconds: f32) {
        let mut state = GameState::new(level);
        let mut clock = FrameClock::new();
        clock.start();
        let mut fps = FpsMeter::new();

        let mut elapsed = 0.0;
        let mut ticks: u64 = 0;
        let (mut jumps, mut steps, mut deaths, mut clears) = (0, 0, 0, 0);

        while elapsed < seconds {
            elapsed += FRAME_DT;
            fps.record(FRAME_DT);
            for _ in 0..clock.advance(FRAME_DT) {
                let input = TickInput {
                    right: true,
                    jump: ticks % 30 < 3,
                    ..Default::default()
                };
                tick(&mut state, &input, SIM_DT);
                ticks += 1;
            }

            for event in state.drain_events() {
                match event {
                    GameEvent::Jump => jumps += 1,
                    GameEvent::Footstep => steps += 1,
                    GameEvent::DeathStarted => deaths += 1,
                    GameEvent::LevelCompleteStarted => clears += 1,
                    GameEvent::LevelChanged(index) => log::info!("Now on level {}", index),
                }
            }
        }

        log::info!(
            "{} ticks ({:?} fps): jumps={} steps={} deaths={} clears={} x={:.1} level {}",
            ticks,
            fps.fps(),
            jumps,
            steps,
            deaths,
            clears,
            state.player.pos.x,
            state.level_index
        );

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        match SaveState::capture(&state, now).to_json() {
            Ok(json) => log::info!("Save snapshot: {}", json),
            Err(e) => log::warn!("Snapshot failed: {}", e),
        }
    }
}
