//! Mathfall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use mathfall::Session;
    use mathfall::consts::*;
    use mathfall::platform::web::{DomBanner, DomPrompt};
    use mathfall::renderer::{CanvasSurface, draw_frame};
    use mathfall::session::FpsMeter;
    use mathfall::settings::Settings;
    use mathfall::sim::GamePhase;

    /// Game instance holding all state
    struct Game {
        session: Session<DomPrompt, DomBanner>,
        surface: CanvasSurface,
        last_time: f64,
        fps: FpsMeter,
    }

    impl Game {
        fn update(&mut self, dt: f32, time: f64) {
            self.session.update(dt);
            self.fps.record(time);
        }

        fn render(&mut self) {
            draw_frame(&self.session.state, &mut self.surface);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let state = &self.session.state;

            set_text(document, "#hud-score .hud-value", &state.progress.score.to_string());
            set_text(document, "#hud-level .hud-value", &state.progress.level.to_string());
            set_text(document, "#hud-health .hud-value", &state.player.health.to_string());
            set_text(document, "#hud-fps .hud-value", &self.fps.fps().to_string());

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&state.progress.score.to_string()));
                    }
                    if let Some(level_el) = document.get_element_by_id("final-level") {
                        level_el.set_text_content(Some(&state.progress.level.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Persist new preferences and apply them to the running game
        fn change_settings(&mut self, change: impl FnOnce(&mut Settings)) {
            let mut settings = self.session.state.settings.clone();
            change(&mut settings);
            settings.save();
            log::info!(
                "Effects {} at {} quality",
                if settings.effects { "on" } else { "off" },
                settings.quality.as_str()
            );
            self.session.state.apply_settings(settings);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Mathfall starting...");

        let document = document()?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#canvas is not a canvas"))?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, settings, DomPrompt::new()?, DomBanner::new()?);

        let mut surface = CanvasSurface::new(canvas)?;
        surface.resize(session.state.bounds);

        let game = Rc::new(RefCell::new(Game {
            session,
            surface,
            last_time: 0.0,
            fps: FpsMeter::default(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone())?;
        setup_restart_button(&document, game.clone());
        setup_auto_pause(&document, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Mathfall running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Key down: steering plus a few commands. The answer input stops
        // propagation, so typing an answer never lands here.
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.session.key_event(&key, true) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "Escape" | "p" | "P" => g.session.request_pause(),
                    "Enter" if g.session.state.phase == GamePhase::GameOver => {
                        g.session.request_restart(js_sys::Date::now() as u64);
                    }
                    "e" | "E" => g.change_settings(|s| s.effects = !s.effects),
                    "q" | "Q" => g.change_settings(|s| s.quality = s.quality.next()),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().session.key_event(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; game loop stopped");
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Ok(document) = document() {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().session.request_restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().session.auto_pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().session.auto_pause();
                log::info!("Auto-paused (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mathfall (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);

    let mut settings = mathfall::Settings::load();
    if let Some(arg) = args.next() {
        match mathfall::QualityPreset::from_str(&arg) {
            Some(quality) => settings.quality = quality,
            None => log::warn!("Unknown quality '{}', using {}", arg, settings.quality.as_str()),
        }
    }

    headless_demo(seed, seconds, settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot chases the enemy and answers every fourth question wrong
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(seed: u64, seconds: u32, settings: mathfall::Settings) {
    use mathfall::consts::SIM_DT;
    use mathfall::platform::PromptRequest;
    use mathfall::platform::headless::{LogNotifier, ScriptedPrompt, autopilot, solve_question};
    use mathfall::sim::{GamePhase, Response};
    use mathfall::Session;

    let mut asked = 0u32;
    let solver = move |req: &PromptRequest| {
        asked += 1;
        match solve_question(&req.question) {
            Some(n) if asked % 4 != 0 => Response::Text(n.to_string()),
            Some(n) => Response::Text((n + 1).to_string()),
            None => Response::Dismissed,
        }
    };

    // About a third of a second to "type" each answer
    let prompt = ScriptedPrompt::new(20, solver);
    let mut session = Session::new(seed, settings, prompt, LogNotifier::default());

    let frames = seconds * 60;
    for _ in 0..frames {
        session.input.keys = autopilot(&session.state);
        session.update(SIM_DT);
        if session.state.phase == GamePhase::GameOver {
            break;
        }
    }

    let state = &session.state;
    log::info!(
        "Demo finished after {} ticks at {} quality: score {}, level {}, health {}, {} challenges",
        state.time_ticks,
        state.settings.quality.as_str(),
        state.progress.score,
        state.progress.level,
        state.player.health,
        state.challenges
    );
}
