//! Rune Raid entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use rune_raid::audio::{AudioManager, SoundEffect};
    use rune_raid::consts::*;
    use rune_raid::highscores::{HallEntry, HighScores};
    use rune_raid::input::{Key, KeySet};
    use rune_raid::levels::LevelTable;
    use rune_raid::renderer::canvas::CanvasRenderer;
    use rune_raid::settings::Settings;
    use rune_raid::sim::{
        GameEvent, GamePhase, GameState, Hud, Presenter, RenderFrame, Session, ShopItem,
        TickInput, dispatch, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keys: KeySet,
        /// One-shot fire, cleared after each tick
        fire: bool,
        settings: Settings,
        hall: HighScores,
        audio: AudioManager,
        renderer: CanvasRenderer,
        /// A requestAnimationFrame callback is pending
        looping: bool,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            let settings = Settings::load();
            let state = GameState::new(seed, settings.ruleset.ruleset(), LevelTable::default());
            Self {
                state,
                keys: KeySet::empty(),
                fire: false,
                audio: AudioManager::new(&settings),
                renderer: CanvasRenderer::new(ctx, settings.reduced_flashing),
                hall: HighScores::load(),
                settings,
                looping: false,
            }
        }

        /// Advance one tick, draw it, and route the resulting events
        fn step(&mut self, time: f64) -> RenderFrame {
            let input = TickInput {
                keys: self.keys,
                fire: self.fire,
                clock_ms: time,
            };
            self.fire = false;

            let frame = tick(&mut self.state, &input);
            self.renderer.draw(&frame);

            let events = self.state.drain_events();
            if !events.is_empty() {
                if let Some(document) = current_document() {
                    let mut presenter = DomPresenter {
                        document: &document,
                        session: self.state.session.clone(),
                        audio: &self.audio,
                        renderer: &mut self.renderer,
                        hall: &mut self.hall,
                    };
                    dispatch(&events, &mut presenter);
                }
            }
            frame
        }

        /// Persist changed settings and push them into audio, renderer and,
        /// while still on the menu, the ruleset of the pending run
        fn apply_settings(&mut self) {
            self.settings.save();
            self.audio.apply_settings(&self.settings);
            self.renderer
                .set_reduced_flashing(self.settings.reduced_flashing);

            let rules = self.settings.ruleset.ruleset();
            if self.state.phase == GamePhase::Menu && self.state.rules != rules {
                let seed = self.state.seed;
                self.state = GameState::new(seed, rules, self.state.levels.clone());
                let frame = self.state.render_frame();
                self.renderer.draw(&frame);
                log::info!("Ruleset switched to {}", self.settings.ruleset.as_str());
            }
            if let Some(doc) = current_document() {
                render_settings(&doc, &self.settings);
            }
        }

        /// Throw the run away and start over with a fresh seed
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let rules = self.settings.ruleset.ruleset();
            self.state = GameState::new(seed, rules, self.state.levels.clone());
            self.state.start();
            self.state.drain_events();
            self.keys.clear();
            self.fire = false;
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    /// Screen switching and sound for drained events
    struct DomPresenter<'a> {
        document: &'a Document,
        session: Session,
        audio: &'a AudioManager,
        renderer: &'a mut CanvasRenderer,
        hall: &'a mut HighScores,
    }

    impl DomPresenter<'_> {
        fn record_run(&mut self, won: bool) {
            let entry = HallEntry {
                runes: self.session.runes,
                score: self.session.score,
                zone: self.session.level_index as u32 + 1,
                won,
                timestamp: js_sys::Date::now(),
            };
            if let Some(rank) = self.hall.add_run(entry) {
                log::info!("Hall of Runes rank {}", rank);
                self.hall.save();
            }
            render_hall(self.document, self.hall);
        }
    }

    impl Presenter for DomPresenter<'_> {
        fn on_game_over(&mut self) {
            set_text(self.document, "final-runes", &self.session.runes.to_string());
            set_text(
                self.document,
                "final-zone",
                &(self.session.level_index + 1).to_string(),
            );
            show(self.document, "game-over");
            self.record_run(false);
        }

        fn on_level_cleared(&mut self, next_level: usize) {
            set_text(self.document, "shop-runes", &self.session.runes.to_string());
            set_text(self.document, "shop-next", &(next_level + 1).to_string());
            set_text(self.document, "shop-message", "");
            show(self.document, "shop");
        }

        fn on_win(&mut self, total_runes: u64) {
            set_text(self.document, "win-runes", &total_runes.to_string());
            show(self.document, "win");
            self.record_run(true);
        }

        fn on_event(&mut self, event: &GameEvent) {
            if matches!(event, GameEvent::PlayerHurt { .. }) {
                self.renderer.flash_hurt();
            }
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
        }
    }

    fn current_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn show(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn render_settings(document: &Document, settings: &Settings) {
        let (mode, sound, flashing) = settings.labels();
        set_text(document, "ruleset-btn", &mode);
        set_text(document, "mute-btn", sound);
        set_text(document, "flash-btn", flashing);
    }

    fn render_hall(document: &Document, hall: &HighScores) {
        let text = hall
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let crown = if e.won { " *" } else { "" };
                format!("{}. {} runes (zone {}){}", i + 1, e.runes, e.zone, crown)
            })
            .collect::<Vec<_>>()
            .join("\n");
        set_text(document, "hall", &text);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Rune Raid starting...");

        let Some(document) = current_document() else {
            web_sys::console::error_1(&"no document".into());
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            let frame = g.state.render_frame();
            g.renderer.draw(&frame);
            render_hall(&document, &g.hall);
            render_settings(&document, &g.settings);
        }
        hide(&document, "loading");
        show(&document, "menu");

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game);

        log::info!("Rune Raid ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Key down: held keys go in the set, fire is one-shot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Some(key) = g.settings.bindings.lookup(&event.key()) else {
                    return;
                };
                event.prevent_default();
                match key {
                    Key::Fire => {
                        if !event.repeat() {
                            g.fire = true;
                        }
                    }
                    _ => g.keys.press(key),
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
                let mut g = game.borrow_mut();
                if let Some(key) = g.settings.bindings.lookup(&event.key()) {
                    g.keys.release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: drop held keys so nothing sticks
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click on the canvas fires
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.fire = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire a click handler to the element with `id`
    fn on_click(document: &Document, id: &str, handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} button", id);
            return;
        };
        let mut handler = handler;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start
        {
            let game = game.clone();
            on_click(document, "start-btn", move || {
                {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.state.start();
                    g.state.drain_events();
                }
                if let Some(doc) = current_document() {
                    hide(&doc, "menu");
                    show(&doc, "hud");
                }
                ensure_loop(game.clone());
            });
        }

        // Menu settings, persisted on every change
        let toggles: [(&str, fn(&mut Settings)); 3] = [
            ("ruleset-btn", |s| {
                s.cycle_ruleset();
            }),
            ("mute-btn", |s| {
                s.toggle_mute();
            }),
            ("flash-btn", |s| {
                s.toggle_reduced_flashing();
            }),
        ];
        for (id, toggle) in toggles {
            let game = game.clone();
            on_click(document, id, move || {
                let mut g = game.borrow_mut();
                toggle(&mut g.settings);
                g.apply_settings();
            });
        }

        // Restart from game over and from the win screen
        for (id, screen) in [("restart-btn", "game-over"), ("restart-win-btn", "win")] {
            let game = game.clone();
            on_click(document, id, move || {
                game.borrow_mut().restart();
                if let Some(doc) = current_document() {
                    hide(&doc, screen);
                }
                ensure_loop(game.clone());
            });
        }

        // Shop
        for (id, item) in [
            ("buy-life-btn", ShopItem::ExtraLife),
            ("buy-shield-btn", ShopItem::Shield),
            ("buy-sword-btn", ShopItem::Sword),
        ] {
            let game = game.clone();
            on_click(document, id, move || {
                let mut g = game.borrow_mut();
                let result = g.state.purchase(item);
                let events = g.state.drain_events();
                for event in &events {
                    if let Some(effect) = SoundEffect::for_event(event) {
                        g.audio.play(effect);
                    }
                }
                update_hud(&g.state.render_frame().hud);
                let Some(doc) = current_document() else { return };
                match result {
                    Ok(runes) => {
                        set_text(&doc, "shop-runes", &runes.to_string());
                        set_text(&doc, "shop-message", &format!("Bought {}", item.as_str()));
                    }
                    Err(e) => set_text(&doc, "shop-message", &e.to_string()),
                }
            });
        }

        {
            let game = game.clone();
            on_click(document, "continue-btn", move || {
                {
                    let mut g = game.borrow_mut();
                    g.state.continue_run();
                    g.state.drain_events();
                }
                if let Some(doc) = current_document() {
                    hide(&doc, "shop");
                }
                ensure_loop(game.clone());
            });
        }
    }

    /// Start the frame loop unless one is already pending
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.looping || !g.state.phase.wants_frames() {
                return;
            }
            g.looping = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let frame = g.step(time);
            update_hud(&frame.hud);
            let keep_going = g.state.phase.wants_frames();
            if !keep_going {
                g.looping = false;
            }
            keep_going
        };

        // Shop and end screens stop the loop; their buttons restart it
        if keep_going {
            request_animation_frame(game);
        }
    }

    /// Mirror the HUD into DOM elements for screen readers
    fn update_hud(hud: &Hud) {
        let Some(document) = current_document() else { return };
        set_text(&document, "hud-lives", &hud.lives.to_string());
        set_text(&document, "hud-runes", &hud.runes.to_string());
        set_text(&document, "hud-zone", &hud.zone);
        if hud.phase == GamePhase::Menu {
            hide(&document, "hud");
        }
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

/// Headless autoplay: a seeded run driven by a simple bot, logging events
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rune_raid::input::{Key, KeySet};
    use rune_raid::levels::LevelTable;
    use rune_raid::rules::RulesetKind;
    use rune_raid::sim::{GameEvent, GameState, Presenter, ShopItem, TickInput, dispatch, tick};

    struct LogPresenter {
        kills: u32,
    }

    impl Presenter for LogPresenter {
        fn on_game_over(&mut self) {
            log::info!("Game over after {} kills", self.kills);
        }
        fn on_level_cleared(&mut self, next_level: usize) {
            log::info!("Shop open before zone {}", next_level + 1);
        }
        fn on_win(&mut self, total_runes: u64) {
            log::info!("Won with {} runes", total_runes);
        }
        fn on_event(&mut self, event: &GameEvent) {
            if matches!(event, GameEvent::EnemySlain) {
                self.kills += 1;
            }
            log::debug!("{:?}", event);
        }
    }

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let kind = args
        .next()
        .and_then(|s| RulesetKind::from_str(&s))
        .unwrap_or_default();
    log::info!("Rune Raid (native) headless run, seed {} ruleset {}", seed, kind.as_str());

    let mut state = GameState::new(seed, kind.ruleset(), LevelTable::default());
    state.start();
    let mut presenter = LogPresenter { kills: 0 };

    const MAX_TICKS: u64 = 100_000;
    let mut ticks = 0;
    while ticks < MAX_TICKS && !state.phase.is_terminal() {
        if state.phase == rune_raid::sim::GamePhase::Shop {
            for item in ShopItem::ALL {
                if let Err(e) = state.purchase(item) {
                    log::debug!("Skipped {}: {}", item.as_str(), e);
                }
            }
            state.continue_run();
        }

        // Sweep left and right while swinging and shooting
        let heading = if (ticks / 90) % 2 == 0 { Key::Right } else { Key::Left };
        let mut keys = KeySet::empty().with(heading).with(Key::Attack);
        if ticks % 45 == 0 {
            keys.press(Key::Jump);
        }
        let input = TickInput {
            keys,
            fire: ticks % 20 == 0,
            clock_ms: ticks as f64 * 1000.0 / 60.0,
        };
        tick(&mut state, &input);
        dispatch(&state.drain_events(), &mut presenter);
        ticks += 1;
    }

    println!(
        "phase {:?} zone {} runes {} score {} kills {} ticks {}",
        state.phase,
        state.session.level_index + 1,
        state.session.runes,
        state.session.score,
        presenter.kills,
        ticks
    );
}
