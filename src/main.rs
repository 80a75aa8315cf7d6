//! World Swipe entry point
//!
//! Browser builds wire the DOM to the game loop. Native builds run a headless
//! trip with the autopilot at the controls and log how it went.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, MouseEvent, TouchEvent};

    use world_swipe::audio::AudioManager;
    use world_swipe::gesture::{GestureTracker, to_field};
    use world_swipe::renderer::CanvasRenderer;
    use world_swipe::sim::{Command, GameEvent, GamePhase};
    use world_swipe::sink::{FeedbackSink, HudSink, HudState, PresentationSink, Snapshot, ToastSink};
    use world_swipe::{Game, Settings};

    /// How long a toast stays up (milliseconds)
    const TOAST_MS: f64 = 1400.0;

    fn element(id: &str) -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    /// DOM + canvas + audio frontend
    struct Browser {
        renderer: CanvasRenderer,
        audio: AudioManager,
        city: Option<Element>,
        score: Option<Element>,
        lives: Option<Element>,
        toast: Option<Element>,
        overlay: Option<Element>,
        title: Option<Element>,
        subtitle: Option<Element>,
        start_btn: Option<Element>,
        mute_btn: Option<Element>,
        toast_until: f64,
        now: f64,
        overlay_shown: Option<bool>,
    }

    impl Browser {
        fn new(renderer: CanvasRenderer, audio: AudioManager) -> Self {
            Self {
                renderer,
                audio,
                city: element("city"),
                score: element("score"),
                lives: element("lives"),
                toast: element("toast"),
                overlay: element("overlay"),
                title: element("title"),
                subtitle: element("subtitle"),
                start_btn: element("startBtn"),
                mute_btn: element("muteBtn"),
                toast_until: 0.0,
                now: 0.0,
                overlay_shown: None,
            }
        }

        /// Clear an expired toast
        fn expire_toast(&mut self) {
            if self.toast_until > 0.0 && self.now >= self.toast_until {
                if let Some(el) = &self.toast {
                    el.set_inner_html("");
                }
                self.toast_until = 0.0;
            }
        }
    }

    fn set_text(el: &Option<Element>, text: &str) {
        if let Some(el) = el {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl PresentationSink for Browser {
        fn present(&mut self, snapshot: &Snapshot) {
            self.renderer.present(snapshot);

            let show = snapshot.overlay.is_some();
            if self.overlay_shown == Some(show) {
                return;
            }
            self.overlay_shown = Some(show);
            if let Some(el) = &self.overlay {
                let classes = el.class_list();
                if show {
                    let _ = classes.add_1("show");
                } else {
                    let _ = classes.remove_1("show");
                }
            }
            if let Some(card) = &snapshot.overlay {
                set_text(&self.title, &card.title);
                set_text(&self.subtitle, &card.subtitle);
                set_text(&self.start_btn, &card.button);
            }
        }
    }

    impl FeedbackSink for Browser {
        fn on_event(&mut self, event: &GameEvent) {
            self.audio.on_event(event);
            self.renderer.on_event(event);
        }
    }

    impl ToastSink for Browser {
        fn show(&mut self, message: &str) {
            if let Some(el) = &self.toast {
                el.set_text_content(None);
                if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                    if let Ok(div) = doc.create_element("div") {
                        div.set_class_name("show");
                        div.set_text_content(Some(message));
                        let _ = el.append_child(&div);
                    }
                }
            }
            self.toast_until = self.now + TOAST_MS;
        }
    }

    impl HudSink for Browser {
        fn update(&mut self, hud: &HudState) {
            set_text(&self.city, &hud.stop_name);
            set_text(&self.score, &hud.score.to_string());
            set_text(&self.lives, &hud.lives.to_string());
            set_text(&self.mute_btn, hud.sound_label());
        }
    }

    struct App {
        game: Game,
        frontend: Browser,
        gestures: GestureTracker,
        last_time: f64,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("World Swipe starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut settings = Settings::default();
        settings.game.seed = js_sys::Date::now() as u64;
        let game = Game::from_settings(&settings).expect("default settings are valid");
        let renderer =
            CanvasRenderer::new(&canvas, settings.game.seed).expect("canvas 2d context");
        let audio = AudioManager::from_settings(&settings);

        log::info!("Game initialized with seed: {}", settings.game.seed);

        let app = Rc::new(RefCell::new(App {
            game,
            frontend: Browser::new(renderer, audio),
            gestures: GestureTracker::new(),
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(app.clone());
        request_animation_frame(app);

        log::info!("World Swipe running!");
    }

    /// Client point of a mouse or touch event in playfield coordinates
    fn field_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        to_field(
            Vec2::new(client_x as f32, client_y as f32),
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
        )
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn finish_gesture(app: &Rc<RefCell<App>>, pos: Vec2) {
        let mut a = app.borrow_mut();
        if let Some(command) = a.gestures.end(pos, now_ms()) {
            a.game.push(command);
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Touch start
        {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = field_point(&target, touch.client_x(), touch.client_y());
                    app.borrow_mut().gestures.begin(pos, now_ms());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move: keep the page from scrolling
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let pos = field_point(&target, touch.client_x(), touch.client_y());
                    finish_gesture(&app, pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down (desktop testing)
        {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = field_point(&target, event.client_x(), event.client_y());
                app.borrow_mut().gestures.begin(pos, now_ms());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up anywhere in the window
        {
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if !app.borrow().gestures.is_active() {
                    return;
                }
                let pos = field_point(&target, event.client_x(), event.client_y());
                finish_gesture(&app, pos);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        if let Some(btn) = element("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                // Browsers only allow audio after a user gesture
                a.frontend.audio.resume();
                let command = if a.game.phase() == GamePhase::Idle {
                    Command::Start
                } else {
                    Command::Restart
                };
                a.game.push(command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = element("muteBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.frontend.audio.resume();
                a.game.push(Command::ToggleMute);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App {
                game,
                frontend,
                last_time,
                ..
            } = &mut *a;

            // The game clamps long frames itself
            let dt = if *last_time > 0.0 {
                ((time - *last_time) / 1000.0) as f32
            } else {
                0.0
            };
            *last_time = time;

            frontend.now = time;
            frontend.renderer.advance(dt.min(game.config().max_frame_dt));
            game.frame(dt, frontend);
            frontend.expire_toast();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use world_swipe::audio::AudioManager;
    use world_swipe::sim::{GameEvent, GamePhase, autopilot};
    use world_swipe::sink::{
        FeedbackSink, HudSink, HudState, LogFrontend, PresentationSink, Snapshot, ToastSink,
    };
    use world_swipe::{Game, Settings};

    /// Simulated display rate
    const FRAME_DT: f32 = 1.0 / 60.0;

    /// Headless autopilot run of World Swipe
    #[derive(Debug, Parser)]
    #[command(name = "world-swipe", version, about)]
    pub struct Args {
        /// Settings JSON file (defaults apply when omitted)
        pub settings: Option<PathBuf>,

        /// Override the configured RNG seed
        #[arg(long)]
        pub seed: Option<u64>,
    }

    /// Log output plus the (silent) tone player
    struct Headless {
        log: LogFrontend,
        audio: AudioManager,
    }

    impl PresentationSink for Headless {
        fn present(&mut self, snapshot: &Snapshot) {
            self.log.present(snapshot);
        }
    }

    impl FeedbackSink for Headless {
        fn on_event(&mut self, event: &GameEvent) {
            self.log.on_event(event);
            self.audio.on_event(event);
        }
    }

    impl ToastSink for Headless {
        fn show(&mut self, message: &str) {
            self.log.show(message);
        }
    }

    impl HudSink for Headless {
        fn update(&mut self, hud: &HudState) {
            self.log.update(hud);
        }
    }

    pub fn run(args: Args) -> Result<(), String> {
        let mut settings = match &args.settings {
            Some(path) => Settings::load(path).map_err(|e| e.to_string())?,
            None => Settings::default(),
        };
        if let Some(seed) = args.seed {
            settings.game.seed = seed;
        }

        let mut game = Game::from_settings(&settings).map_err(|e| e.to_string())?;
        let mut frontend = Headless {
            log: LogFrontend::new(),
            audio: AudioManager::from_settings(&settings),
        };

        // Longest possible trip plus slack
        let trip_secs: f32 = settings.game.stops.iter().map(|s| s.duration).sum();
        let max_frames = (trip_secs / FRAME_DT) as u64 + 600;

        game.push(world_swipe::sim::Command::Start);
        let mut phase = GamePhase::Idle;
        for _ in 0..max_frames {
            if phase.is_running() {
                if let Some(command) = autopilot::suggest(game.state()) {
                    game.push(command);
                }
            }
            phase = game.frame(FRAME_DT, &mut frontend);
            if matches!(phase, GamePhase::GameOver | GamePhase::Victory) {
                break;
            }
        }

        let state = game.state();
        log::info!(
            "{:?} after {:.1}s: score {}, reached stop {}/{} ({}), {} lives, {} tokens, {} frames, {} tones",
            phase,
            state.time,
            state.display_score(),
            state.level.index() + 1,
            state.level.len(),
            state.level.current().name,
            state.lives,
            state.player.tokens,
            frontend.log.frames(),
            frontend.audio.played()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::try_parse_from(["world-swipe"]).unwrap();
            assert!(args.settings.is_none());
            assert!(args.seed.is_none());
        }

        #[test]
        fn test_args_settings_and_seed() {
            let args =
                Args::try_parse_from(["world-swipe", "trip.json", "--seed", "42"]).unwrap();
            assert_eq!(args.settings, Some(PathBuf::from("trip.json")));
            assert_eq!(args.seed, Some(42));

            let args = Args::try_parse_from(["world-swipe", "--seed=5"]).unwrap();
            assert_eq!(args.seed, Some(5));
        }

        #[test]
        fn test_args_rejects_bad_input() {
            assert!(Args::try_parse_from(["world-swipe", "--seed", "abc"]).is_err());
            assert!(Args::try_parse_from(["world-swipe", "--speed", "3"]).is_err());
            assert!(Args::try_parse_from(["world-swipe", "--seed"]).is_err());
        }

        #[test]
        fn test_run_reaches_an_end_state() {
            let args = Args::try_parse_from(["world-swipe", "--seed", "7"]).unwrap();
            assert!(run(args).is_ok());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    let args = headless::Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("World Swipe (native) starting headless autopilot run...");

    match headless::run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
