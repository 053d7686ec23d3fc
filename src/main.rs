//! Watchout entry point
//!
//! Native builds run a headless session on the virtual clock and print the
//! final statistics. The web build mounts an SVG board and drives the session
//! from `requestAnimationFrame`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, PointerEvent};

    use watchout::{Display, GameOptions, GameSession, VisualMode};

    const SVG_NS: &str = "http://www.w3.org/2000/svg";
    const PLAYER_PATH: &str = "m-7.5,1.62413c0,-5.04095 4.08318,-9.12413 9.12414,-9.12413c5.04096,0 9.70345,5.53145 11.87586,9.12413c-2.02759,2.72372 -6.8349,9.12415 -11.87586,9.12415c-5.04096,0 -9.12414,-4.08318 -9.12414,-9.12415z";
    const PLAYER_FILL: &str = "#ff6600";

    /// Renders display commands straight into the SVG board
    struct SvgDisplay {
        document: Document,
        board: Element,
        player: Element,
        enemies: HashMap<u32, Element>,
    }

    impl SvgDisplay {
        fn mount(document: Document, options: &GameOptions) -> Result<Self, JsValue> {
            let host = document
                .query_selector(".board")?
                .ok_or_else(|| JsValue::from_str("missing .board element"))?;

            let board = document.create_element_ns(Some(SVG_NS), "svg")?;
            board.set_attribute("width", &options.width.to_string())?;
            board.set_attribute("height", &options.height.to_string())?;
            host.append_child(&board)?;

            let player = document.create_element_ns(Some(SVG_NS), "path")?;
            player.set_attribute("d", PLAYER_PATH)?;
            player.set_attribute("fill", PLAYER_FILL)?;
            board.append_child(&player)?;

            Ok(Self {
                document,
                board,
                player,
                enemies: HashMap::new(),
            })
        }

        fn set_text(&self, selector: &str, value: u64) {
            if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                el.set_text_content(Some(&value.to_string()));
            }
        }

        fn set_enemy_attr(&self, id: u32, name: &str, value: f32) {
            if let Some(el) = self.enemies.get(&id) {
                let _ = el.set_attribute(name, &value.to_string());
            }
        }
    }

    impl Display for SvgDisplay {
        fn create_or_update_enemy(&mut self, id: u32, position: Vec2, radius: f32) {
            if !self.enemies.contains_key(&id) {
                let Ok(circle) = self.document.create_element_ns(Some(SVG_NS), "circle") else {
                    log::error!("Failed to create enemy {}", id);
                    return;
                };
                let _ = circle.set_attribute("class", "enemy");
                let _ = self.board.append_child(&circle);
                self.enemies.insert(id, circle);
            }
            self.set_enemy_position(id, position);
            self.set_enemy_radius(id, radius);
        }

        fn remove_enemy(&mut self, id: u32) {
            if let Some(el) = self.enemies.remove(&id) {
                el.remove();
            }
        }

        fn set_enemy_position(&mut self, id: u32, position: Vec2) {
            self.set_enemy_attr(id, "cx", position.x);
            self.set_enemy_attr(id, "cy", position.y);
        }

        fn set_enemy_radius(&mut self, id: u32, radius: f32) {
            self.set_enemy_attr(id, "r", radius);
        }

        fn set_player_transform(&mut self, position: Vec2, angle_degrees: f32) {
            let transform = format!(
                "rotate({},{},{}) translate({},{})",
                angle_degrees, position.x, position.y, position.x, position.y
            );
            let _ = self.player.set_attribute("transform", &transform);
        }

        fn update_score_text(&mut self, value: u64) {
            self.set_text(".current span", value);
        }

        fn update_best_score_text(&mut self, value: u64) {
            self.set_text(".highscore span", value);
        }

        fn update_collision_text(&mut self, value: u64) {
            self.set_text(".collision span", value);
        }

        fn toggle_visual_mode(&mut self, mode: VisualMode) {
            let class_list = self.board.class_list();
            let _ = match mode {
                VisualMode::Normal => class_list.remove_1("alternate"),
                VisualMode::Alternate => class_list.add_1("alternate"),
            };
        }
    }

    /// Session plus everything the browser callbacks need
    struct Game {
        session: GameSession,
        display: SvgDisplay,
        /// rAF timestamp mapped to session time 0
        origin: Option<f64>,
        /// Last pointer position while dragging
        drag_from: Option<(f32, f32)>,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Watchout starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let options = GameOptions::default();
        let seed = js_sys::Date::now() as u64;
        let mut session =
            GameSession::new(options, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut display = SvgDisplay::mount(document, session.options())?;
        session.start(&mut display);

        let game = Rc::new(RefCell::new(Game {
            session,
            display,
            origin: None,
            drag_from: None,
        }));

        setup_drag_handlers(game.clone())?;
        request_animation_frame(game);
        Ok(())
    }

    fn setup_drag_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let player = game.borrow().display.player.clone();

        // Pointer down on the player starts a drag
        {
            let game = game.clone();
            let target = player.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let _ = target.set_pointer_capture(event.pointer_id());
                game.borrow_mut().drag_from = Some((event.client_x() as f32, event.client_y() as f32));
            });
            player.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer move feeds drag deltas to the player
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let Some((last_x, last_y)) = g.drag_from else {
                    return;
                };
                let (x, y) = (event.client_x() as f32, event.client_y() as f32);
                g.drag_from = Some((x, y));

                let Game {
                    session, display, ..
                } = &mut *g;
                session.drag_player(x - last_x, y - last_y, display);
            });
            player.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer up or cancel ends it
        for event_name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().drag_from = None;
            });
            player.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping the game loop");
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
            let origin = *g.origin.get_or_insert(time);
            let now = (time - origin).max(0.0) as u64;

            let Game {
                session, display, ..
            } = &mut *g;
            session.advance_to(now, display);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use watchout::{GameOptions, GameSession, GameStats, RecordingDisplay};

    const USAGE: &str = "usage: watchout [CONFIG.json] [--seed N] [--seconds S]";

    /// Command line for a headless run
    #[derive(Debug)]
    pub struct Args {
        pub config: Option<String>,
        pub seed: u64,
        pub seconds: u64,
    }

    impl Args {
        pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Args {
                config: None,
                seed: 0,
                seconds: 60,
            };

            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => parsed.seed = parse_value(&arg, args.next())?,
                    "--seconds" => parsed.seconds = parse_value(&arg, args.next())?,
                    "-h" | "--help" => return Err(USAGE.to_string()),
                    flag if flag.starts_with('-') => {
                        return Err(format!("unknown flag {}\n{}", flag, USAGE));
                    }
                    _ if parsed.config.is_none() => parsed.config = Some(arg),
                    _ => return Err(format!("unexpected argument {}\n{}", arg, USAGE)),
                }
            }

            Ok(parsed)
        }
    }

    fn parse_value(flag: &str, value: Option<String>) -> Result<u64, String> {
        let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
        value
            .parse()
            .map_err(|e| format!("invalid value for {}: {} ({})", flag, value, e))
    }

    /// What a headless run prints
    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub elapsed_ms: u64,
        pub turns: u64,
        pub stats: GameStats,
    }

    /// Play `args.seconds` of game time with a player circling the board
    pub fn run(args: &Args) -> Result<Summary, watchout::ConfigError> {
        let options = match &args.config {
            Some(path) => GameOptions::load(path)?,
            None => GameOptions::default(),
        };
        let frame_ms = options.frame_interval_ms;

        let mut display = RecordingDisplay::without_frames();
        let mut session = GameSession::new(options, args.seed)?;
        session.start(&mut display);

        let end = args.seconds * 1000;
        let mut step = 0u64;
        while session.now() < end {
            session.advance(frame_ms.min(end - session.now()), &mut display);

            // Slow wander so the player drifts across the swarm
            let heading = step as f32 * 0.02;
            session.drag_player(heading.cos() * 3.0, (heading * 1.3).sin() * 3.0, &mut display);
            step += 1;

            // Only the final stats matter here
            display.clear();
        }
        session.stop();

        Ok(Summary {
            seed: session.seed(),
            elapsed_ms: session.now(),
            turns: session.turn(),
            stats: session.stats().clone(),
        })
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args = match headless::Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    log::info!("Watchout (headless) starting, {} s of game time", args.seconds);

    match headless::run(&args) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        },
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
