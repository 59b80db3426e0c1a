//! Void Breacher entry point
//!
//! On the web this wires the DOM (keyboard, buttons, focus, resize) to the
//! game and paints its draw commands on a 2D canvas every animation frame.
//! Natively it runs a headless autopilot session and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

    use void_breacher::Game;
    use void_breacher::persistence::LocalStorage;
    use void_breacher::platform::HostAction;
    use void_breacher::renderer::DrawCmd;
    use void_breacher::sim::Command;
    use void_breacher::ui::HudModel;

    /// Keys the browser would otherwise scroll or act on
    const CAPTURED_KEYS: &[&str] = &[
        "ArrowUp",
        "ArrowDown",
        "ArrowLeft",
        "ArrowRight",
        "Space",
    ];

    struct App {
        game: Game<LocalStorage>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn resize_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.game.resize(width as f32, height as f32);
        }

        fn track_fps(&mut self, time: f64) {
            let oldest = self.frame_times[self.frame_index];
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            if oldest > 0.0 && time > oldest {
                self.fps = (self.frame_times.len() as f64 * 1000.0 / (time - oldest)).round() as u32;
            }
        }

        fn paint(&self) {
            let ctx = &self.ctx;
            let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);

            for cmd in self.game.draw_commands() {
                match cmd {
                    DrawCmd::Clear { color } => {
                        ctx.set_shadow_blur(0.0);
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill_rect(0.0, 0.0, w, h);
                    }
                    DrawCmd::Rect {
                        pos,
                        size,
                        color,
                        glow,
                    } => {
                        let css = color.to_css();
                        ctx.set_shadow_blur(glow as f64);
                        ctx.set_shadow_color(&css);
                        ctx.set_fill_style_str(&css);
                        ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                    }
                    DrawCmd::Triangle {
                        points,
                        color,
                        glow,
                    } => {
                        let css = color.to_css();
                        ctx.set_shadow_blur(glow as f64);
                        ctx.set_shadow_color(&css);
                        ctx.set_fill_style_str(&css);
                        ctx.begin_path();
                        ctx.move_to(points[0].x as f64, points[0].y as f64);
                        ctx.line_to(points[1].x as f64, points[1].y as f64);
                        ctx.line_to(points[2].x as f64, points[2].y as f64);
                        ctx.close_path();
                        ctx.fill();
                    }
                }
            }
            ctx.set_shadow_blur(0.0);

            if self.game.settings().show_fps {
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
                ctx.set_font("12px monospace");
                let _ = ctx.fill_text(&format!("{} FPS", self.fps), 8.0, h - 8.0);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Copy the HUD model into the DOM
    fn sync_hud(hud: &HudModel) {
        let Some(document) = document() else {
            return;
        };

        set_text(&document, "score", &hud.score.to_string());
        set_text(&document, "wave", &hud.wave.to_string());
        set_text(&document, "highScore", &hud.high_score.to_string());
        set_text(&document, "healthText", &hud.health_text());
        set_text(&document, "dashStatus", &hud.dash_text);

        if let Some(bar) = document
            .get_element_by_id("healthBar")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = bar
                .style()
                .set_property("width", &format!("{}%", hud.health_percent));
        }

        set_hidden(&document, "menu", !hud.show_menu);
        set_hidden(&document, "startBtn", !hud.show_start_button);
        set_hidden(&document, "pauseBtn", !hud.show_pause_button);
        set_hidden(&document, "pauseOverlay", !hud.show_pause);
        set_hidden(&document, "gameOver", !hud.show_game_over);
        if hud.show_game_over {
            set_text(&document, "finalScore", &hud.final_score.to_string());
            set_text(&document, "finalWave", &hud.final_wave.to_string());
        }
    }

    fn toggle_fullscreen() {
        let Some(document) = document() else {
            return;
        };
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
        } else if let Some(root) = document.document_element() {
            if let Err(e) = root.request_fullscreen() {
                log::warn!("Fullscreen request failed: {:?}", e);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Void Breacher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, LocalStorage::new()),
            canvas,
            ctx,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));
        app.borrow_mut().resize_to_window();
        sync_hud(&app.borrow().game.hud());

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        setup_resize(app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);

        log::info!("Void Breacher running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let code = event.code();
                if CAPTURED_KEYS.contains(&code.as_str()) {
                    event.prevent_default();
                }
                let action = app.borrow_mut().game.key_down(&code);
                if action == Some(HostAction::ToggleFullscreen) {
                    toggle_fullscreen();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.code());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };

        {
            let app = app.clone();
            on_click(&document, "startBtn", move || {
                app.borrow_mut().game.command(Command::Start);
            });
        }
        {
            let app = app.clone();
            on_click(&document, "pauseBtn", move || {
                app.borrow_mut().game.command(Command::TogglePause);
            });
        }
        {
            // Restart doubles as start from the menu
            let app = app.clone();
            on_click(&document, "restartBtn", move || {
                let mut app = app.borrow_mut();
                if !app.game.command(Command::Restart) {
                    app.game.command(Command::Start);
                }
            });
        }
        {
            let app = app.clone();
            on_click(&document, "playAgainBtn", move || {
                app.borrow_mut().game.command(Command::Start);
            });
        }
        on_click(&document, "fullscreenBtn", toggle_fullscreen);
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.blur("tab hidden");
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
                app.borrow_mut().game.blur("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();
            app.track_fps(time);
            app.game.frame(time);
            app.paint();
            sync_hud(&app.game.hud());
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

/// Frames the headless demo runs before giving up on a game over
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use void_breacher::Game;
    use void_breacher::consts::FRAME_MS;
    use void_breacher::persistence::FileStore;
    use void_breacher::sim::{Command, GameEvent, GamePhase};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Void Breacher (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let path = std::env::var("VOID_BREACHER_STORE").unwrap_or_else(|_| "void_breacher.json".into());
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let store = FileStore::open(path);
    log::info!("Using store at {}", store.path().display());
    let mut game = Game::new(seed, store);
    game.set_idle_mode(true);
    game.command(Command::Start);

    let (mut kills, mut hits) = (0u32, 0u32);
    for frame in 0..DEMO_FRAMES {
        for event in game.frame(frame as f64 * FRAME_MS) {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PlayerHit { .. } => hits += 1,
                _ => {}
            }
        }
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let hud = game.hud();
    log::info!(
        "Demo finished after {} frames: {} (score {}, wave {}, kills {}, hits taken {}, best {})",
        game.state().time_ticks,
        game.phase().as_str(),
        hud.score,
        hud.wave,
        kills,
        hits,
        hud.high_score
    );
}
