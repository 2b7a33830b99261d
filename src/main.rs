//! Don't Say It entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use dont_say_it::audio::WebCuePlayer;
    use dont_say_it::consts::{VH, VW};
    use dont_say_it::input::{Rect, Viewport};
    use dont_say_it::sim::RunState;
    use dont_say_it::ui::{self, DangerBand, HudSnapshot};
    use dont_say_it::{Game, Settings};

    /// Game instance holding all state
    struct App {
        game: Game<WebCuePlayer>,
        settings: Settings,
        viewport: Viewport,
        /// Last pointer position in virtual coordinates (hover effects)
        pointer: Vec2,
        last_time: f64,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(VW as f64);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(VH as f64);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.viewport = Viewport::fit(w as f32, h as f32);
        }

        fn to_virtual(&self, client_x: f32, client_y: f32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let local = Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32);
            self.viewport.screen_to_virtual(local)
        }

        /// Pointer press in client coordinates
        fn press(&mut self, client_x: f32, client_y: f32) {
            self.game.cues_mut().unlock();
            let point = self.to_virtual(client_x, client_y);
            self.pointer = point;
            self.game.queue_pointer(point);
        }

        fn update(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;
            self.game.frame(elapsed);
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            let ctx = &self.ctx;
            let t = (time / 1000.0) as f32;

            ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
            ctx.set_fill_style_str("#000");
            ctx.fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);

            let vp = self.viewport;
            ctx.set_transform(
                vp.scale as f64,
                0.0,
                0.0,
                vp.scale as f64,
                vp.offset.x as f64,
                vp.offset.y as f64,
            )
            .ok();
            ctx.save();
            ctx.begin_path();
            ctx.rect(0.0, 0.0, VW as f64, VH as f64);
            ctx.clip();

            let hud = self.game.snapshot();
            match hud.state {
                RunState::Title => self.draw_title(t),
                RunState::Tutorial => {
                    self.draw_title(t);
                    self.draw_tutorial();
                }
                RunState::Playing | RunState::Released => self.draw_playing(&hud),
                RunState::Win => self.draw_end("STATEMENT STOPPED", "rgb(30, 90, 60)", t),
                RunState::Defeat => self.draw_end("IT WAS SAID", "rgb(90, 20, 20)", t),
            }

            ctx.restore();
        }

        fn draw_title(&self, t: f32) {
            let ctx = &self.ctx;
            fill(ctx, "rgb(24, 28, 40)", 0.0, 0.0, VW, VH);

            ctx.save();
            ctx.translate(VW as f64 / 2.0, VH as f64 * 0.18).ok();
            let pulse = ui::title_pulse(t, &self.settings) as f64;
            ctx.scale(pulse, pulse).ok();
            text(ctx, "DON'T SAY IT", 0.0, 0.0, "bold 54px sans-serif", "#fff");
            ctx.restore();

            let hovered = self.game.layout().start.contains(self.pointer);
            self.draw_button(&self.game.layout().start, "START", hovered, t);
        }

        fn draw_tutorial(&self) {
            let ctx = &self.ctx;
            ctx.set_global_alpha(200.0 / 255.0);
            fill(ctx, "#000", 0.0, 0.0, VW, VH);
            ctx.set_global_alpha(1.0);

            let w = VW * 0.86;
            let h = VH * 0.40;
            let (x, y) = (VW / 2.0, VH * 0.44);
            fill(ctx, "rgb(20, 20, 20)", x - w / 2.0, y - h / 2.0, w, h);

            text(ctx, "HOW TO PLAY", x, y - h * 0.32, "bold 28px sans-serif", "#fff");
            let lines = [
                "A statement is building.",
                "Tap INTERRUPT many times to change it.",
                "If the sentence completes - you lose.",
                "",
                "Build a streak to win.",
            ];
            for (i, line) in lines.iter().enumerate() {
                text(ctx, line, x, y - 50.0 + i as f32 * 24.0, "18px sans-serif", "#eee");
            }
            text(ctx, "Click anywhere to continue", x, y + h * 0.34, "16px sans-serif", "#ccc");
        }

        fn draw_playing(&self, hud: &HudSnapshot) {
            let ctx = &self.ctx;
            let released = hud.released();
            let shake = ui::shake_amount(hud.progress, released, &self.settings);

            let bg = if ui::crisis_background(hud.danger, released) {
                "rgb(70, 16, 16)"
            } else {
                "rgb(28, 34, 48)"
            };
            fill(ctx, bg, 0.0, 0.0, VW, VH);

            // Shaken group: portrait and danger overlay
            ctx.save();
            if shake > 0.0 {
                ctx.translate(jitter(shake), jitter(shake)).ok();
            }
            let face = match ui::face(hud.progress, released) {
                ui::Face::Neutral => ":|",
                ui::Face::Danger => ":O",
                ui::Face::Fail => "X(",
            };
            text(ctx, face, VW / 2.0, VH * 0.45, "bold 160px sans-serif", "#ddd");
            let alpha = ui::overlay_alpha(hud.danger, released);
            if alpha > 0.0 {
                ctx.set_global_alpha((alpha / 255.0) as f64);
                fill(ctx, "rgb(200, 0, 0)", 0.0, 0.0, VW, VH);
                ctx.set_global_alpha(1.0);
            }
            ctx.restore();

            // Danger bar
            let pad = 22.0;
            let bar_w = VW - pad * 2.0;
            fill(ctx, "rgb(25, 25, 25)", pad, 18.0, bar_w, 18.0);
            let band = DangerBand::from_level(hud.danger);
            let filled = bar_w * self.game.state().danger.fraction();
            fill(ctx, band.css_color(), pad, 18.0, filled, 18.0);
            text(
                ctx,
                &format!("STREAK {}/{}", hud.streak, hud.win_streak),
                VW / 2.0,
                58.0,
                "bold 16px sans-serif",
                "#fff",
            );

            // Phrase box
            let box_w = VW * 0.86;
            let box_h = 130.0;
            let (bx, by) = (VW / 2.0, VH * 0.77);
            fill(ctx, "rgb(20, 20, 20)", bx - box_w / 2.0, by - box_h / 2.0, box_w, box_h);
            let j = ui::text_jitter(shake);
            let (tx, ty) = if j > 0.0 {
                (bx + jitter(j) as f32, by + jitter(j) as f32)
            } else {
                (bx, by)
            };
            ctx.set_font("20px sans-serif");
            let lines = wrap(ctx, &hud.typed, box_w - 24.0);
            let top = ty - (lines.len() as f32 - 1.0) * 12.0;
            for (i, line) in lines.iter().enumerate() {
                text(ctx, line, tx, top + i as f32 * 24.0, "20px sans-serif", "#fff");
            }

            // Interrupt button
            let r = &self.game.layout().interrupt;
            let glow = ui::tap_glow(hud.taps, hud.taps_to_interrupt);
            let red = if r.contains(self.pointer) { 255.0 } else { 235.0 };
            let color = format!("rgb({}, {}, {})", red, 70.0 + glow, 70.0 + glow);
            fill(ctx, &color, r.pos.x, r.pos.y, r.size.x, r.size.y);
            let c = r.center();
            text(ctx, "INTERRUPT", c.x, c.y + 1.0, "bold 26px sans-serif", "#fff");
            text(
                ctx,
                &hud.tap_label(),
                r.pos.x + r.size.x - 30.0,
                r.pos.y - 14.0,
                "14px sans-serif",
                "#bbb",
            );
        }

        fn draw_end(&self, title: &str, bg: &str, t: f32) {
            fill(&self.ctx, bg, 0.0, 0.0, VW, VH);
            text(&self.ctx, title, VW / 2.0, VH * 0.35, "bold 44px sans-serif", "#fff");
            let hovered = self.game.layout().try_again.contains(self.pointer);
            self.draw_button(&self.game.layout().try_again, "TRY AGAIN", hovered, t);
        }

        fn draw_button(&self, r: &Rect, label: &str, hovered: bool, t: f32) {
            let ctx = &self.ctx;
            let s = ui::button_scale(hovered, t, &self.settings) as f64;
            let c = r.center();
            ctx.save();
            ctx.translate(c.x as f64, c.y as f64).ok();
            ctx.scale(s, s).ok();
            fill(ctx, "rgb(235, 70, 70)", -r.size.x / 2.0, -r.size.y / 2.0, r.size.x, r.size.y);
            text(ctx, label, 0.0, 0.0, "bold 30px sans-serif", "#fff");
            ctx.restore();
        }
    }

    fn fill(ctx: &CanvasRenderingContext2d, color: &str, x: f32, y: f32, w: f32, h: f32) {
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn text(ctx: &CanvasRenderingContext2d, s: &str, x: f32, y: f32, font: &str, color: &str) {
        ctx.set_font(font);
        ctx.set_fill_style_str(color);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(s, x as f64, y as f64).ok();
    }

    fn jitter(amount: f32) -> f64 {
        (js_sys::Math::random() * 2.0 - 1.0) * amount as f64
    }

    /// Greedy word wrap using the current font
    fn wrap(ctx: &CanvasRenderingContext2d, s: &str, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for word in s.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            let width = ctx.measure_text(&candidate).map(|m| m.width()).unwrap_or(0.0);
            if width > max_width as f64 && !line.is_empty() {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
        lines
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Don't Say It starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
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
        let settings = Settings::default();
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, WebCuePlayer::new(settings.clone())),
            settings,
            viewport: Viewport::default(),
            pointer: Vec2::ZERO,
            last_time: 0.0,
            canvas: canvas.clone(),
            ctx,
        }));
        app.borrow_mut().resize();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Window resize - refit the virtual canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - hover only
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.pointer = a.to_virtual(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .press(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - suppress the synthetic mouse event
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    app.borrow_mut()
                        .press(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render(time);
        }

        request_animation_frame(app);
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
    env_logger::init();
    log::info!("Don't Say It (native) starting...");
    log::info!("Native mode runs a headless scripted demo - build for wasm32 to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => dont_say_it::Tuning::default(),
    };

    run_demo(tuning);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<dont_say_it::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(dont_say_it::Tuning::from_json(&json)?)
}

/// Play one run with a tapper that hits INTERRUPT every few frames
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(tuning: dont_say_it::Tuning) {
    use dont_say_it::sim::{Activation, PhrasePool, RunState};
    use dont_say_it::{Game, SilentCues};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const TAP_EVERY_FRAMES: u32 = 9;
    const MAX_FRAMES: u32 = 60 * 120;

    let seed = 2026;
    let mut game = match Game::with_config(seed, tuning, PhrasePool::default(), SilentCues) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    game.queue_activation(Activation::StartButton);
    game.frame(0.0);
    game.queue_activation(Activation::TutorialDismiss);

    let interrupt = game.layout().interrupt.center();
    let mut frames = 0;
    while frames < MAX_FRAMES && !game.current_state().is_terminal() {
        if frames % TAP_EVERY_FRAMES == 0 {
            game.queue_pointer(interrupt);
        }
        for event in game.frame(FRAME_MS) {
            log::debug!("frame {}: {:?}", frames, event);
        }
        frames += 1;
    }

    let outcome = match game.current_state() {
        RunState::Win => "won",
        RunState::Defeat => "lost",
        _ => "timed out",
    };
    println!(
        "Demo {} after {:.1}s (seed {}, streak {})",
        outcome,
        frames as f64 * FRAME_MS / 1000.0,
        seed,
        game.streak()
    );
    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Failed to serialize snapshot: {}", e),
    }
}
