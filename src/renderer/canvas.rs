//! Canvas 2D renderer

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::particles::ParticleSystem;
use super::{CORAL, INK, MINT, NIGHT, sky_color};
use crate::consts::*;
use crate::sim::{GameEvent, GamePhase};
use crate::sink::{EntityView, FeedbackSink, HudState, PresentationSink, Snapshot};

const ROAD_WIDTH: f64 = 540.0;
const PLAYER_SIZE: f64 = 52.0;
const STAR_COUNT: usize = 70;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    particles: ParticleSystem,
    /// Seconds since start, drives stars and lane scroll
    time: f64,
}

impl CanvasRenderer {
    /// Size the canvas to the playfield and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, seed: u64) -> Result<Self, JsValue> {
        use wasm_bindgen::JsCast;

        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            particles: ParticleSystem::new(seed),
            time: 0.0,
        })
    }

    /// Advance cosmetic animation
    pub fn advance(&mut self, dt: f32) {
        self.time += f64::from(dt);
        self.particles.update(dt);
    }

    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let ctx = &self.ctx;
        let r = r.min(w / 2.0).min(h / 2.0);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r).ok();
        ctx.arc_to(x + w, y + h, x, y + h, r).ok();
        ctx.arc_to(x, y + h, x, y, r).ok();
        ctx.arc_to(x, y, x + w, y, r).ok();
        ctx.close_path();
    }

    fn circle(&self, x: f64, y: f64, r: f64) {
        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, TAU).ok();
        self.ctx.fill();
    }

    fn draw_sky(&self, snapshot: &Snapshot) {
        let ctx = &self.ctx;
        let (w, h) = (f64::from(FIELD_WIDTH), f64::from(FIELD_HEIGHT));

        ctx.set_fill_style_str(NIGHT);
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_global_alpha(0.8);
        ctx.set_fill_style_str(sky_color(snapshot.theme));
        ctx.fill_rect(0.0, 0.0, w, h * 0.55);
        ctx.set_global_alpha(1.0);

        // Drifting stars
        ctx.set_fill_style_str("rgba(233,237,255,0.45)");
        let t = self.time * 1000.0;
        for i in 0..STAR_COUNT {
            let fi = i as f64;
            let sx = ((fi * 999.0 + t * 0.0002).sin() + 1.0) * 0.5 * w;
            let sy = ((fi * 333.0 + t * 0.00015).cos() + 1.0) * 0.5 * h * 0.6;
            let s = 1.0 + (i % 3) as f64;
            ctx.fill_rect(sx, sy, s, s);
        }
    }

    fn draw_road(&self) {
        let ctx = &self.ctx;
        let h = f64::from(FIELD_HEIGHT);
        let cx = f64::from(FIELD_WIDTH) / 2.0;

        ctx.save();
        ctx.set_fill_style_str("rgba(233,237,255,0.06)");
        self.rounded_rect(cx - ROAD_WIDTH / 2.0, h * 0.52, ROAD_WIDTH, h * 0.5, 26.0);
        ctx.fill();

        ctx.set_stroke_style_str("rgba(233,237,255,0.12)");
        ctx.set_line_width(6.0);
        let dash = js_sys::Array::of2(&JsValue::from_f64(24.0), &JsValue::from_f64(22.0));
        ctx.set_line_dash(&dash).ok();
        let scroll = (self.time * 1000.0 * 0.25) % 46.0;
        for lx in [cx - ROAD_WIDTH / 6.0, cx + ROAD_WIDTH / 6.0] {
            ctx.begin_path();
            ctx.move_to(lx, h * 0.55 - scroll);
            ctx.line_to(lx, h);
            ctx.stroke();
        }
        ctx.restore();
    }

    fn draw_entity(&self, e: &EntityView) {
        let ctx = &self.ctx;
        let (x, y, s) = (f64::from(e.x), f64::from(e.y), f64::from(e.size));

        ctx.save();
        ctx.set_global_alpha(0.25);
        ctx.set_fill_style_str("rgba(0,0,0,0.6)");
        ctx.begin_path();
        ctx.ellipse(x, y + 28.0, s * 0.45, s * 0.18, 0.0, 0.0, TAU).ok();
        ctx.fill();
        ctx.set_global_alpha(1.0);

        let badge = match e.category {
            crate::sim::Category::Good => "rgba(124,247,197,0.22)",
            crate::sim::Category::Bad => "rgba(255,92,122,0.22)",
        };
        ctx.set_fill_style_str(badge);
        self.rounded_rect(x - s / 2.0, y - s / 2.0, s, s, 14.0);
        ctx.fill();
        ctx.set_stroke_style_str("rgba(233,237,255,0.18)");
        ctx.set_line_width(4.0);
        ctx.stroke();

        ctx.set_font(&format!(
            "bold {}px system-ui, Apple Color Emoji, Segoe UI Emoji",
            (s * 0.72).floor()
        ));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(e.glyph, x, y + 2.0).ok();
        ctx.restore();
    }

    fn draw_player(&self, snapshot: &Snapshot) {
        let ctx = &self.ctx;
        let idle = snapshot.phase != GamePhase::Running;
        let t = if idle {
            f64::from(snapshot.attract_time)
        } else {
            self.time
        };

        let x = f64::from(snapshot.player.x);
        let y = f64::from(snapshot.player.y) + (t * 1.2).sin() * 6.0;
        let aura = if idle {
            ((t * 0.3).sin() + 1.0) * 0.5
        } else if snapshot.player.invulnerable {
            1.0
        } else {
            0.0
        };

        ctx.save();
        if aura > 0.0 {
            ctx.set_global_alpha(0.65 * aura);
            ctx.set_fill_style_str("rgba(124,247,197,0.35)");
            self.circle(x, y, 82.0);
            ctx.set_global_alpha(1.0);
        }

        let s = PLAYER_SIZE;
        ctx.set_fill_style_str(INK);
        self.rounded_rect(x - s / 2.0, y - s / 2.0, s, s, 16.0);
        ctx.fill();

        ctx.set_fill_style_str("#0b1020");
        self.circle(x - 12.0, y - 6.0, 5.0);
        self.circle(x + 12.0, y - 6.0, 5.0);
        ctx.set_stroke_style_str("#0b1020");
        ctx.set_line_width(5.0);
        ctx.begin_path();
        ctx.arc(x, y + 12.0, 14.0, 0.1 * std::f64::consts::PI, 0.9 * std::f64::consts::PI)
            .ok();
        ctx.stroke();

        // Hat
        ctx.set_fill_style_str(MINT);
        self.rounded_rect(x - 34.0, y - 54.0, 68.0, 22.0, 12.0);
        ctx.fill();
        self.rounded_rect(x - 20.0, y - 74.0, 40.0, 26.0, 12.0);
        ctx.fill();

        // Suitcase
        ctx.set_fill_style_str(CORAL);
        self.rounded_rect(x + 18.0, y + 8.0, 34.0, 36.0, 10.0);
        ctx.fill();
        ctx.set_stroke_style_str("rgba(233,237,255,0.6)");
        ctx.set_line_width(3.0);
        ctx.stroke_rect(x + 24.0, y + 14.0, 22.0, 24.0);
        ctx.restore();
    }

    fn draw_particles(&self) {
        let ctx = &self.ctx;
        for p in self.particles.particles() {
            ctx.set_global_alpha(0.9 * f64::from(p.fade()));
            ctx.set_fill_style_str(if p.good { MINT } else { CORAL });
            ctx.fill_rect(f64::from(p.pos.x), f64::from(p.pos.y), 8.0, 8.0);
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_progress(&self, progress: f32) {
        let ctx = &self.ctx;
        let w = f64::from(FIELD_WIDTH) - 88.0;
        ctx.set_fill_style_str("rgba(233,237,255,0.12)");
        self.rounded_rect(44.0, 24.0, w, 10.0, 5.0);
        ctx.fill();
        ctx.set_fill_style_str(MINT);
        self.rounded_rect(44.0, 24.0, w * f64::from(progress), 10.0, 5.0);
        ctx.fill();
    }

    /// Stop caption, blurb and snack tokens along the bottom edge
    fn draw_caption(&self, hud: &HudState) {
        let ctx = &self.ctx;
        let (w, h) = (f64::from(FIELD_WIDTH), f64::from(FIELD_HEIGHT));
        const FONT: &str = "system-ui, -apple-system, Segoe UI, Roboto, Arial";

        ctx.save();
        ctx.set_global_alpha(0.85);
        ctx.set_fill_style_str("rgba(18,26,51,0.66)");
        self.rounded_rect(18.0, h - 96.0, w - 36.0, 66.0, 18.0);
        ctx.fill();
        ctx.set_stroke_style_str("rgba(233,237,255,0.12)");
        ctx.set_line_width(2.0);
        ctx.stroke();

        ctx.set_fill_style_str(INK);
        ctx.set_font(&format!("800 18px {FONT}"));
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        ctx.fill_text(&hud.caption(), 34.0, h - 86.0).ok();

        ctx.set_fill_style_str("rgba(233,237,255,0.70)");
        ctx.set_font(&format!("650 15px {FONT}"));
        ctx.fill_text(&hud.stop_blurb, 34.0, h - 60.0).ok();

        ctx.set_text_align("right");
        ctx.set_fill_style_str(INK);
        ctx.set_font(&format!("800 18px {FONT}"));
        ctx.fill_text(&hud.tokens_label(), w - 34.0, h - 76.0).ok();
        ctx.restore();
    }

    fn draw_title(&self) {
        let ctx = &self.ctx;
        let w = f64::from(FIELD_WIDTH);
        ctx.save();
        ctx.set_global_alpha(0.9);
        ctx.set_fill_style_str("rgba(18,26,51,0.7)");
        self.rounded_rect(44.0, 220.0, w - 88.0, 210.0, 22.0);
        ctx.fill();
        ctx.set_stroke_style_str("rgba(124,247,197,0.22)");
        ctx.set_line_width(3.0);
        ctx.stroke();

        ctx.set_fill_style_str(INK);
        ctx.set_text_align("center");
        ctx.set_font("900 44px system-ui, -apple-system, Segoe UI, Roboto, Arial");
        ctx.fill_text("MIRY'S WORLD SWIPE", w / 2.0, 270.0).ok();
        ctx.set_font("800 18px system-ui, -apple-system, Segoe UI, Roboto, Arial");
        ctx.set_fill_style_str("rgba(233,237,255,0.75)");
        ctx.fill_text(
            "Swipe to travel. Collect the good stuff. Dodge the chaos.",
            w / 2.0,
            322.0,
        )
        .ok();
        ctx.restore();
    }
}

impl PresentationSink for CanvasRenderer {
    fn present(&mut self, snapshot: &Snapshot) {
        self.particles
            .follow(glam::Vec2::new(snapshot.player.x, snapshot.player.y));
        self.draw_sky(snapshot);
        self.draw_road();

        if snapshot.phase == GamePhase::Idle {
            self.draw_title();
            self.draw_player(snapshot);
            return;
        }

        for entity in &snapshot.entities {
            self.draw_entity(entity);
        }
        self.draw_player(snapshot);
        self.draw_particles();
        self.draw_progress(snapshot.progress);
        self.draw_caption(&snapshot.hud);
    }
}

impl FeedbackSink for CanvasRenderer {
    fn on_event(&mut self, event: &GameEvent) {
        self.particles.on_event(event);
    }
}
