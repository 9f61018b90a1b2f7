//! Canvas 2D drawing of a `RenderFrame`

use web_sys::CanvasRenderingContext2d;

use super::{Palette, SHIELD_COLOR, SWORD_COLOR, banner, boss_bar, hud_lines};
use crate::consts::*;
use crate::ground_y;
use crate::sim::{RenderFrame, Sprite, SpriteKind};

const HUD_FONT: &str = "16px monospace";
const BANNER_FONT: &str = "bold 36px monospace";

/// Canvas renderer state
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Skip the red hurt flash
    reduced_flashing: bool,
    /// Frames left on the hurt flash
    flash: u32,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, reduced_flashing: bool) -> Self {
        Self {
            ctx,
            reduced_flashing,
            flash: 0,
        }
    }

    pub fn set_reduced_flashing(&mut self, reduced: bool) {
        self.reduced_flashing = reduced;
        if reduced {
            self.flash = 0;
        }
    }

    /// Start the hurt flash
    pub fn flash_hurt(&mut self) {
        if !self.reduced_flashing {
            self.flash = 8;
        }
    }

    /// Draw one frame back to front
    pub fn draw(&mut self, frame: &RenderFrame) {
        let palette = Palette::from_frame(frame);
        let ctx = &self.ctx;

        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(&palette.background.css());
        ctx.fill_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);

        if frame.scrolling {
            self.draw_backdrop(frame, &palette);
        }

        for sprite in &frame.sprites {
            self.draw_sprite(sprite, &palette);
        }

        self.draw_hud(frame);

        if self.flash > 0 {
            ctx.set_fill_style_str(&super::Rgb::new(0xff, 0, 0).css_alpha(0.04 * self.flash as f32));
            ctx.fill_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);
            self.flash -= 1;
        }
    }

    /// Scrolling stripes plus the ground line
    fn draw_backdrop(&self, frame: &RenderFrame, palette: &Palette) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&palette.stripe().css());
        let mut x = -(frame.backdrop_offset as f64);
        while x < WORLD_WIDTH as f64 {
            ctx.fill_rect(x, 0.0, BACKDROP_STRIPE_SPACING as f64 / 2.0, WORLD_HEIGHT as f64);
            x += BACKDROP_STRIPE_SPACING as f64;
        }

        ctx.set_fill_style_str(&palette.background.shade(-0.5).css());
        ctx.fill_rect(
            0.0,
            ground_y() as f64,
            WORLD_WIDTH as f64,
            GROUND_OFFSET as f64,
        );
    }

    fn draw_sprite(&self, sprite: &Sprite, palette: &Palette) {
        let ctx = &self.ctx;
        let r = sprite.rect;
        let (x, y, w, h) = (r.min.x as f64, r.min.y as f64, r.size.x as f64, r.size.y as f64);
        let fill = palette.fill_for(sprite.kind);

        match sprite.kind {
            SpriteKind::Strike => {
                ctx.set_fill_style_str(&fill.css_alpha(0.35));
                ctx.fill_rect(x, y, w, h);
            }
            SpriteKind::Player { shield } => {
                ctx.set_fill_style_str(&fill.css());
                ctx.fill_rect(x, y, w, h);
                if shield {
                    ctx.set_stroke_style_str(&SHIELD_COLOR.css());
                    ctx.set_line_width(3.0);
                    ctx.stroke_rect(x - 3.0, y - 3.0, w + 6.0, h + 6.0);
                }
            }
            SpriteKind::Item(_) => {
                ctx.set_fill_style_str(&fill.css());
                ctx.fill_rect(x, y, w, h);
                ctx.set_stroke_style_str(&SWORD_COLOR.shade(0.6).css());
                ctx.set_line_width(1.0);
                ctx.stroke_rect(x, y, w, h);
            }
            SpriteKind::Enemy | SpriteKind::Boss | SpriteKind::Projectile => {
                ctx.set_fill_style_str(&fill.css());
                ctx.fill_rect(x, y, w, h);
            }
        }
    }

    fn draw_hud(&self, frame: &RenderFrame) {
        let ctx = &self.ctx;
        ctx.set_font(HUD_FONT);
        ctx.set_text_align("left");
        ctx.set_fill_style_str("#ffffff");
        for (i, line) in hud_lines(&frame.hud).iter().enumerate() {
            let _ = ctx.fill_text(line, 12.0, 24.0 + 20.0 * i as f64);
        }

        if let Some(fraction) = boss_bar(&frame.hud) {
            let width = 240.0;
            let x = WORLD_WIDTH as f64 - width - 12.0;
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
            ctx.fill_rect(x, 12.0, width, 14.0);
            ctx.set_fill_style_str(&Palette::from_frame(frame).boss.css());
            ctx.fill_rect(x, 12.0, width * fraction as f64, 14.0);
            ctx.set_fill_style_str("#ffffff");
            let label = format!("Boss {}", frame.hud.boss_hp.unwrap_or(0));
            let _ = ctx.fill_text(&label, x, 44.0);
        }

        if let Some(text) = banner(frame.hud.phase) {
            ctx.set_font(BANNER_FONT);
            ctx.set_text_align("center");
            let _ = ctx.fill_text(text, WORLD_WIDTH as f64 / 2.0, WORLD_HEIGHT as f64 / 2.0);
        }
    }
}
