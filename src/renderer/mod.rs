//! Canvas 2D rendering module
//!
//! The simulation hands over a `RenderFrame`; this module decides colours
//! and HUD text for it. Only `canvas` touches the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use crate::sim::{GamePhase, Hud, ItemKind, RenderFrame, SpriteKind};

/// Opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Blend toward white (`t` > 0) or black (`t` < 0)
    pub fn shade(self, t: f32) -> Self {
        let t = t.clamp(-1.0, 1.0);
        let mix = |c: u8| {
            let c = c as f32;
            let out = if t >= 0.0 {
                c + (255.0 - c) * t
            } else {
                c * (1.0 + t)
            };
            out.round() as u8
        };
        Self::new(mix(self.r), mix(self.g), mix(self.b))
    }

    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS colour with alpha
    pub fn css_alpha(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

/// Zone colours resolved for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub enemy: Rgb,
    pub boss: Rgb,
}

pub const PLAYER_COLOR: Rgb = Rgb::new(0xe8, 0xe8, 0xf0);
pub const STRIKE_COLOR: Rgb = Rgb::new(0xff, 0xd7, 0x00);
pub const SHIELD_COLOR: Rgb = Rgb::new(0x4f, 0xc3, 0xf7);
pub const SWORD_COLOR: Rgb = Rgb::new(0xc0, 0xc0, 0xc0);
pub const PROJECTILE_COLOR: Rgb = Rgb::new(0xff, 0xa5, 0x00);
const FALLBACK: Rgb = Rgb::new(0x20, 0x20, 0x20);

impl Palette {
    /// Zone colours, falling back to dark grey on malformed input
    pub fn from_frame(frame: &RenderFrame) -> Self {
        let parse = |s: &str| {
            Rgb::parse(s).unwrap_or_else(|| {
                log::warn!("Bad colour {:?}, using fallback", s);
                FALLBACK
            })
        };
        Self {
            background: parse(&frame.background),
            enemy: parse(&frame.enemy_color),
            boss: parse(&frame.boss_color),
        }
    }

    pub fn fill_for(&self, kind: SpriteKind) -> Rgb {
        match kind {
            SpriteKind::Player { .. } => PLAYER_COLOR,
            SpriteKind::Strike => STRIKE_COLOR,
            SpriteKind::Enemy => self.enemy,
            SpriteKind::Boss => self.boss,
            SpriteKind::Projectile => PROJECTILE_COLOR,
            SpriteKind::Item(ItemKind::Shield) => SHIELD_COLOR,
            SpriteKind::Item(ItemKind::Sword) => SWORD_COLOR,
        }
    }

    /// Backdrop stripe colour
    pub fn stripe(&self) -> Rgb {
        self.background.shade(0.08)
    }
}

/// HUD text lines, top-left corner
pub fn hud_lines(hud: &Hud) -> Vec<String> {
    let mut lines = vec![
        format!("Zone {}: {}", hud.level + 1, hud.zone),
        format!("Lives: {}", hud.lives),
        format!("Runes: {}", hud.runes),
        format!("Score: {}", hud.score),
    ];
    let mut gear = Vec::new();
    if hud.shield {
        gear.push("Shield");
    }
    if hud.sword {
        gear.push("Sword");
    }
    if !gear.is_empty() {
        lines.push(gear.join(" + "));
    }
    lines
}

/// Boss bar fill fraction, if a boss is present
pub fn boss_bar(hud: &Hud) -> Option<f32> {
    match (hud.boss_hp, hud.boss_max_hp) {
        (Some(hp), Some(max)) if max > 0 => Some(hp as f32 / max as f32),
        _ => None,
    }
}

/// Centre banner for transient phases
pub fn banner(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Defeating { .. } => Some("Boss defeated!"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelTable;
    use crate::rules::Ruleset;
    use crate::sim::GameState;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse("#2E8B57"), Some(Rgb::new(0x2e, 0x8b, 0x57)));
        assert_eq!(Rgb::parse("2E8B57"), None);
        assert_eq!(Rgb::parse("#2E8B5"), None);
        assert_eq!(Rgb::parse("#zz8B57"), None);
        assert_eq!(Rgb::new(1, 2, 255).css(), "#0102ff");
    }

    #[test]
    fn test_shade_extremes() {
        let c = Rgb::new(100, 50, 0);
        assert_eq!(c.shade(1.0), Rgb::new(255, 255, 255));
        assert_eq!(c.shade(-1.0), Rgb::new(0, 0, 0));
        assert_eq!(c.shade(0.0), c);
    }

    #[test]
    fn test_palette_from_level() {
        let mut state = GameState::new(1, Ruleset::arena(), LevelTable::default());
        state.start();
        let frame = state.render_frame();
        let palette = Palette::from_frame(&frame);
        assert_eq!(palette.background, Rgb::parse(&frame.background).unwrap());
        assert_eq!(palette.fill_for(SpriteKind::Boss), palette.boss);
        assert_eq!(palette.fill_for(SpriteKind::Item(ItemKind::Shield)), SHIELD_COLOR);
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(1, Ruleset::arena(), LevelTable::default());
        state.start();
        state.player.sword = true;
        let hud = state.render_frame().hud;
        let lines = hud_lines(&hud);
        assert_eq!(lines[0], "Zone 1: Enchanted Forest");
        assert_eq!(lines[1], "Lives: 3");
        assert_eq!(lines.last().map(String::as_str), Some("Sword"));
        assert_eq!(boss_bar(&hud), Some(1.0));
        assert_eq!(banner(hud.phase), None);
    }
}
