//! Rune Raid - a zone-hopping arcade brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, spawns, game state)
//! - `levels`: Zone table (names and colours)
//! - `rules`: Ruleset presets selecting the motion policies
//! - `input`: Logical keys and key bindings
//! - `renderer`: Canvas 2D drawing of render frames
//! - `settings` / `highscores`: LocalStorage-backed preferences and leaderboard

pub mod audio;
pub mod highscores;
pub mod input;
pub mod levels;
pub mod renderer;
pub mod rules;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use input::{Key, KeyBindings, KeySet};
pub use levels::{ConfigError, Level, LevelTable};
pub use rules::{Ruleset, RulesetKind};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_LIVES: u32 = 3;
    /// Levels start with the player in the left third, clear of the boss
    pub const PLAYER_START_X: f32 = WORLD_WIDTH / 6.0 - PLAYER_WIDTH / 2.0;
    /// Ticks after a hit during which contact does no further damage
    pub const HURT_GRACE_TICKS: u32 = 45;
    /// Ticks the melee strike stays active (also the re-trigger cooldown)
    pub const ATTACK_TICKS: u32 = 15;
    /// Extra horizontal strike reach per side once the sword is owned
    pub const SWORD_REACH: f32 = 24.0;

    /// Platformer physics (per tick)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_VELOCITY: f32 = -12.0;
    /// Ground line sits this far above the bottom edge
    pub const GROUND_OFFSET: f32 = 40.0;

    /// Backdrop stripe scroll (side-scrolling rulesets)
    pub const BACKDROP_SCROLL_SPEED: f32 = 1.0;
    pub const BACKDROP_STRIPE_SPACING: f32 = 80.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 25.0;
    /// Margin kept free on the right/bottom when scattering arena spawns
    pub const ENEMY_SPAWN_MARGIN: f32 = 30.0;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 120.0;
    pub const BOSS_BASE_HP: i32 = 100;
    pub const BOSS_HP_PER_LEVEL: i32 = 25;
    pub const BOSS_FLOAT_AMPLITUDE: f32 = 1.5;
    pub const BOSS_PATROL_SPEED: f32 = 2.0;
    /// Ticks between boss defeat and the level-clear/win transition
    pub const BOSS_DEFEAT_PAUSE_TICKS: u32 = 30;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_BOSS_DAMAGE: i32 = 1;
    pub const MELEE_BOSS_DAMAGE: i32 = 1;

    /// Item defaults
    pub const ITEM_SIZE: f32 = 20.0;
    pub const ITEM_SPEED: f32 = 2.0;

    /// Rewards per enemy kill
    pub const KILL_SCORE: u64 = 100;
    pub const KILL_RUNES: u64 = 10;

    /// Shop prices (runes)
    pub const LIFE_COST: u64 = 50;
    pub const SHIELD_COST: u64 = 30;
    pub const SWORD_COST: u64 = 100;
}

/// Y coordinate of the ground line in the platformer ruleset
#[inline]
pub fn ground_y() -> f32 {
    consts::WORLD_HEIGHT - consts::GROUND_OFFSET
}
