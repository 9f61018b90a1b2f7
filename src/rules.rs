//! Rulesets
//!
//! A ruleset picks one motion policy per entity kind plus the spawn and
//! scoring switches. Two presets ship: a top-down arena with ranged shots
//! and a side-scrolling platformer with items.

use serde::{Deserialize, Serialize};

/// Preset selector (persisted in settings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RulesetKind {
    #[default]
    Arena,
    Platformer,
}

impl RulesetKind {
    pub const ALL: [RulesetKind; 2] = [RulesetKind::Arena, RulesetKind::Platformer];

    /// The preset after this one, wrapping around
    pub fn next(&self) -> Self {
        match self {
            RulesetKind::Arena => RulesetKind::Platformer,
            RulesetKind::Platformer => RulesetKind::Arena,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RulesetKind::Arena => "Arena",
            RulesetKind::Platformer => "Platformer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arena" | "topdown" | "top-down" => Some(RulesetKind::Arena),
            "platformer" | "platform" => Some(RulesetKind::Platformer),
            _ => None,
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        match self {
            RulesetKind::Arena => Ruleset::arena(),
            RulesetKind::Platformer => Ruleset::platformer(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMotion {
    /// Four-directional movement clamped to the world
    TopDown,
    /// Horizontal movement with gravity and jumping
    Platformer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Step toward the player on each axis
    Homing,
    /// Constant leftward drift
    SideScroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossMotion {
    /// Clock-driven sinusoidal float
    Float,
    /// Horizontal triangle-wave patrol in the right half of the world
    Patrol,
}

/// Motion policy per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionTable {
    pub player: PlayerMotion,
    pub enemy: EnemyMotion,
    pub boss: BossMotion,
}

/// When the boss enters a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossArrival {
    /// Present from level start
    Immediate,
    /// Arrives once the run score reaches the threshold
    AtScore(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub motion: MotionTable,
    pub boss_arrival: BossArrival,
    /// `fire` input launches projectiles
    pub ranged: bool,
    /// Power-up items drift in
    pub items: bool,
    /// +1 score every running tick
    pub passive_score: bool,
    /// Base enemy spawn interval (ticks)
    pub enemy_interval: i32,
    /// Interval reduction per level index
    pub enemy_interval_per_level: i32,
    /// Interval floor
    pub enemy_interval_min: i32,
    pub enemy_base_speed: f32,
    /// Width of the random speed bonus
    pub enemy_speed_jitter: f32,
    pub enemy_speed_per_level: f32,
    pub item_interval: i32,
}

impl Ruleset {
    /// Top-down arena: homing enemies, floating boss, projectiles
    pub fn arena() -> Self {
        Self {
            motion: MotionTable {
                player: PlayerMotion::TopDown,
                enemy: EnemyMotion::Homing,
                boss: BossMotion::Float,
            },
            boss_arrival: BossArrival::Immediate,
            ranged: true,
            items: false,
            passive_score: false,
            enemy_interval: 100,
            enemy_interval_per_level: 0,
            enemy_interval_min: 100,
            enemy_base_speed: 1.0,
            enemy_speed_jitter: 1.5,
            enemy_speed_per_level: 0.1,
            item_interval: 600,
        }
    }

    /// Side-scrolling platformer: gravity, patrolling boss, items
    pub fn platformer() -> Self {
        Self {
            motion: MotionTable {
                player: PlayerMotion::Platformer,
                enemy: EnemyMotion::SideScroll,
                boss: BossMotion::Patrol,
            },
            boss_arrival: BossArrival::AtScore(1500),
            ranged: false,
            items: true,
            passive_score: true,
            enemy_interval: 90,
            enemy_interval_per_level: 5,
            enemy_interval_min: 40,
            enemy_base_speed: 2.0,
            enemy_speed_jitter: 1.5,
            enemy_speed_per_level: 0.3,
            item_interval: 600,
        }
    }

    /// Enemy spawn interval for a level
    pub fn enemy_interval_for(&self, level_index: usize) -> i32 {
        let reduction = self.enemy_interval_per_level * level_index as i32;
        (self.enemy_interval - reduction).max(self.enemy_interval_min)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::arena()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_interval_scaling() {
        let rules = Ruleset::platformer();
        assert_eq!(rules.enemy_interval_for(0), 90);
        assert_eq!(rules.enemy_interval_for(4), 70);
        assert_eq!(rules.enemy_interval_for(20), 40);

        let arena = Ruleset::arena();
        assert_eq!(arena.enemy_interval_for(9), 100);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in RulesetKind::ALL {
            assert_eq!(RulesetKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(kind.next().next(), kind);
        }
        assert_eq!(RulesetKind::from_str("nope"), None);
    }
}
