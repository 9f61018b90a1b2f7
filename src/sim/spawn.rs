//! Spawn scheduling
//!
//! Each spawn source owns a countdown. A source fires when its counter is
//! at or below zero and then resets to its interval.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Boss, Enemy, Item, ItemKind};
use crate::consts::*;
use crate::ground_y;
use crate::rules::{BossMotion, EnemyMotion, Ruleset};

/// Tick countdown gating a periodic spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub remaining: i32,
    pub interval: i32,
}

impl Cooldown {
    /// Fires on the first check
    pub fn new(interval: i32) -> Self {
        Self {
            remaining: 0,
            interval,
        }
    }

    /// First fire after a full interval
    pub fn delayed(interval: i32) -> Self {
        Self {
            remaining: interval,
            interval,
        }
    }

    /// Check once per tick; true when the spawn should happen now
    pub fn ready(&mut self) -> bool {
        if self.remaining <= 0 {
            self.remaining = self.interval;
            true
        } else {
            self.remaining -= 1;
            false
        }
    }
}

/// Spawn timers for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy: Cooldown,
    pub item: Cooldown,
}

impl SpawnTimers {
    pub fn for_level(rules: &Ruleset, level_index: usize) -> Self {
        Self {
            enemy: Cooldown::new(rules.enemy_interval_for(level_index)),
            item: Cooldown::delayed(rules.item_interval),
        }
    }
}

/// New enemy for the current level
pub fn spawn_enemy(rng: &mut Pcg32, rules: &Ruleset, level_index: usize) -> Enemy {
    let speed = rules.enemy_base_speed
        + rng.random::<f32>() * rules.enemy_speed_jitter
        + rules.enemy_speed_per_level * level_index as f32;

    match rules.motion.enemy {
        EnemyMotion::Homing => {
            let x = rng.random::<f32>() * (WORLD_WIDTH - ENEMY_SPAWN_MARGIN);
            let y = rng.random::<f32>() * (WORLD_HEIGHT - ENEMY_SPAWN_MARGIN);
            Enemy::new(x, y, speed)
        }
        EnemyMotion::SideScroll => Enemy::new(WORLD_WIDTH, ground_y() - ENEMY_SIZE, speed),
    }
}

/// New power-up entering from the right edge within jumping reach
pub fn spawn_item(rng: &mut Pcg32) -> Item {
    let kind = if rng.random_bool(0.5) {
        ItemKind::Shield
    } else {
        ItemKind::Sword
    };
    let top = ground_y() - 140.0;
    let bottom = ground_y() - ITEM_SIZE - 10.0;
    let y = rng.random_range(top..bottom);
    Item::new(kind, WORLD_WIDTH, y)
}

/// Boss placed for its motion policy
pub fn spawn_boss(policy: BossMotion, level_index: usize) -> Boss {
    match policy {
        BossMotion::Float => Boss::new(
            WORLD_WIDTH / 2.0 - BOSS_SIZE / 2.0,
            WORLD_HEIGHT / 2.0 - BOSS_SIZE / 2.0,
            level_index,
        ),
        BossMotion::Patrol => Boss::new(
            WORLD_WIDTH - BOSS_SIZE,
            ground_y() - BOSS_SIZE,
            level_index,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_cooldown_fires_then_waits_interval() {
        let mut cd = Cooldown::new(3);
        let fired: Vec<bool> = (0..9).map(|_| cd.ready()).collect();
        assert_eq!(
            fired,
            vec![true, false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn test_delayed_cooldown() {
        let mut cd = Cooldown::delayed(2);
        assert!(!cd.ready());
        assert!(!cd.ready());
        assert!(cd.ready());
    }

    #[test]
    fn test_arena_enemies_inside_world() {
        let mut rng = Pcg32::seed_from_u64(7);
        let rules = Ruleset::arena();
        for _ in 0..200 {
            let enemy = spawn_enemy(&mut rng, &rules, 0);
            assert!(enemy.body.pos.x >= 0.0 && enemy.body.pos.x < WORLD_WIDTH - ENEMY_SPAWN_MARGIN);
            assert!(enemy.body.pos.y >= 0.0 && enemy.body.pos.y < WORLD_HEIGHT - ENEMY_SPAWN_MARGIN);
            assert!(enemy.speed >= 1.0 && enemy.speed < 2.5);
        }
    }

    #[test]
    fn test_side_scroll_enemies_enter_at_trailing_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let rules = Ruleset::platformer();
        let slow = spawn_enemy(&mut rng, &rules, 0);
        assert_eq!(slow.body.pos.x, WORLD_WIDTH);
        assert_eq!(slow.body.pos.y + slow.body.size.y, ground_y());

        let fast = spawn_enemy(&mut rng, &rules, 5);
        assert!(fast.speed >= rules.enemy_base_speed + 5.0 * rules.enemy_speed_per_level);
    }

    #[test]
    fn test_items_reachable() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..100 {
            let item = spawn_item(&mut rng);
            assert_eq!(item.body.pos.x, WORLD_WIDTH);
            assert!(item.body.pos.y + ITEM_SIZE < ground_y());
            assert!(item.speed < 0.0);
        }
    }

    #[test]
    fn test_boss_placement() {
        let floating = spawn_boss(BossMotion::Float, 0);
        assert_eq!(floating.body.pos.x, WORLD_WIDTH / 2.0 - 60.0);
        let patrol = spawn_boss(BossMotion::Patrol, 2);
        assert_eq!(patrol.body.pos.y + BOSS_SIZE, ground_y());
        assert_eq!(patrol.hp, BOSS_BASE_HP + 2 * BOSS_HP_PER_LEVEL);
    }
}
