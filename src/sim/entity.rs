//! Entity types
//!
//! The entity set is closed: player, enemies, one boss, projectiles and
//! items. Each kind embeds a `Body`; kind-specific state lives alongside it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Entity kind tag (render layering and motion dispatch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Projectile,
    Item,
}

/// Position and size shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// Outcome of a hit on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Shield soaked the hit and is gone
    Absorbed,
    /// A life was lost; carries the remaining count
    LifeLost(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    pub speed: f32,
    /// Vertical velocity (platformer only)
    pub vel_y: f32,
    /// Standing on the ground line (platformer only)
    pub grounded: bool,
    pub attacking: bool,
    pub attack_cooldown: u32,
    pub shield: bool,
    pub sword: bool,
    /// Ticks left before contact can hurt again
    pub grace: u32,
}

impl Player {
    /// New player in the left third, vertically centred
    pub fn new(lives: u32, shield: bool, sword: bool) -> Self {
        Self {
            body: Body::new(
                PLAYER_START_X,
                WORLD_HEIGHT / 2.0 - PLAYER_HEIGHT / 2.0,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            lives,
            speed: PLAYER_SPEED,
            vel_y: 0.0,
            grounded: false,
            attacking: false,
            attack_cooldown: 0,
            shield,
            sword,
            grace: 0,
        }
    }

    /// Melee strike box: the body, widened when the sword is owned
    pub fn strike_box(&self) -> Aabb {
        if self.sword {
            self.body.aabb().widened(SWORD_REACH)
        } else {
            self.body.aabb()
        }
    }

    /// Take one hit: the shield goes first, then a life
    pub fn hit(&mut self) -> HitOutcome {
        if self.shield {
            self.shield = false;
            HitOutcome::Absorbed
        } else {
            self.lives = self.lives.saturating_sub(1);
            HitOutcome::LifeLost(self.lives)
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub speed: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            body: Body::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            speed,
            alive: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub body: Body,
    pub hp: i32,
    pub max_hp: i32,
    /// Patrol direction (+1 right, -1 left)
    pub dir: f32,
}

impl Boss {
    /// Boss with level-scaled HP at the given position
    pub fn new(x: f32, y: f32, level_index: usize) -> Self {
        let hp = BOSS_BASE_HP + BOSS_HP_PER_LEVEL * level_index as i32;
        Self {
            body: Body::new(x, y, BOSS_SIZE, BOSS_SIZE),
            hp,
            max_hp: hp,
            dir: -1.0,
        }
    }

    /// Apply damage, returning true on the hit that defeats the boss
    pub fn damage(&mut self, amount: i32) -> bool {
        let was_alive = self.hp > 0;
        self.hp -= amount;
        was_alive && self.hp <= 0
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// HP clamped for display
    pub fn display_hp(&self) -> u32 {
        self.hp.max(0) as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Signed horizontal speed per tick
    pub speed: f32,
    pub active: bool,
}

impl Projectile {
    /// Projectile leaving the player's right edge at mid height
    pub fn from_player(player: &Player) -> Self {
        Self {
            body: Body::new(
                player.body.right(),
                player.body.center_y() - PROJECTILE_HEIGHT / 2.0,
                PROJECTILE_WIDTH,
                PROJECTILE_HEIGHT,
            ),
            speed: PROJECTILE_SPEED,
            active: true,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Shield,
    Sword,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub body: Body,
    pub kind: ItemKind,
    /// Signed horizontal speed per tick
    pub speed: f32,
    pub active: bool,
}

impl Item {
    pub fn new(kind: ItemKind, x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, ITEM_SIZE, ITEM_SIZE),
            kind,
            speed: -ITEM_SPEED,
            active: true,
        }
    }

    /// Grant the item's effect
    pub fn apply(&self, player: &mut Player) {
        match self.kind {
            ItemKind::Shield => player.shield = true,
            ItemKind::Sword => player.sword = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_absorbs_one_hit() {
        let mut player = Player::new(3, true, false);
        assert_eq!(player.hit(), HitOutcome::Absorbed);
        assert!(!player.shield);
        assert_eq!(player.lives, 3);

        assert_eq!(player.hit(), HitOutcome::LifeLost(2));
        assert_eq!(player.lives, 2);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut player = Player::new(1, false, false);
        assert_eq!(player.hit(), HitOutcome::LifeLost(0));
        assert!(player.is_dead());
        assert_eq!(player.hit(), HitOutcome::LifeLost(0));
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_sword_widens_strike() {
        let mut player = Player::new(3, false, false);
        let base = player.strike_box();
        player.sword = true;
        let long = player.strike_box();
        assert_eq!(long.size.x, base.size.x + 2.0 * SWORD_REACH);
        assert_eq!(long.min.y, base.min.y);
    }

    #[test]
    fn test_boss_damage_reports_defeat_once() {
        let mut boss = Boss::new(0.0, 0.0, 0);
        assert_eq!(boss.hp, BOSS_BASE_HP);
        boss.hp = 2;
        assert!(!boss.damage(1));
        assert!(boss.damage(1));
        assert!(!boss.damage(1));
        assert_eq!(boss.display_hp(), 0);
    }

    #[test]
    fn test_boss_hp_scales_with_level() {
        assert_eq!(Boss::new(0.0, 0.0, 4).max_hp, BOSS_BASE_HP + 4 * BOSS_HP_PER_LEVEL);
    }

    #[test]
    fn test_projectile_spawns_at_right_edge() {
        let player = Player::new(3, false, false);
        let shot = Projectile::from_player(&player);
        assert_eq!(shot.body.pos.x, player.body.right());
        assert!(shot.speed > 0.0);
        assert!(shot.active);
    }

    #[test]
    fn test_item_apply() {
        let mut player = Player::new(3, false, false);
        Item::new(ItemKind::Sword, 0.0, 0.0).apply(&mut player);
        assert!(player.sword);
        Item::new(ItemKind::Shield, 0.0, 0.0).apply(&mut player);
        assert!(player.shield);
    }
}
