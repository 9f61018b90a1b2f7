//! Motion policies
//!
//! One policy per entity kind, chosen by the ruleset's `MotionTable` and
//! dispatched with a `match`. Speeds are per tick; diagonal movement is
//! intentionally not normalized.

use glam::Vec2;

use super::entity::{Body, Boss, Enemy, Player};
use crate::consts::*;
use crate::ground_y;
use crate::input::{Key, KeySet};
use crate::rules::{BossMotion, EnemyMotion, PlayerMotion};

/// Move the player for one tick
pub fn advance_player(player: &mut Player, policy: PlayerMotion, keys: KeySet) {
    let speed = player.speed;
    let body = &mut player.body;

    if keys.contains(Key::Right) {
        body.pos.x += speed;
    }
    if keys.contains(Key::Left) {
        body.pos.x -= speed;
    }
    body.pos.x = body.pos.x.clamp(0.0, WORLD_WIDTH - body.size.x);

    match policy {
        PlayerMotion::TopDown => {
            if keys.contains(Key::Up) {
                body.pos.y -= speed;
            }
            if keys.contains(Key::Down) {
                body.pos.y += speed;
            }
            body.pos.y = body.pos.y.clamp(0.0, WORLD_HEIGHT - body.size.y);
        }
        PlayerMotion::Platformer => {
            if keys.contains(Key::Jump) && player.grounded {
                player.vel_y = JUMP_VELOCITY;
                player.grounded = false;
            }
            if !player.grounded {
                player.vel_y += GRAVITY;
            }
            body.pos.y += player.vel_y;

            let floor = ground_y() - body.size.y;
            if body.pos.y >= floor {
                body.pos.y = floor;
                player.vel_y = 0.0;
                player.grounded = true;
            } else if body.pos.y < 0.0 {
                body.pos.y = 0.0;
                player.vel_y = player.vel_y.max(0.0);
            }
        }
    }
}

/// Attack trigger and cooldown. Returns true on the tick a strike starts.
///
/// A held attack key only triggers while the cooldown is zero; the cooldown
/// counts down every tick and ends the strike when it reaches zero.
pub fn update_attack(player: &mut Player, keys: KeySet) -> bool {
    if player.attack_cooldown > 0 {
        player.attack_cooldown -= 1;
        if player.attack_cooldown == 0 {
            player.attacking = false;
        }
        false
    } else if keys.contains(Key::Attack) {
        player.attacking = true;
        player.attack_cooldown = ATTACK_TICKS;
        true
    } else {
        false
    }
}

/// Move an enemy for one tick
pub fn advance_enemy(enemy: &mut Enemy, policy: EnemyMotion, target: Vec2) {
    let pos = &mut enemy.body.pos;
    match policy {
        EnemyMotion::Homing => {
            if pos.x < target.x {
                pos.x += enemy.speed;
            }
            if pos.x > target.x {
                pos.x -= enemy.speed;
            }
            if pos.y < target.y {
                pos.y += enemy.speed;
            }
            if pos.y > target.y {
                pos.y -= enemy.speed;
            }
        }
        EnemyMotion::SideScroll => pos.x -= enemy.speed,
    }
}

/// Move the boss for one tick. `clock_ms` drives the float policy.
pub fn advance_boss(boss: &mut Boss, policy: BossMotion, clock_ms: f64) {
    match policy {
        BossMotion::Float => {
            let t = clock_ms as f32;
            boss.body.pos.x += (t / 500.0).sin() * BOSS_FLOAT_AMPLITUDE;
            boss.body.pos.y += (t / 700.0).cos() * BOSS_FLOAT_AMPLITUDE;
        }
        BossMotion::Patrol => {
            let (lo, hi) = patrol_corridor(&boss.body);
            boss.body.pos.x += boss.dir * BOSS_PATROL_SPEED;
            if boss.body.pos.x <= lo {
                boss.body.pos.x = lo;
                boss.dir = 1.0;
            } else if boss.body.pos.x >= hi {
                boss.body.pos.x = hi;
                boss.dir = -1.0;
            }
        }
    }
}

/// Horizontal bounds the patrolling boss turns around at
pub fn patrol_corridor(body: &Body) -> (f32, f32) {
    (WORLD_WIDTH / 2.0, WORLD_WIDTH - body.size.x)
}

/// Constant horizontal drift. Returns false once fully off-world.
pub fn drift(body: &mut Body, speed: f32) -> bool {
    body.pos.x += speed;
    !body.aabb().fully_outside_x(WORLD_WIDTH)
}
