//! Per-frame simulation tick
//!
//! One call advances the game by exactly one frame and returns what the
//! shell should draw. Events for screens and sounds are queued on the state.

use serde::{Deserialize, Serialize};

use super::collision::{Aabb, overlaps};
use super::entity::{EntityKind, HitOutcome, ItemKind, Projectile};
use super::events::GameEvent;
use super::motion::{advance_boss, advance_enemy, advance_player, drift, update_attack};
use super::spawn::{spawn_boss, spawn_enemy, spawn_item};
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::input::KeySet;
use crate::rules::{BossArrival, EnemyMotion};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys held at the start of the tick
    pub keys: KeySet,
    /// One-shot ranged attack (mouse click / fire key)
    pub fire: bool,
    /// Wall-clock milliseconds, drives the floating boss
    pub clock_ms: f64,
}

impl TickInput {
    pub fn held(keys: KeySet) -> Self {
        Self {
            keys,
            ..Default::default()
        }
    }
}

/// What a drawn rectangle represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player { shield: bool },
    /// Melee strike area while attacking
    Strike,
    Enemy,
    Boss,
    Projectile,
    Item(ItemKind),
}

impl SpriteKind {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            SpriteKind::Player { .. } | SpriteKind::Strike => EntityKind::Player,
            SpriteKind::Enemy => EntityKind::Enemy,
            SpriteKind::Boss => EntityKind::Boss,
            SpriteKind::Projectile => EntityKind::Projectile,
            SpriteKind::Item(_) => EntityKind::Item,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Aabb,
}

/// HUD values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub lives: u32,
    pub runes: u64,
    pub score: u64,
    pub zone: String,
    /// 0-based zone index
    pub level: usize,
    pub boss_hp: Option<u32>,
    pub boss_max_hp: Option<u32>,
    pub shield: bool,
    pub sword: bool,
    pub phase: GamePhase,
}

/// Everything the shell needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub background: String,
    pub enemy_color: String,
    pub boss_color: String,
    pub backdrop_offset: f32,
    /// Scrolling stripes are drawn (side-scrolling rulesets)
    pub scrolling: bool,
    /// Layered back to front
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> RenderFrame {
    match state.phase {
        GamePhase::Running => step_running(state, input),
        GamePhase::Defeating { ticks_left } => step_defeat_pause(state, ticks_left),
        GamePhase::Menu | GamePhase::Shop | GamePhase::GameOver | GamePhase::Won => {}
    }
    state.render_frame()
}

fn step_running(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    state.player.grace = state.player.grace.saturating_sub(1);
    let motion = state.rules.motion;
    let level_index = state.session.level_index;

    // Backdrop and player
    if motion.enemy == EnemyMotion::SideScroll {
        state.backdrop_offset =
            (state.backdrop_offset + BACKDROP_SCROLL_SPEED) % BACKDROP_STRIPE_SPACING;
    }
    advance_player(&mut state.player, motion.player, input.keys);
    update_attack(&mut state.player, input.keys);
    if input.fire && state.rules.ranged {
        state.projectiles.push(Projectile::from_player(&state.player));
        state.emit(GameEvent::ProjectileFired);
    }

    // Boss
    if let Some(boss) = state.boss.as_mut() {
        advance_boss(boss, motion.boss, input.clock_ms);
    }

    // Spawns
    if state.timers.enemy.ready() {
        let enemy = spawn_enemy(&mut state.rng, &state.rules, level_index);
        log::debug!("Enemy spawned at {:?} speed {:.2}", enemy.body.pos, enemy.speed);
        state.enemies.push(enemy);
    }
    if state.rules.items && state.timers.item.ready() {
        let item = spawn_item(&mut state.rng);
        log::debug!("{:?} item spawned", item.kind);
        state.items.push(item);
    }
    if let BossArrival::AtScore(threshold) = state.rules.boss_arrival {
        let earned = state.session.score.saturating_sub(state.level_start_score);
        if state.boss.is_none() && earned >= threshold {
            state.boss = Some(spawn_boss(motion.boss, level_index));
            log::info!(
                "Boss arrived after {} points this zone (run score {})",
                earned,
                state.session.score
            );
            state.emit(GameEvent::BossArrived);
        }
    }

    // Enemies vs player. The strike box contains the body, so while
    // attacking every touching enemy dies and no hit lands.
    let target = state.player.body.pos;
    let body = state.player.body.aabb();
    let strike = state.player.strike_box();
    let attacking = state.player.attacking;
    let mut kills = 0u64;
    let mut touched = false;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        advance_enemy(enemy, motion.enemy, target);
        let rect = enemy.body.aabb();
        if attacking && overlaps(&strike, &rect) {
            enemy.alive = false;
            kills += 1;
        } else if overlaps(&body, &rect) {
            touched = true;
        }
    }
    reward_kills(state, kills);
    if touched && hurt_player(state) {
        sweep(state);
        return;
    }

    // Projectiles vs enemies and boss
    let mut kills = 0u64;
    let mut boss_hits = Vec::new();
    let mut boss_felled = false;
    for shot in state.projectiles.iter_mut().filter(|p| p.active) {
        if !drift(&mut shot.body, shot.speed) {
            shot.active = false;
            continue;
        }
        let rect = shot.body.aabb();
        if let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.alive && overlaps(&rect, &e.body.aabb()))
        {
            enemy.alive = false;
            shot.active = false;
            kills += 1;
            continue;
        }
        if let Some(boss) = state.boss.as_mut() {
            if !boss.is_defeated() && overlaps(&rect, &boss.body.aabb()) {
                shot.active = false;
                boss_felled |= boss.damage(PROJECTILE_BOSS_DAMAGE);
                boss_hits.push(boss.display_hp());
            }
        }
    }
    reward_kills(state, kills);
    for hp in boss_hits {
        state.emit(GameEvent::BossHit { hp });
    }

    // Items vs player
    let mut collected = Vec::new();
    let player_box = state.player.body.aabb();
    for item in state.items.iter_mut().filter(|i| i.active) {
        if !drift(&mut item.body, item.speed) {
            item.active = false;
            continue;
        }
        if overlaps(&player_box, &item.body.aabb()) {
            item.apply(&mut state.player);
            item.active = false;
            collected.push(item.kind);
        }
    }
    for kind in collected {
        state.emit(GameEvent::ItemCollected(kind));
    }

    // Boss vs player
    let body = state.player.body.aabb();
    let strike = state.player.strike_box();
    let mut player_hit = false;
    let mut melee_hp = None;
    if let Some(boss) = state.boss.as_mut() {
        if !boss.is_defeated() {
            let rect = boss.body.aabb();
            if state.player.attacking && overlaps(&strike, &rect) {
                boss_felled |= boss.damage(MELEE_BOSS_DAMAGE);
                melee_hp = Some(boss.display_hp());
            } else if overlaps(&body, &rect) {
                player_hit = true;
            }
        }
    }
    if let Some(hp) = melee_hp {
        state.emit(GameEvent::BossHit { hp });
    }
    if player_hit && hurt_player(state) {
        sweep(state);
        return;
    }

    sweep(state);

    if state.rules.passive_score {
        state.session.score += 1;
    }

    if boss_felled {
        log::info!("Boss of zone {} defeated", level_index + 1);
        state.phase = GamePhase::Defeating {
            ticks_left: BOSS_DEFEAT_PAUSE_TICKS,
        };
        state.emit(GameEvent::BossDefeated);
    }
}

/// Count down the post-boss pause, then open the shop or end the run
fn step_defeat_pause(state: &mut GameState, ticks_left: u32) {
    if ticks_left > 1 {
        state.phase = GamePhase::Defeating {
            ticks_left: ticks_left - 1,
        };
        return;
    }

    state.bank_loadout();
    let level_index = state.session.level_index;
    if state.levels.is_last(level_index) {
        state.phase = GamePhase::Won;
        log::info!("Run won with {} runes", state.session.runes);
        state.emit(GameEvent::Won {
            total_runes: state.session.runes,
        });
    } else {
        state.phase = GamePhase::Shop;
        log::info!("Zone {} cleared, shop open", level_index + 1);
        state.emit(GameEvent::LevelCleared {
            next_level: level_index + 1,
        });
    }
}

fn reward_kills(state: &mut GameState, kills: u64) {
    if kills == 0 {
        return;
    }
    state.session.score += KILL_SCORE * kills;
    state.session.runes += KILL_RUNES * kills;
    for _ in 0..kills {
        state.emit(GameEvent::EnemySlain);
    }
}

/// Apply one hit to the player unless a recent hit still shields them.
/// Returns true if it ended the run.
fn hurt_player(state: &mut GameState) -> bool {
    if state.player.grace > 0 {
        return false;
    }
    state.player.grace = HURT_GRACE_TICKS;
    match state.player.hit() {
        HitOutcome::Absorbed => {
            state.emit(GameEvent::ShieldBroken);
            false
        }
        HitOutcome::LifeLost(lives) => {
            state.emit(GameEvent::PlayerHurt { lives });
            if lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "Game over in zone {} with {} runes",
                    state.session.level_index + 1,
                    state.session.runes
                );
                state.emit(GameEvent::GameOver);
                true
            } else {
                false
            }
        }
    }
}

/// Drop dead enemies and spent projectiles/items
fn sweep(state: &mut GameState) {
    state
        .enemies
        .retain(|e| e.alive && !e.body.aabb().fully_outside_x(WORLD_WIDTH + ENEMY_SIZE));
    state.projectiles.retain(|p| p.active);
    state.items.retain(|i| i.active);
}

impl GameState {
    /// Snapshot of everything drawable plus HUD values
    pub fn render_frame(&self) -> RenderFrame {
        let level = self.current_level();
        let mut sprites = Vec::with_capacity(
            self.items.len() + self.enemies.len() + self.projectiles.len() + 3,
        );

        sprites.extend(self.items.iter().map(|i| Sprite {
            kind: SpriteKind::Item(i.kind),
            rect: i.body.aabb(),
        }));
        sprites.extend(self.enemies.iter().map(|e| Sprite {
            kind: SpriteKind::Enemy,
            rect: e.body.aabb(),
        }));
        if let Some(boss) = &self.boss {
            sprites.push(Sprite {
                kind: SpriteKind::Boss,
                rect: boss.body.aabb(),
            });
        }
        sprites.extend(self.projectiles.iter().map(|p| Sprite {
            kind: SpriteKind::Projectile,
            rect: p.body.aabb(),
        }));
        if self.player.attacking {
            sprites.push(Sprite {
                kind: SpriteKind::Strike,
                rect: self.player.strike_box(),
            });
        }
        sprites.push(Sprite {
            kind: SpriteKind::Player {
                shield: self.player.shield,
            },
            rect: self.player.body.aabb(),
        });

        // The shop edits the banked loadout, not the finished level's player
        let (lives, shield, sword) = if self.phase == GamePhase::Shop {
            let l = self.session.loadout;
            (l.lives, l.shield, l.sword)
        } else {
            (self.player.lives, self.player.shield, self.player.sword)
        };

        RenderFrame {
            background: level.color.clone(),
            enemy_color: level.enemy_color.clone(),
            boss_color: level.boss_color.clone(),
            backdrop_offset: self.backdrop_offset,
            scrolling: self.rules.motion.enemy == EnemyMotion::SideScroll,
            sprites,
            hud: Hud {
                lives,
                runes: self.session.runes,
                score: self.session.score,
                zone: level.name.clone(),
                level: self.session.level_index,
                boss_hp: self.boss.as_ref().map(|b| b.display_hp()),
                boss_max_hp: self.boss.as_ref().map(|b| b.max_hp.max(0) as u32),
                shield,
                sword,
                phase: self.phase,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::input::Key;
    use crate::levels::LevelTable;
    use crate::rules::Ruleset;
    use crate::sim::entity::{Enemy, Item};
    use crate::sim::spawn::Cooldown;

    /// Running arena state with spawns disabled and the boss parked far away
    fn quiet_arena() -> GameState {
        let mut state = GameState::new(12345, Ruleset::arena(), LevelTable::default());
        state.start();
        state.drain_events();
        state.timers.enemy = Cooldown::delayed(i32::MAX);
        if let Some(boss) = state.boss.as_mut() {
            boss.body.pos = Vec2::new(0.0, 0.0);
        }
        state.player.body.pos = Vec2::new(600.0, 400.0);
        state
    }

    fn enemy_on_player(state: &GameState) -> Enemy {
        let pos = state.player.body.pos;
        Enemy::new(pos.x, pos.y, 0.0)
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut state = GameState::new(1, Ruleset::arena(), LevelTable::default());
        let frame = tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert!(state.enemies.is_empty());
        assert_eq!(frame.hud.phase, GamePhase::Menu);
        assert_eq!(frame.hud.zone, "Enchanted Forest");
    }

    #[test]
    fn test_first_tick_spawns_enemy() {
        let mut state = GameState::new(1, Ruleset::arena(), LevelTable::default());
        state.start();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);

        // Clear each tick so nothing reaches the player
        let mut spawned = 0;
        for _ in 0..202 {
            state.enemies.clear();
            tick(&mut state, &TickInput::default());
            spawned += state.enemies.len();
        }
        assert_eq!(spawned, 2);
    }

    #[test]
    fn test_touch_costs_a_life() {
        let mut state = quiet_arena();
        let enemy = enemy_on_player(&state);
        state.enemies.push(enemy);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, PLAYER_START_LIVES - 1);
        assert!(state.drain_events().contains(&GameEvent::PlayerHurt { lives: 2 }));
    }

    #[test]
    fn test_shield_then_life() {
        let mut state = quiet_arena();
        state.player.shield = true;
        let enemy = enemy_on_player(&state);
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default());
        assert!(!state.player.shield);
        assert_eq!(state.player.lives, PLAYER_START_LIVES);

        for _ in 0..HURT_GRACE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.lives, PLAYER_START_LIVES - 1);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::ShieldBroken);
        assert_eq!(events[1], GameEvent::PlayerHurt { lives: 2 });
    }

    #[test]
    fn test_grace_after_hit() {
        let mut state = quiet_arena();
        let enemy = enemy_on_player(&state);
        state.enemies.push(enemy);
        // A second enemy on the same tick does not double the damage
        let enemy = enemy_on_player(&state);
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, PLAYER_START_LIVES - 1);
        assert_eq!(state.player.grace, HURT_GRACE_TICKS);

        for _ in 1..HURT_GRACE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.lives, PLAYER_START_LIVES - 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, PLAYER_START_LIVES - 2);
    }

    #[test]
    fn test_arena_level_starts_clear_of_boss() {
        let mut state = GameState::new(1, Ruleset::arena(), LevelTable::default());
        state.start();
        state.timers.enemy = Cooldown::delayed(i32::MAX);
        let boss = state.boss.as_ref().map(|b| b.body.aabb());
        assert!(boss.is_some_and(|b| !overlaps(&b, &state.player.body.aabb())));

        for i in 0..600 {
            let input = TickInput {
                clock_ms: i as f64 * 1000.0 / 60.0,
                ..Default::default()
            };
            tick(&mut state, &input);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.lives, PLAYER_START_LIVES);
    }

    #[test]
    fn test_attacking_kills_and_rewards() {
        let mut state = quiet_arena();
        let enemy = enemy_on_player(&state);
        state.enemies.push(enemy);

        let frame = tick(&mut state, &TickInput::held(KeySet::empty().with(Key::Attack)));
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.lives, PLAYER_START_LIVES);
        assert_eq!(state.session.score, KILL_SCORE);
        assert_eq!(state.session.runes, KILL_RUNES);
        assert_eq!(frame.hud.runes, KILL_RUNES);
        assert!(frame.sprites.iter().any(|s| s.kind == SpriteKind::Strike));
        assert_eq!(state.drain_events(), vec![GameEvent::EnemySlain]);
    }

    #[test]
    fn test_sword_reaches_further() {
        let mut state = quiet_arena();
        let pos = state.player.body.pos;
        // Just right of the body, inside sword reach
        state
            .enemies
            .push(Enemy::new(pos.x + PLAYER_WIDTH + 10.0, pos.y, 0.0));
        let attack = TickInput::held(KeySet::empty().with(Key::Attack));

        tick(&mut state, &attack);
        assert_eq!(state.enemies.len(), 1);

        state.player.sword = true;
        state.player.attack_cooldown = 0;
        state.player.attacking = false;
        tick(&mut state, &attack);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_projectile_kills_one_enemy_only() {
        let mut state = quiet_arena();
        let pos = state.player.body.pos;
        let lane_y = pos.y + PLAYER_HEIGHT / 2.0 - 10.0;
        state.enemies.push(Enemy::new(pos.x + PLAYER_WIDTH + 4.0, lane_y, 0.0));
        state.enemies.push(Enemy::new(pos.x + PLAYER_WIDTH + 6.0, lane_y, 0.0));

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.session.runes, KILL_RUNES);
    }

    #[test]
    fn test_projectile_leaves_world() {
        let mut state = quiet_arena();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.projectiles.len(), 1);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_damages_boss() {
        let mut state = quiet_arena();
        let start_hp = state.boss.as_ref().map(|b| b.hp).unwrap_or_default();
        let mut shot = Projectile::from_player(&state.player);
        shot.body.pos = Vec2::new(50.0, 50.0);
        state.projectiles.push(shot);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.boss.as_ref().map(|b| b.hp), Some(start_hp - 1));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_no_fire_without_ranged_rules() {
        let mut state = GameState::new(3, Ruleset::platformer(), LevelTable::default());
        state.start();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_item_pickup() {
        let mut state = quiet_arena();
        let pos = state.player.body.pos;
        state
            .items
            .push(Item::new(ItemKind::Shield, pos.x + 5.0, pos.y + 5.0));
        tick(&mut state, &TickInput::default());
        assert!(state.player.shield);
        assert!(state.items.is_empty());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ItemCollected(ItemKind::Shield))
        );
    }

    #[test]
    fn test_boss_contact_hurts() {
        let mut state = quiet_arena();
        let pos = state.player.body.pos;
        if let Some(boss) = state.boss.as_mut() {
            boss.body.pos = pos - Vec2::new(10.0, 10.0);
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, PLAYER_START_LIVES - 1);
    }

    #[test]
    fn test_defeat_pause_then_shop() {
        let mut state = quiet_arena();
        let pos = state.player.body.pos;
        if let Some(boss) = state.boss.as_mut() {
            boss.body.pos = pos - Vec2::new(10.0, 10.0);
            boss.hp = 1;
        }
        tick(&mut state, &TickInput::held(KeySet::empty().with(Key::Attack)));
        assert_eq!(
            state.phase,
            GamePhase::Defeating {
                ticks_left: BOSS_DEFEAT_PAUSE_TICKS
            }
        );

        let mut ticks = 0;
        while state.phase != GamePhase::Shop {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks <= BOSS_DEFEAT_PAUSE_TICKS);
        }
        assert_eq!(ticks, BOSS_DEFEAT_PAUSE_TICKS);

        let events = state.drain_events();
        let cleared = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelCleared { next_level: 1 }))
            .count();
        assert_eq!(cleared, 1);
        assert_eq!(state.session.loadout.lives, state.player.lives);

        // Shop is paused
        let before = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, before);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_passive_score_and_lazy_boss() {
        let mut state = GameState::new(8, Ruleset::platformer(), LevelTable::default());
        state.start();
        state.drain_events();
        state.timers.enemy = Cooldown::delayed(i32::MAX);
        state.timers.item = Cooldown::delayed(i32::MAX);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.score, 1);
        assert!(state.boss.is_none());

        state.session.score = 1500;
        tick(&mut state, &TickInput::default());
        assert!(state.boss.is_some());
        assert!(state.drain_events().contains(&GameEvent::BossArrived));

        // One-shot: a second threshold crossing does not replace it
        let hp = state.boss.as_ref().map(|b| b.hp);
        state.session.score = 5000;
        tick(&mut state, &TickInput::default());
        assert!(!state.drain_events().contains(&GameEvent::BossArrived));
        assert_eq!(state.boss.as_ref().map(|b| b.hp), hp);
    }

    #[test]
    fn test_boss_threshold_counts_from_level_start() {
        let mut state = GameState::new(8, Ruleset::platformer(), LevelTable::default());
        state.start();
        state.session.score = 1600;
        state.phase = GamePhase::Shop;
        state.continue_run();
        assert_eq!(state.level_start_score, 1600);
        state.timers.enemy = Cooldown::delayed(i32::MAX);
        state.timers.item = Cooldown::delayed(i32::MAX);

        tick(&mut state, &TickInput::default());
        assert!(state.boss.is_none());

        state.session.score = 1600 + 1499;
        tick(&mut state, &TickInput::default());
        assert!(state.boss.is_none());

        state.session.score = 1600 + 1500;
        tick(&mut state, &TickInput::default());
        assert!(state.boss.is_some());
    }

    #[test]
    fn test_backdrop_scrolls_in_side_scroller() {
        let mut state = GameState::new(8, Ruleset::platformer(), LevelTable::default());
        state.start();
        let frame = tick(&mut state, &TickInput::default());
        assert!(frame.scrolling);
        assert_eq!(frame.backdrop_offset, BACKDROP_SCROLL_SPEED);
    }

    #[test]
    fn test_render_layers_player_last() {
        let mut state = quiet_arena();
        let enemy = Enemy::new(10.0, 300.0, 0.0);
        state.enemies.push(enemy);
        let frame = tick(&mut state, &TickInput::default());
        let kinds: Vec<EntityKind> = frame.sprites.iter().map(|s| s.kind.entity_kind()).collect();
        assert_eq!(kinds.last(), Some(&EntityKind::Player));
        assert_eq!(kinds.first(), Some(&EntityKind::Enemy));
        assert_eq!(frame.hud.boss_hp, Some(BOSS_BASE_HP as u32));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Ruleset::platformer(), LevelTable::default());
        let mut b = GameState::new(99999, Ruleset::platformer(), LevelTable::default());
        a.start();
        b.start();
        let inputs = [
            TickInput::held(KeySet::empty().with(Key::Right)),
            TickInput::held(KeySet::empty().with(Key::Jump)),
            TickInput::held(KeySet::empty().with(Key::Attack)),
            TickInput::default(),
        ];
        for _ in 0..300 {
            for input in &inputs {
                let fa = tick(&mut a, input);
                let fb = tick(&mut b, input);
                assert_eq!(fa, fb);
            }
        }
    }
}
