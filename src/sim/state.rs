//! Game state and run context
//!
//! `GameState` owns everything the simulation mutates. Run-scoped totals
//! (runes, score, zone index, bought upgrades) live in `Session` so that a
//! restart resets them in one place.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Boss, Enemy, Item, Player, Projectile};
use super::events::GameEvent;
use super::spawn::{SpawnTimers, spawn_boss};
use crate::consts::*;
use crate::ground_y;
use crate::levels::{Level, LevelTable};
use crate::rules::{BossArrival, PlayerMotion, Ruleset};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Menu,
    /// Active gameplay
    Running,
    /// Boss just fell; short pause before the level-clear/win screen
    Defeating { ticks_left: u32 },
    /// Between levels, buying upgrades
    Shop,
    /// Out of lives
    GameOver,
    /// Final boss defeated
    Won,
}

impl GamePhase {
    /// Whether the shell should keep requesting frames
    pub fn wants_frames(&self) -> bool {
        matches!(self, GamePhase::Running | GamePhase::Defeating { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Player upgrades carried from one level to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub lives: u32,
    pub shield: bool,
    pub sword: bool,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            lives: PLAYER_START_LIVES,
            shield: false,
            sword: false,
        }
    }
}

/// Run-scoped totals, reset by `restart()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub runes: u64,
    pub score: u64,
    pub level_index: usize,
    pub loadout: Loadout,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub rules: Ruleset,
    pub levels: LevelTable,
    pub session: Session,
    pub phase: GamePhase,
    /// Ticks simulated in the current level
    pub time_ticks: u64,
    /// Run score when the current level began; gates a score-triggered boss
    pub level_start_score: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub boss: Option<Boss>,
    pub timers: SpawnTimers,
    /// Horizontal scroll of the backdrop stripes (platformer)
    pub backdrop_offset: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New state sitting on the menu, with level 0 laid out
    pub fn new(seed: u64, rules: Ruleset, levels: LevelTable) -> Self {
        let timers = SpawnTimers::for_level(&rules, 0);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            levels,
            session: Session::default(),
            phase: GamePhase::Menu,
            time_ticks: 0,
            level_start_score: 0,
            player: Player::new(PLAYER_START_LIVES, false, false),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            items: Vec::new(),
            boss: None,
            timers,
            backdrop_offset: 0.0,
            events: Vec::new(),
        };
        state.build_level();
        state.phase = GamePhase::Menu;
        state
    }

    /// Leave the menu and start playing
    pub fn start(&mut self) {
        if self.phase == GamePhase::Menu {
            self.enter_level();
        }
    }

    /// Throw away the run and start again from the first zone
    pub fn restart(&mut self) {
        self.session = Session::default();
        log::info!("Run restarted");
        self.enter_level();
    }

    /// Leave the shop for the next zone, keeping runes and upgrades
    pub fn continue_run(&mut self) {
        if self.phase != GamePhase::Shop {
            log::warn!("continue_run ignored in phase {:?}", self.phase);
            return;
        }
        self.session.level_index += 1;
        self.enter_level();
    }

    pub fn current_level(&self) -> &Level {
        self.levels.get(self.session.level_index)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Store the player's current lives and upgrades for the next level
    pub(crate) fn bank_loadout(&mut self) {
        self.session.loadout = Loadout {
            lives: self.player.lives,
            shield: self.player.shield,
            sword: self.player.sword,
        };
    }

    fn enter_level(&mut self) {
        self.build_level();
        self.phase = GamePhase::Running;
        log::info!(
            "Entering zone {} ({}) with {} lives, {} runes",
            self.session.level_index + 1,
            self.current_level().name,
            self.player.lives,
            self.session.runes
        );
        self.emit(GameEvent::LevelStarted {
            level: self.session.level_index,
        });
    }

    /// Fresh player and empty collections for the current level
    fn build_level(&mut self) {
        let level_index = self.session.level_index;
        let loadout = self.session.loadout;

        let mut player = Player::new(loadout.lives, loadout.shield, loadout.sword);
        if self.rules.motion.player == PlayerMotion::Platformer {
            player.body.pos.y = ground_y() - player.body.size.y;
            player.grounded = true;
        }

        self.player = player;
        self.enemies.clear();
        self.projectiles.clear();
        self.items.clear();
        self.timers = SpawnTimers::for_level(&self.rules, level_index);
        self.time_ticks = 0;
        self.level_start_score = self.session.score;
        self.backdrop_offset = 0.0;
        self.boss = match self.rules.boss_arrival {
            BossArrival::Immediate => Some(spawn_boss(self.rules.motion.boss, level_index)),
            BossArrival::AtScore(_) => None,
        };
    }
}
