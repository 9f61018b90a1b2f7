//! Events emitted by the simulation for the presentation shell

use serde::{Deserialize, Serialize};

use super::entity::ItemKind;
use super::shop::ShopItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level began (fresh run or continue from the shop)
    LevelStarted { level: usize },
    EnemySlain,
    /// Player hit with no shield
    PlayerHurt { lives: u32 },
    ShieldBroken,
    ItemCollected(ItemKind),
    ProjectileFired,
    BossArrived,
    BossHit { hp: u32 },
    BossDefeated,
    /// Lives reached zero
    GameOver,
    /// Boss of a non-final level defeated; the shop is open
    LevelCleared { next_level: usize },
    /// Final boss defeated
    Won { total_runes: u64 },
    Purchased(ShopItem),
}

/// Screen/sound callbacks the shell implements. All default to no-ops.
pub trait Presenter {
    fn on_game_over(&mut self) {}
    fn on_level_cleared(&mut self, _next_level: usize) {}
    fn on_win(&mut self, _total_runes: u64) {}
    /// Every event, including the three above, for sound and HUD effects
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Route drained events to a presenter
pub fn dispatch<P: Presenter + ?Sized>(events: &[GameEvent], presenter: &mut P) {
    for event in events {
        presenter.on_event(event);
        match *event {
            GameEvent::GameOver => presenter.on_game_over(),
            GameEvent::LevelCleared { next_level } => presenter.on_level_cleared(next_level),
            GameEvent::Won { total_runes } => presenter.on_win(total_runes),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        game_overs: u32,
        cleared: Vec<usize>,
        wins: Vec<u64>,
        seen: usize,
    }

    impl Presenter for Recorder {
        fn on_game_over(&mut self) {
            self.game_overs += 1;
        }
        fn on_level_cleared(&mut self, next_level: usize) {
            self.cleared.push(next_level);
        }
        fn on_win(&mut self, total_runes: u64) {
            self.wins.push(total_runes);
        }
        fn on_event(&mut self, _event: &GameEvent) {
            self.seen += 1;
        }
    }

    #[test]
    fn test_dispatch_routes_terminal_events() {
        let events = [
            GameEvent::EnemySlain,
            GameEvent::LevelCleared { next_level: 3 },
            GameEvent::GameOver,
            GameEvent::Won { total_runes: 420 },
        ];
        let mut rec = Recorder::default();
        dispatch(&events, &mut rec);
        assert_eq!(rec.seen, 4);
        assert_eq!(rec.game_overs, 1);
        assert_eq!(rec.cleared, vec![3]);
        assert_eq!(rec.wins, vec![420]);
    }
}
