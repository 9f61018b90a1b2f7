//! Between-level shop

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopItem {
    ExtraLife,
    Shield,
    Sword,
}

impl ShopItem {
    pub const ALL: [ShopItem; 3] = [ShopItem::ExtraLife, ShopItem::Shield, ShopItem::Sword];

    pub fn cost(&self) -> u64 {
        match self {
            ShopItem::ExtraLife => LIFE_COST,
            ShopItem::Shield => SHIELD_COST,
            ShopItem::Sword => SWORD_COST,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShopItem::ExtraLife => "Extra Life",
            ShopItem::Shield => "Shield",
            ShopItem::Sword => "Sword",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("the shop is closed")]
    ShopClosed,
    #[error("need {cost} runes, have {balance}")]
    InsufficientRunes { cost: u64, balance: u64 },
    #[error("{} already owned", .0.as_str())]
    AlreadyOwned(ShopItem),
}

impl GameState {
    /// Buy an upgrade. Returns the new rune balance.
    ///
    /// Failed purchases leave runes and loadout untouched.
    pub fn purchase(&mut self, item: ShopItem) -> Result<u64, PurchaseError> {
        if self.phase != GamePhase::Shop {
            return Err(PurchaseError::ShopClosed);
        }

        let loadout = &mut self.session.loadout;
        let owned = match item {
            ShopItem::ExtraLife => false,
            ShopItem::Shield => loadout.shield,
            ShopItem::Sword => loadout.sword,
        };
        if owned {
            return Err(PurchaseError::AlreadyOwned(item));
        }

        let cost = item.cost();
        let balance = self.session.runes;
        if balance < cost {
            return Err(PurchaseError::InsufficientRunes { cost, balance });
        }

        self.session.runes -= cost;
        match item {
            ShopItem::ExtraLife => loadout.lives += 1,
            ShopItem::Shield => loadout.shield = true,
            ShopItem::Sword => loadout.sword = true,
        }

        log::info!(
            "Bought {} for {} runes ({} left)",
            item.as_str(),
            cost,
            self.session.runes
        );
        self.emit(GameEvent::Purchased(item));
        Ok(self.session.runes)
    }
}
