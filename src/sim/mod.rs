//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame)
//! - Seeded RNG only
//! - Wall-clock time only through `TickInput::clock_ms`
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod events;
pub mod motion;
pub mod shop;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use entity::{Boss, Enemy, EntityKind, HitOutcome, Item, ItemKind, Player, Projectile};
pub use events::{GameEvent, Presenter, dispatch};
pub use shop::{PurchaseError, ShopItem};
pub use state::{GamePhase, GameState, Loadout, Session};
pub use tick::{Hud, RenderFrame, Sprite, SpriteKind, TickInput, tick};
