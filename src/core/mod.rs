//! Core battle types: players, ids, state, actions, RNG, configuration.

pub mod action;
pub mod config;
pub mod ids;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionType, AttackTarget, GameAction};
pub use config::{BattleConfig, DeckOutPolicy};
pub use ids::{CardId, IdAllocator, UnitId};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::{GameState, PlayerData};
