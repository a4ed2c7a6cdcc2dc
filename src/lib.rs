//! # card-battle
//!
//! Simulation core for a two-player, turn-based card battle.
//!
//! ## Design Principles
//!
//! 1. **One owner for canonical state**: The `ZoneManager` owns both
//!    players' data. Everything else borrows it or works on a `GameState`
//!    deep copy.
//!
//! 2. **Serialized mutation**: Every change to canonical state runs inside
//!    one action from a single-consumer queue. An action may suspend for an
//!    attack animation or an interactive target choice; nothing else runs
//!    until it completes.
//!
//! 3. **No globals**: A `Battle` is constructed per match and carries its
//!    config, RNG, queue, selector and planner.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`, so
//!   the planner can simulate freely.
//!
//! - **Deterministic RNG**: ChaCha8 seeded from `BattleConfig::seed`.
//!
//! - **Ids, not references**: Actions name cards and units by id and are
//!   re-resolved against canonical state when they execute.
//!
//! ## Modules
//!
//! - `core`: Ids, players, config, RNG, player data, snapshots, actions
//! - `cards`: Templates, instances, registry, deck recipes
//! - `zones`: Fields, partner zones and the zone/resource manager
//! - `events`: Change notifications and the event bus
//! - `rules`: Attack legality, combat resolution, match result
//! - `effects`: Effect library, target protocol, live resolution
//! - `pipeline`: Action queue and suspension state
//! - `ai`: Greedy one-ply planner
//! - `flow`: The `Battle` context and turn flow

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod events;
pub mod flow;
pub mod pipeline;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionType, AttackTarget, BattleConfig, CardId, DeckOutPolicy, GameAction, GameRng, GameState, PlayerData,
    PlayerId, PlayerMap, UnitId,
};

pub use crate::cards::{Card, CardKind, CardRegistry, CardTemplate, DeckRecipe, Keyword, Keywords, PartnerDefinition, TemplateId};

pub use crate::zones::{FieldZone, PartnerZone, Unit, ZoneManager};

pub use crate::events::{BattleEvent, EventBus};

pub use crate::rules::{AttackOutcome, GameResult};

pub use crate::effects::{BattleView, EffectKind, EffectTarget, GamePhase, TargetSelector};

pub use crate::pipeline::{ActionQueue, PipelineState};

pub use crate::ai::{EvalWeights, Planner};

pub use crate::flow::{Battle, PlayerSetup};

pub use crate::error::{BattleError, Result};
