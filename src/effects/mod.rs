//! Effect and target resolution.
//!
//! ## Key Types
//!
//! - `EffectKind`: Tagged on-summon/spell behaviors
//! - `EffectTarget`: None, a unit, or a player
//! - `TargetSelector`: Immediate vs. suspended (interactive) selection
//! - `BattleView`: What effects mutate; `LiveView` for canonical state,
//!   `GameState` for simulation
//! - `resolve_effect`: Live resolution plus the notification sync pass

pub mod effect;
pub mod resolver;
pub mod targeting;
pub mod view;

pub use effect::EffectKind;
pub use resolver::{resolve_effect, EffectReport};
pub use targeting::{EffectTarget, GamePhase, PendingSelection, Selection, TargetRequest, TargetSelector};
pub use view::{BattleView, LiveView};
