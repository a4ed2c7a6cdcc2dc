//! Battle notifications.
//!
//! Every externally visible mutation emits one of these. Payloads carry
//! only ids and numbers; subscribers look up whatever else they need in
//! the state they were handed.

use serde::{Deserialize, Serialize};

use crate::core::{AttackTarget, CardId, PlayerId, UnitId};
use crate::effects::EffectTarget;
use crate::rules::GameResult;

/// A state-change notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A card moved from deck to hand.
    CardDrawn { player: PlayerId, card: CardId },

    /// A draw was requested from an empty deck. Nothing moved.
    DeckEmpty { player: PlayerId },

    /// A unit entered the field. `card` is `None` for partners.
    UnitSummoned {
        player: PlayerId,
        card: Option<CardId>,
        unit: UnitId,
    },

    TotemPlaced { player: PlayerId, card: CardId },

    SpellPlayed { player: PlayerId, card: CardId },

    /// HP or MP of a player changed.
    PlayerDataChanged { player: PlayerId },

    /// A unit took damage and survived.
    UnitHpChanged { owner: PlayerId, unit: UnitId, hp: i32 },

    /// A unit left the field.
    UnitDestroyed { owner: PlayerId, unit: UnitId },

    /// A destroyed partner went back to its partner zone.
    PartnerReturned { player: PlayerId, unit: UnitId },

    /// Cards were returned to the deck and redrawn.
    Mulligan { player: PlayerId, count: usize },

    /// Presentation should play an attack and then call
    /// `animation_completed`.
    AttackAnimationRequested {
        attacker: UnitId,
        target: AttackTarget,
    },

    /// Input must choose one of `candidates` (or cancel).
    TargetSelectionStarted {
        player: PlayerId,
        candidates: Vec<EffectTarget>,
    },

    TargetSelectionEnded { player: PlayerId, chosen: EffectTarget },

    TurnStarted { player: PlayerId, turn: u32 },

    GameOver { result: GameResult },
}

impl BattleEvent {
    /// Short dotted name, used as the log message.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BattleEvent::CardDrawn { .. } => "card.drawn",
            BattleEvent::DeckEmpty { .. } => "deck.empty",
            BattleEvent::UnitSummoned { .. } => "unit.summoned",
            BattleEvent::TotemPlaced { .. } => "totem.placed",
            BattleEvent::SpellPlayed { .. } => "spell.played",
            BattleEvent::PlayerDataChanged { .. } => "player.changed",
            BattleEvent::UnitHpChanged { .. } => "unit.hp_changed",
            BattleEvent::UnitDestroyed { .. } => "unit.destroyed",
            BattleEvent::PartnerReturned { .. } => "partner.returned",
            BattleEvent::Mulligan { .. } => "hand.mulligan",
            BattleEvent::AttackAnimationRequested { .. } => "attack.animation_requested",
            BattleEvent::TargetSelectionStarted { .. } => "target.selection_started",
            BattleEvent::TargetSelectionEnded { .. } => "target.selection_ended",
            BattleEvent::TurnStarted { .. } => "turn.started",
            BattleEvent::GameOver { .. } => "game.over",
        }
    }
}
