//! Game actions submitted to the execution pipeline.
//!
//! Actions are plain values that refer to cards and units by id. They may
//! be produced from an AI snapshot, so the pipeline re-resolves every id
//! against canonical state at execution time; an id is never a handle into
//! a particular copy.

use serde::{Deserialize, Serialize};

use super::ids::{CardId, UnitId};
use super::player::PlayerId;
use crate::effects::EffectTarget;

/// What kind of action this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Play,
    Attack,
    TurnEnd,
    SummonPartner,
}

impl ActionType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActionType::Play => "play",
            ActionType::Attack => "attack",
            ActionType::TurnEnd => "turn_end",
            ActionType::SummonPartner => "summon_partner",
        }
    }
}

/// Target of an attack: an opposing unit or the opposing player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    Unit(UnitId),
    Player(PlayerId),
}

/// A queued action.
///
/// Construct with the typed helpers; the optional fields exist because an
/// action is a value that any producer may submit, and a dequeued action
/// missing a required field is a pipeline error.
///
/// ```
/// use card_battle::core::{ActionType, AttackTarget, CardId, GameAction, PlayerId, UnitId};
/// use card_battle::effects::EffectTarget;
///
/// let play = GameAction::play(CardId(3)).with_effect_target(EffectTarget::Unit(UnitId(8)));
/// assert_eq!(play.action_type, ActionType::Play);
///
/// let swing = GameAction::attack_player(UnitId(1), PlayerId::new(1));
/// assert_eq!(swing.target, Some(AttackTarget::Player(PlayerId::new(1))));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAction {
    pub action_type: ActionType,
    /// Card to play (Play).
    pub source_card: Option<CardId>,
    /// Attacking unit (Attack).
    pub source_unit: Option<UnitId>,
    /// Attack target (Attack).
    pub target: Option<AttackTarget>,
    /// Pre-selected effect target; skips target selection when legal.
    pub effect_target: Option<EffectTarget>,
    /// Acting player (TurnEnd, SummonPartner).
    pub player: Option<PlayerId>,
}

impl GameAction {
    fn empty(action_type: ActionType) -> Self {
        Self {
            action_type,
            source_card: None,
            source_unit: None,
            target: None,
            effect_target: None,
            player: None,
        }
    }

    /// Play a card from hand.
    #[must_use]
    pub fn play(card: CardId) -> Self {
        Self {
            source_card: Some(card),
            ..Self::empty(ActionType::Play)
        }
    }

    /// Attack an opposing unit.
    #[must_use]
    pub fn attack_unit(attacker: UnitId, defender: UnitId) -> Self {
        Self {
            source_unit: Some(attacker),
            target: Some(AttackTarget::Unit(defender)),
            ..Self::empty(ActionType::Attack)
        }
    }

    /// Attack the opposing player.
    #[must_use]
    pub fn attack_player(attacker: UnitId, player: PlayerId) -> Self {
        Self {
            source_unit: Some(attacker),
            target: Some(AttackTarget::Player(player)),
            ..Self::empty(ActionType::Attack)
        }
    }

    /// Attack with an arbitrary target.
    #[must_use]
    pub fn attack(attacker: UnitId, target: AttackTarget) -> Self {
        Self {
            source_unit: Some(attacker),
            target: Some(target),
            ..Self::empty(ActionType::Attack)
        }
    }

    /// End `player`'s turn.
    #[must_use]
    pub fn turn_end(player: PlayerId) -> Self {
        Self {
            player: Some(player),
            ..Self::empty(ActionType::TurnEnd)
        }
    }

    /// Summon `player`'s partner from the partner zone.
    #[must_use]
    pub fn summon_partner(player: PlayerId) -> Self {
        Self {
            player: Some(player),
            ..Self::empty(ActionType::SummonPartner)
        }
    }

    /// An action with only its type set. Used by producers that fill
    /// fields themselves.
    #[must_use]
    pub fn bare(action_type: ActionType) -> Self {
        Self::empty(action_type)
    }

    /// Pre-select the target of the effect this action triggers.
    #[must_use]
    pub fn with_effect_target(mut self, target: EffectTarget) -> Self {
        self.effect_target = Some(target);
        self
    }
}
