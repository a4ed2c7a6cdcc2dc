//! Battle rules: attack legality, combat resolution and match outcome.

pub mod combat;

pub use combat::{
    attack_targets, can_attack_player, can_attack_unit, resolve_player_attack, resolve_unit_attack,
    trade_blows, AttackOutcome,
};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players fell in the same step.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Decide the outcome from both HP totals, if the match is over.
    #[must_use]
    pub fn from_hp(hp0: i32, hp1: i32) -> Option<Self> {
        match (hp0 <= 0, hp1 <= 0) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::new(1))),
            (false, true) => Some(GameResult::Winner(PlayerId::new(0))),
            (false, false) => None,
        }
    }
}
