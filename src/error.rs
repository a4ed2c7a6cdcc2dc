//! Error types for structural failures surfaced to callers.
//!
//! Ordinary rule rejections (not enough mana, illegal attack, empty deck)
//! are plain `bool`/`Option` results and never appear here.

use thiserror::Error;

use crate::cards::TemplateId;
use crate::core::PlayerId;

/// Structural errors raised by the battle core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("{0} is already registered")]
    PlayerAlreadyRegistered(PlayerId),

    #[error("{0} is not registered")]
    PlayerNotRegistered(PlayerId),

    #[error("Malformed {kind} action: missing {missing}")]
    MalformedAction {
        kind: &'static str,
        missing: &'static str,
    },

    #[error("Unknown card template: {0:?}")]
    UnknownTemplate(TemplateId),

    #[error("{0} can no longer mulligan: the match is under way")]
    MulliganClosed(PlayerId),

    #[error("Battle has not been initialized")]
    NotInitialized,
}

/// Result type using BattleError.
pub type Result<T> = std::result::Result<T, BattleError>;
