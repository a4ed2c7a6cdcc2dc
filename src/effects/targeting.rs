//! Effect targeting protocol.
//!
//! Defines how a triggered effect gets its target:
//! - `EffectTarget`: The argument/result type (nothing, a unit, a player)
//! - `TargetSelector`: Decides between immediate resolution and suspending
//!   for interactive input
//! - `GamePhase`: The coarse mode input collaborators read to gate play
//!
//! ## Protocol
//!
//! Resolution is immediate when the acting player is not the interactive
//! side, or when there are fewer than two candidates (the first candidate,
//! or `EffectTarget::None`). Otherwise the selector records a pending
//! selection, the phase becomes `TargetSelection`, and the caller waits
//! until `confirm` or `cancel` is called. There is no timeout.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, UnitId};

/// Target of an effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    #[default]
    None,
    Unit(UnitId),
    Player(PlayerId),
}

/// Coarse global input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Normal,
    /// Ordinary play/attack/end-turn input is suspended.
    TargetSelection,
}

/// Outcome of asking for a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRequest {
    /// Target known now.
    Resolved(EffectTarget),
    /// Waiting for `confirm` or `cancel`.
    Pending,
}

/// An outstanding interactive selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSelection {
    pub player: PlayerId,
    pub candidates: Vec<EffectTarget>,
}

/// A selection that was just settled by input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub player: PlayerId,
    pub target: EffectTarget,
}

/// Two-tier target selection state machine.
///
/// ## Example
///
/// ```
/// use card_battle::core::{PlayerId, UnitId};
/// use card_battle::effects::{EffectTarget, GamePhase, TargetRequest, TargetSelector};
///
/// let mut selector = TargetSelector::new();
/// let candidates = vec![EffectTarget::Unit(UnitId(1)), EffectTarget::Unit(UnitId(2))];
///
/// // Interactive player with two candidates: suspend.
/// let request = selector.request(PlayerId::new(0), candidates, true);
/// assert_eq!(request, TargetRequest::Pending);
/// assert_eq!(selector.phase(), GamePhase::TargetSelection);
///
/// let chosen = selector.confirm(EffectTarget::Unit(UnitId(2))).unwrap();
/// assert_eq!(chosen.target, EffectTarget::Unit(UnitId(2)));
/// assert_eq!(selector.phase(), GamePhase::Normal);
///
/// // Nothing pending any more.
/// assert!(selector.confirm(EffectTarget::Unit(UnitId(1))).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TargetSelector {
    pending: Option<PendingSelection>,
}

impl TargetSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a target among `candidates`.
    ///
    /// Panics if a selection is already pending; the pipeline never starts
    /// a second effect while one is suspended.
    pub fn request(
        &mut self,
        player: PlayerId,
        candidates: Vec<EffectTarget>,
        interactive: bool,
    ) -> TargetRequest {
        assert!(
            self.pending.is_none(),
            "Target selection requested while another is pending"
        );

        if !interactive || candidates.len() <= 1 {
            let target = candidates.first().copied().unwrap_or_default();
            return TargetRequest::Resolved(target);
        }

        self.pending = Some(PendingSelection { player, candidates });
        TargetRequest::Pending
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.pending.is_some() {
            GamePhase::TargetSelection
        } else {
            GamePhase::Normal
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    /// Confirm one of the offered candidates.
    ///
    /// Returns `None` (and keeps waiting) if `target` was not offered, and
    /// `None` as a no-op when nothing is pending.
    pub fn confirm(&mut self, target: EffectTarget) -> Option<Selection> {
        let pending = self.pending.as_ref()?;
        if !pending.candidates.contains(&target) {
            return None;
        }
        let player = pending.player;
        self.pending = None;
        Some(Selection { player, target })
    }

    /// Cancel the pending selection, resolving it to `EffectTarget::None`.
    /// No-op (`None`) when nothing is pending.
    pub fn cancel(&mut self) -> Option<Selection> {
        self.pending.take().map(|pending| Selection {
            player: pending.player,
            target: EffectTarget::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::new(0);

    fn two_units() -> Vec<EffectTarget> {
        vec![EffectTarget::Unit(UnitId(1)), EffectTarget::Unit(UnitId(2))]
    }

    #[test]
    fn test_single_candidate_resolves_immediately() {
        let mut selector = TargetSelector::new();
        let request = selector.request(P0, vec![EffectTarget::Unit(UnitId(4))], true);

        assert_eq!(request, TargetRequest::Resolved(EffectTarget::Unit(UnitId(4))));
        assert_eq!(selector.phase(), GamePhase::Normal);
    }

    #[test]
    fn test_no_candidates_resolves_to_none() {
        let mut selector = TargetSelector::new();
        let request = selector.request(P0, Vec::new(), true);
        assert_eq!(request, TargetRequest::Resolved(EffectTarget::None));
    }

    #[test]
    fn test_automated_side_picks_first() {
        let mut selector = TargetSelector::new();
        let request = selector.request(P0, two_units(), false);

        assert_eq!(request, TargetRequest::Resolved(EffectTarget::Unit(UnitId(1))));
        assert_eq!(selector.phase(), GamePhase::Normal);
    }

    #[test]
    fn test_confirm_rejects_unoffered_target() {
        let mut selector = TargetSelector::new();
        selector.request(P0, two_units(), true);

        assert!(selector.confirm(EffectTarget::Unit(UnitId(9))).is_none());
        assert!(selector.confirm(EffectTarget::None).is_none());
        assert_eq!(selector.phase(), GamePhase::TargetSelection);
    }

    #[test]
    fn test_cancel_resolves_to_none() {
        let mut selector = TargetSelector::new();
        selector.request(P0, two_units(), true);

        let selection = selector.cancel().unwrap();
        assert_eq!(selection.target, EffectTarget::None);
        assert_eq!(selection.player, P0);
        assert_eq!(selector.phase(), GamePhase::Normal);
        assert!(selector.cancel().is_none());
    }

    #[test]
    #[should_panic(expected = "another is pending")]
    fn test_double_request_panics() {
        let mut selector = TargetSelector::new();
        selector.request(P0, two_units(), true);
        selector.request(P0, two_units(), true);
    }
}
