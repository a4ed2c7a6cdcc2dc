//! Single-consumer FIFO of game actions with a busy flag.
//!
//! The queue only tracks ordering and the in-flight action; dispatching
//! belongs to the match (`Battle`), which owns everything an action touches.
//!
//! ## Lifecycle of one action
//!
//! 1. `begin_next` dequeues and marks the queue busy (no-op while busy).
//! 2. The dispatcher either finishes synchronously and calls `complete`, or
//!    parks a [`Suspension`] with `suspend`.
//! 3. An external signal (animation done, target chosen) takes the
//!    suspension back, finishes the work, and calls `complete`.
//!
//! Submissions are accepted at any time; they wait while the queue is busy.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AttackTarget, GameAction, PlayerId, UnitId};
use crate::effects::EffectKind;

/// Coarse pipeline state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    /// Nothing in flight.
    Idle,
    /// An action is in flight and has not suspended.
    Executing,
    /// Waiting for presentation to finish an attack animation.
    WaitingForAnimation,
    /// Waiting for an interactive target choice.
    WaitingForTarget,
}

/// Work parked while the in-flight action waits on the outside world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suspension {
    /// Resolve this attack once the animation completes.
    Animation {
        player: PlayerId,
        attacker: UnitId,
        target: AttackTarget,
    },
    /// Resolve this effect once a target is confirmed or cancelled.
    Target { player: PlayerId, effect: EffectKind },
}

/// FIFO of pending actions plus the in-flight slot.
///
/// ```
/// use card_battle::core::{GameAction, PlayerId};
/// use card_battle::pipeline::{ActionQueue, PipelineState};
///
/// let mut queue = ActionQueue::new();
/// queue.enqueue(GameAction::turn_end(PlayerId::new(0)));
/// queue.enqueue(GameAction::turn_end(PlayerId::new(1)));
///
/// let first = queue.begin_next().unwrap();
/// assert_eq!(queue.state(), PipelineState::Executing);
///
/// // Busy: nothing else is dequeued.
/// assert!(queue.begin_next().is_none());
/// assert_eq!(queue.len(), 1);
///
/// assert_eq!(queue.complete(), Some(first));
/// assert!(queue.begin_next().is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ActionQueue {
    pending: VecDeque<GameAction>,
    in_flight: Option<GameAction>,
    suspension: Option<Suspension>,
    completed: u64,
}

impl ActionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action. Legality is checked at execution, not here.
    pub fn enqueue(&mut self, action: GameAction) {
        trace!(target: "card_battle::pipeline", kind = action.action_type.label(), queued = self.pending.len() + 1, "queue.enqueue");
        self.pending.push_back(action);
    }

    /// Queued actions, not counting the in-flight one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        match (&self.in_flight, &self.suspension) {
            (None, _) => PipelineState::Idle,
            (Some(_), None) => PipelineState::Executing,
            (Some(_), Some(Suspension::Animation { .. })) => PipelineState::WaitingForAnimation,
            (Some(_), Some(Suspension::Target { .. })) => PipelineState::WaitingForTarget,
        }
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<&GameAction> {
        self.in_flight.as_ref()
    }

    /// Actions completed so far.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Dequeue the next action and mark busy. Returns `None` while busy or
    /// when the queue is empty.
    pub fn begin_next(&mut self) -> Option<GameAction> {
        if self.is_busy() {
            return None;
        }
        let action = self.pending.pop_front()?;
        self.in_flight = Some(action.clone());
        Some(action)
    }

    /// Park work until an external signal.
    ///
    /// Panics if nothing is in flight or a suspension is already parked.
    pub fn suspend(&mut self, suspension: Suspension) {
        assert!(self.is_busy(), "Cannot suspend with no action in flight");
        assert!(
            self.suspension.is_none(),
            "Action is already suspended: {:?}",
            self.suspension
        );
        self.suspension = Some(suspension);
    }

    #[must_use]
    pub fn suspension(&self) -> Option<&Suspension> {
        self.suspension.as_ref()
    }

    /// Take the parked animation, if that is what we are waiting for.
    pub fn take_animation(&mut self) -> Option<Suspension> {
        match self.suspension {
            Some(Suspension::Animation { .. }) => self.suspension.take(),
            _ => None,
        }
    }

    /// Take the parked effect, if that is what we are waiting for.
    pub fn take_target(&mut self) -> Option<Suspension> {
        match self.suspension {
            Some(Suspension::Target { .. }) => self.suspension.take(),
            _ => None,
        }
    }

    /// Completion signal: clear busy and return the finished action.
    pub fn complete(&mut self) -> Option<GameAction> {
        self.suspension = None;
        let done = self.in_flight.take();
        if done.is_some() {
            self.completed += 1;
        }
        done
    }

    /// Drop every queued action. The in-flight one is unaffected.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;

    const P0: PlayerId = PlayerId::new(0);

    #[test]
    fn test_fifo_order() {
        let mut queue = ActionQueue::new();
        queue.enqueue(GameAction::play(CardId(1)));
        queue.enqueue(GameAction::play(CardId(2)));

        assert_eq!(queue.begin_next(), Some(GameAction::play(CardId(1))));
        queue.complete();
        assert_eq!(queue.begin_next(), Some(GameAction::play(CardId(2))));
    }

    #[test]
    fn test_no_dequeue_while_busy() {
        let mut queue = ActionQueue::new();
        queue.enqueue(GameAction::play(CardId(1)));
        queue.begin_next();
        queue.enqueue(GameAction::play(CardId(2)));
        queue.enqueue(GameAction::play(CardId(3)));

        assert!(queue.begin_next().is_none());
        assert_eq!(queue.len(), 2);
        assert!(queue.is_busy());
    }

    #[test]
    fn test_suspension_states() {
        let mut queue = ActionQueue::new();
        queue.enqueue(GameAction::play(CardId(1)));
        queue.begin_next();

        queue.suspend(Suspension::Target {
            player: P0,
            effect: EffectKind::DestroyEnemyUnit,
        });
        assert_eq!(queue.state(), PipelineState::WaitingForTarget);
        assert!(queue.take_animation().is_none());
        assert!(queue.take_target().is_some());
        assert_eq!(queue.state(), PipelineState::Executing);

        queue.complete();
        assert_eq!(queue.state(), PipelineState::Idle);
        assert_eq!(queue.completed(), 1);
    }

    #[test]
    fn test_complete_when_idle_is_noop() {
        let mut queue = ActionQueue::new();
        assert!(queue.complete().is_none());
        assert_eq!(queue.completed(), 0);
    }

    #[test]
    #[should_panic(expected = "no action in flight")]
    fn test_suspend_when_idle_panics() {
        let mut queue = ActionQueue::new();
        queue.suspend(Suspension::Target {
            player: P0,
            effect: EffectKind::DestroyEnemyUnit,
        });
    }
}
