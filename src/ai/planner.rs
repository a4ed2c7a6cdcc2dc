//! Greedy one-ply planner.
//!
//! `decide_actions` plans a whole turn before anything is submitted:
//!
//! 1. Deep-copy a snapshot for the acting player.
//! 2. Enumerate legal actions: one Play per affordable hand card, then for
//!    each unit every legal attack target (opposing units, then the player).
//! 3. Simulate each on a copy of the working snapshot and score it.
//! 4. Keep the first action reaching the strictly highest score, advance
//!    the working snapshot to its result, repeat until nothing is legal.
//!
//! Simulation only moves base stats: a Play removes the card and pays its
//! cost, an Attack trades blows or hits the player. Summons and triggered
//! effects are not simulated. Every step consumes one card or exhausts one
//! unit, so the loop always terminates.

use tracing::trace;

use super::evaluator::EvalWeights;
use crate::core::{ActionType, AttackTarget, GameAction, GameState, PlayerId};
use crate::rules::{attack_targets, trade_blows};
use crate::zones::ZoneManager;

/// Greedy action planner.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    weights: EvalWeights,
}

impl Planner {
    #[must_use]
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Plan `player`'s turn from canonical state. Never mutates it.
    #[must_use]
    pub fn decide_actions(&self, zones: &ZoneManager, player: PlayerId) -> Vec<GameAction> {
        self.plan(zones.snapshot(player))
    }

    /// Plan from an already captured snapshot.
    #[must_use]
    pub fn plan(&self, mut working: GameState) -> Vec<GameAction> {
        let mut plan = Vec::new();

        loop {
            let candidates = legal_actions(&working);
            if candidates.is_empty() {
                break;
            }

            let mut best: Option<(i64, GameAction, GameState)> = None;
            for action in candidates {
                let next = simulate(&working, &action);
                let score = self.weights.evaluate(&next);
                trace!(target: "card_battle::ai", ?action, score, "planner.candidate");
                if best.as_ref().map_or(true, |(top, _, _)| score > *top) {
                    best = Some((score, action, next));
                }
            }

            let Some((score, action, next)) = best else {
                break;
            };
            trace!(target: "card_battle::ai", ?action, score, "planner.chosen");
            plan.push(action);
            working = next;
        }

        tracing::debug!(
            target: "card_battle::ai",
            player = %working.my_player,
            actions = plan.len(),
            "planner.done"
        );
        plan
    }
}

/// Actions legal in `state` for its owner, in enumeration order.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<GameAction> {
    let mut actions: Vec<GameAction> = state
        .my_hand
        .iter()
        .filter(|card| card.cost() <= state.my_mp)
        .map(|card| GameAction::play(card.id))
        .collect();

    for unit in state.my_field.units() {
        actions.extend(
            attack_targets(unit, &state.opponent_field, state.opponent_player)
                .into_iter()
                .map(|target| GameAction::attack(unit.id, target)),
        );
    }
    actions
}

/// Apply `action` to a copy of `state`.
///
/// Panics if the action does not refer to something in the snapshot;
/// callers only pass actions from `legal_actions`.
#[must_use]
pub fn simulate(state: &GameState, action: &GameAction) -> GameState {
    let mut next = state.clone();

    match (action.action_type, action.source_card, action.source_unit, action.target) {
        (ActionType::Play, Some(card_id), _, _) => {
            let index = next
                .my_hand
                .iter()
                .position(|c| c.id == card_id)
                .unwrap_or_else(|| panic!("{} is not in the simulated hand", card_id));
            let card = next.my_hand.remove(index);
            next.my_mp -= card.cost();
        }
        (ActionType::Attack, _, Some(attacker), Some(AttackTarget::Unit(defender))) => {
            let mine = &mut next.my_field;
            let theirs = &mut next.opponent_field;
            match (mine.unit_mut(attacker), theirs.unit_mut(defender)) {
                (Some(a), Some(d)) => trade_blows(a, d),
                _ => panic!("{} or {} is not in the simulated fields", attacker, defender),
            }
            mine.remove_dead();
            theirs.remove_dead();
        }
        (ActionType::Attack, _, Some(attacker), Some(AttackTarget::Player(_))) => {
            let unit = next
                .my_field
                .unit_mut(attacker)
                .unwrap_or_else(|| panic!("{} is not in the simulated field", attacker));
            unit.can_attack = false;
            let damage = unit.attack;
            next.opponent_hp -= damage;
        }
        _ => panic!("{:?} cannot be simulated", action),
    }

    next
}
