//! Greedy planner tests.
//!
//! Properties: the plan is bounded by the number of enumerable actions,
//! and planning never reaches canonical state.

use std::sync::Arc;

use card_battle::ai::{legal_actions, simulate, EvalWeights, Planner};
use card_battle::cards::{Card, CardTemplate, Keyword, Keywords, TemplateId};
use card_battle::core::{ActionType, CardId, GameAction, GameState, PlayerData, PlayerId, UnitId};
use card_battle::zones::{Unit, ZoneManager};
use proptest::prelude::*;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

#[derive(Clone, Debug)]
struct UnitShape {
    attack: i32,
    hp: i32,
    turns: u32,
    rush: bool,
    guard: bool,
}

fn unit_shape() -> impl Strategy<Value = UnitShape> {
    (0i32..6, 1i32..6, 0u32..2, any::<bool>(), prop::bool::weighted(0.2)).prop_map(
        |(attack, hp, turns, rush, guard)| UnitShape {
            attack,
            hp,
            turns,
            rush,
            guard,
        },
    )
}

fn build_unit(id: u32, owner: PlayerId, shape: &UnitShape) -> Unit {
    let mut keywords = Keywords::new();
    if shape.rush {
        keywords.insert(Keyword::Rush);
    }
    if shape.guard {
        keywords.insert(Keyword::Guard);
    }
    let mut unit = Unit::new(UnitId(id), owner, shape.attack, shape.hp).with_keywords(keywords);
    unit.turns_on_field = shape.turns;
    unit
}

fn card(id: u32, cost: i32) -> Card {
    Card::new(
        CardId(id),
        Arc::new(CardTemplate::unit(TemplateId::new(1), "Grunt", cost, 1, 1)),
    )
}

fn zones_from(mine: &[UnitShape], theirs: &[UnitShape], costs: &[i32], mp: i32) -> ZoneManager {
    let mut a = PlayerData::new(15, Vec::new());
    a.current_mp = mp;
    a.hand = costs.iter().enumerate().map(|(i, &c)| card(i as u32, c)).collect();
    for (i, shape) in mine.iter().enumerate() {
        a.field.add_unit(build_unit(i as u32, P0, shape));
    }
    let mut b = PlayerData::new(15, Vec::new());
    for (i, shape) in theirs.iter().enumerate() {
        b.field.add_unit(build_unit(100 + i as u32, P1, shape));
    }

    let mut zones = ZoneManager::new();
    zones.register_player(P0, a).unwrap();
    zones.register_player(P1, b).unwrap();
    zones
}

// ============================================================================
// Scenarios
// ============================================================================

/// The planner commits while anything is legal and skips what it cannot
/// afford.
#[test]
fn test_plays_only_affordable_cards() {
    let zones = zones_from(&[], &[], &[3, 1], 2);
    let plan = Planner::default().decide_actions(&zones, P0);
    assert_eq!(plan, vec![GameAction::play(CardId(1))]);
}

/// A lethal trade is taken over an even one.
#[test]
fn test_prefers_favourable_trade() {
    let mine = [UnitShape { attack: 3, hp: 5, turns: 1, rush: false, guard: false }];
    let theirs = [
        UnitShape { attack: 5, hp: 3, turns: 1, rush: false, guard: true },
        UnitShape { attack: 4, hp: 2, turns: 1, rush: false, guard: false },
    ];
    let zones = zones_from(&mine, &theirs, &[], 0);

    let plan = Planner::default().decide_actions(&zones, P0);
    assert_eq!(plan, vec![GameAction::attack_unit(UnitId(0), UnitId(101))]);
}

/// Custom weights change the choice.
#[test]
fn test_weights_are_respected() {
    let zones = zones_from(&[], &[], &[0], 0);
    let snapshot = zones.snapshot(P0);
    let planner = Planner::new(EvalWeights::default().with_mp(1));
    assert_eq!(planner.weights().mp, 1);
    assert_eq!(planner.plan(snapshot).len(), 1);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The plan never exceeds |hand| + |units| * (|opponent units| + 1)
    /// and every step is one of the actions legal at that point.
    #[test]
    fn planner_terminates_within_bound(
        mine in prop::collection::vec(unit_shape(), 0..4),
        theirs in prop::collection::vec(unit_shape(), 0..4),
        costs in prop::collection::vec(0i32..5, 0..5),
        mp in 0i32..6,
    ) {
        let zones = zones_from(&mine, &theirs, &costs, mp);
        let plan = Planner::default().decide_actions(&zones, P0);

        let bound = costs.len() + mine.len() * (theirs.len() + 1);
        prop_assert!(plan.len() <= bound, "plan {} exceeds bound {}", plan.len(), bound);

        let mut working: GameState = zones.snapshot(P0);
        for action in &plan {
            prop_assert!(legal_actions(&working).contains(action));
            working = simulate(&working, action);
        }
        prop_assert!(legal_actions(&working).is_empty());
    }

    /// Simulating on a snapshot never changes canonical data.
    #[test]
    fn simulation_is_isolated(
        mine in prop::collection::vec(unit_shape(), 0..4),
        theirs in prop::collection::vec(unit_shape(), 0..4),
        costs in prop::collection::vec(0i32..5, 0..5),
        mp in 0i32..6,
    ) {
        let zones = zones_from(&mine, &theirs, &costs, mp);
        let before = (zones.player(P0).clone(), zones.player(P1).clone());

        let snapshot = zones.snapshot(P0);
        for action in legal_actions(&snapshot) {
            let next = simulate(&snapshot, &action);
            if action.action_type == ActionType::Attack {
                prop_assert!(next != snapshot);
            }
        }
        let _ = Planner::default().decide_actions(&zones, P0);

        prop_assert_eq!(zones.player(P0), &before.0);
        prop_assert_eq!(zones.player(P1), &before.1);
    }
}
