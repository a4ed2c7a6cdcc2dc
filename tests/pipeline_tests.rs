//! Action pipeline tests.
//!
//! Serialization guarantees: one action in flight at a time, FIFO order,
//! and no dequeue while an action is suspended.

use card_battle::cards::{CardRegistry, CardTemplate, DeckRecipe, TemplateId};
use card_battle::core::{ActionType, BattleConfig, CardId, GameAction, PlayerId, UnitId};
use card_battle::effects::EffectKind;
use card_battle::flow::{Battle, PlayerSetup};
use card_battle::pipeline::{ActionQueue, PipelineState, Suspension};
use card_battle::zones::Unit;

const P0: PlayerId = PlayerId::new(0);

const GRUNT: TemplateId = TemplateId::new(1);

fn started(config: BattleConfig) -> (Battle, PlayerId) {
    let mut registry = CardRegistry::new();
    registry.register(CardTemplate::unit(GRUNT, "Grunt", 1, 2, 2));
    let deck = DeckRecipe::new().with(GRUNT, 12);
    let mut battle = Battle::new(config.with_ai_player(None));
    let first = battle
        .initialize_battle(&registry, [PlayerSetup::new(deck.clone()), PlayerSetup::new(deck)])
        .unwrap();
    (battle, first)
}

fn veteran(battle: &mut Battle, id: u32, owner: PlayerId) -> UnitId {
    let mut unit = Unit::new(UnitId(900 + id), owner, 1, 10);
    unit.turns_on_field = 1;
    let unit_id = unit.id;
    battle.zones_mut().player_mut(owner).field.add_unit(unit);
    unit_id
}

// ============================================================================
// Queue
// ============================================================================

#[test]
fn test_queue_accepts_while_busy() {
    let mut queue = ActionQueue::new();
    queue.enqueue(GameAction::play(CardId(1)));
    assert!(queue.begin_next().is_some());

    for i in 2..6 {
        queue.enqueue(GameAction::play(CardId(i)));
    }
    assert_eq!(queue.len(), 4);
    assert!(queue.begin_next().is_none());
    assert_eq!(queue.len(), 4);

    queue.complete();
    assert_eq!(queue.begin_next(), Some(GameAction::play(CardId(2))));
}

#[test]
fn test_suspension_round_trip_through_states() {
    let mut queue = ActionQueue::new();
    assert_eq!(queue.state(), PipelineState::Idle);

    queue.enqueue(GameAction::play(CardId(1)));
    queue.begin_next();
    queue.suspend(Suspension::Target {
        player: P0,
        effect: EffectKind::DamageEnemyUnit { amount: 1 },
    });
    assert_eq!(queue.state(), PipelineState::WaitingForTarget);

    assert!(queue.take_animation().is_none());
    assert!(queue.take_target().is_some());
    queue.complete();
    assert_eq!(queue.state(), PipelineState::Idle);
}

#[test]
fn test_clear_drops_queued_only() {
    let mut queue = ActionQueue::new();
    queue.enqueue(GameAction::play(CardId(1)));
    queue.enqueue(GameAction::play(CardId(2)));
    queue.begin_next();

    assert_eq!(queue.clear(), 1);
    assert!(queue.is_busy());
    assert_eq!(queue.complete(), Some(GameAction::play(CardId(1))));
}

// ============================================================================
// Battle scheduling
// ============================================================================

/// While an attack animation is pending, further ticks dequeue nothing.
#[test]
fn test_no_dequeue_while_waiting_for_animation() {
    let (mut battle, first) = started(BattleConfig::new(4));
    let a = veteran(&mut battle, 1, first);
    let b = veteran(&mut battle, 2, first);

    battle.enqueue(GameAction::attack_player(a, first.opponent()));
    battle.enqueue(GameAction::attack_player(b, first.opponent()));

    assert!(battle.tick().unwrap());
    for _ in 0..5 {
        assert!(!battle.tick().unwrap());
    }
    assert_eq!(battle.queue().len(), 1);
    assert_eq!(battle.zones().player(first.opponent()).hp, 15);

    assert!(battle.animation_completed());
    assert_eq!(battle.zones().player(first.opponent()).hp, 14);

    assert!(battle.tick().unwrap());
    assert!(battle.animation_completed());
    assert_eq!(battle.zones().player(first.opponent()).hp, 13);
    assert_eq!(battle.queue().completed(), 2);
}

/// A rejected play completes immediately and frees the pipeline.
#[test]
fn test_rejected_play_completes() {
    let (mut battle, first) = started(BattleConfig::new(4));
    battle.zones_mut().player_mut(first).current_mp = 0;
    let card = battle.zones().player(first).hand[0].id;

    battle.enqueue(GameAction::play(card));
    assert!(battle.tick().unwrap());

    assert!(!battle.is_busy());
    assert!(battle.zones().player(first).holds(card));
}

/// Actions run in submission order.
#[test]
fn test_fifo_execution() {
    let (mut battle, first) = started(BattleConfig::new(8).headless());
    battle.zones_mut().player_mut(first).current_mp = 3;
    let hand: Vec<CardId> = battle.zones().player(first).hand.iter().take(3).map(|c| c.id).collect();

    for &card in &hand {
        assert!(battle.submit(GameAction::play(card)));
    }
    assert_eq!(battle.run_until_blocked(10).unwrap(), 3);

    let summoned: Vec<_> = battle.zones().player(first).field.units().map(|u| u.id).collect();
    assert_eq!(summoned.len(), 3);
    assert!(summoned.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(battle.zones().player(first).current_mp, 0);
}

/// A malformed action is an error, not a silent skip.
#[test]
fn test_malformed_turn_end() {
    let (mut battle, _) = started(BattleConfig::new(4));
    battle.enqueue(GameAction::bare(ActionType::TurnEnd));

    assert!(battle.tick().is_err());
    assert!(!battle.is_busy());
}
