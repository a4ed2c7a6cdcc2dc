//! The match context.
//!
//! `Battle` is constructed once per match and owns every per-match service:
//! the zone manager (canonical state), the action queue, the target
//! selector, the planner and the RNG. Nothing is global; collaborators get
//! at state through `&Battle` / `&mut Battle`.
//!
//! ## Scheduling
//!
//! Producers call `enqueue` (or `submit` for gated user input) at any time.
//! The host calls `tick` once per frame. A tick dispatches at most one
//! action and only when the queue is idle. An action either completes
//! during the tick or suspends until the host calls `animation_completed`,
//! `confirm_target` or `cancel_target_selection`.
//!
//! ## Turn flow
//!
//! `initialize_battle` registers both sides, deals opening hands, places
//! partners and rolls the first player. `start_turn` draws, grows mana,
//! refreshes attacks and, for the AI side, plans the whole turn and queues
//! it. A `TurnEnd` action hands over to the opponent. The match result is
//! checked after every completed action.

use tracing::{debug, info, warn};

use crate::ai::Planner;
use crate::cards::{CardRegistry, DeckRecipe, PartnerDefinition};
use crate::core::{
    ActionType, AttackTarget, BattleConfig, CardId, DeckOutPolicy, GameAction, GameRng, PlayerData, PlayerId,
    UnitId,
};
use crate::effects::{resolve_effect, EffectKind, EffectTarget, GamePhase, PendingSelection, Selection, TargetRequest, TargetSelector};
use crate::error::{BattleError, Result};
use crate::events::{BattleEvent, SubscriptionId};
use crate::pipeline::{ActionQueue, PipelineState, Suspension};
use crate::rules::{attack_targets, resolve_player_attack, resolve_unit_attack, GameResult};
use crate::zones::{PlayedCard, ZoneManager};

/// What one side brings to a match.
#[derive(Clone, Debug, Default)]
pub struct PlayerSetup {
    pub deck: DeckRecipe,
    pub partner: Option<PartnerDefinition>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(deck: DeckRecipe) -> Self {
        Self { deck, partner: None }
    }

    #[must_use]
    pub fn with_partner(mut self, partner: PartnerDefinition) -> Self {
        self.partner = Some(partner);
        self
    }
}

/// How a dispatched action left the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Completed,
    Suspended,
}

/// A single match.
///
/// ## Example
///
/// ```
/// use card_battle::cards::{CardRegistry, CardTemplate, DeckRecipe, TemplateId};
/// use card_battle::core::{BattleConfig, DeckOutPolicy, PlayerId};
/// use card_battle::flow::{Battle, PlayerSetup};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::unit(TemplateId::new(1), "Grunt", 1, 2, 2));
/// let deck = DeckRecipe::new().with(TemplateId::new(1), 10);
///
/// // Both sides driven by the planner, no presentation layer.
/// let config = BattleConfig::new(7)
///     .with_ai_player(None)
///     .with_interactive_player(None)
///     .headless();
/// let mut battle = Battle::new(config);
/// let first = battle
///     .initialize_battle(&registry, [PlayerSetup::new(deck.clone()), PlayerSetup::new(deck)])
///     .unwrap();
///
/// assert_eq!(battle.current_player(), Some(first));
/// assert_eq!(battle.zones().player(first).hand.len(), 6);
/// assert_eq!(battle.zones().player(first.opponent()).hand.len(), 5);
/// assert!(battle.result().is_none());
/// ```
#[derive(Debug)]
pub struct Battle {
    config: BattleConfig,
    zones: ZoneManager,
    queue: ActionQueue,
    targeting: TargetSelector,
    planner: Planner,
    rng: GameRng,
    current: Option<PlayerId>,
    turn: u32,
    result: Option<GameResult>,
}

impl Battle {
    /// Create an empty match. Call `initialize_battle` before ticking.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        Self {
            zones: ZoneManager::new().with_mp_cap(config.mp_cap),
            queue: ActionQueue::new(),
            targeting: TargetSelector::new(),
            planner: Planner::default(),
            rng: GameRng::new(config.seed),
            current: None,
            turn: 0,
            result: None,
            config,
        }
    }

    /// Replace the default planner.
    #[must_use]
    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = planner;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    /// Direct access to canonical state, for setup and tooling.
    pub fn zones_mut(&mut self) -> &mut ZoneManager {
        &mut self.zones
    }

    #[must_use]
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    #[must_use]
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Player whose turn it is, once the match has started.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current
    }

    /// Turns started so far, counting both sides.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn current_phase(&self) -> GamePhase {
        self.targeting.phase()
    }

    #[must_use]
    pub fn pending_selection(&self) -> Option<&PendingSelection> {
        self.targeting.pending()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.queue.is_busy()
    }

    #[must_use]
    pub fn pipeline_state(&self) -> PipelineState {
        self.queue.state()
    }

    /// Register a callback for every battle event.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&BattleEvent) + 'static) -> SubscriptionId {
        self.zones.events_mut().subscribe(subscriber)
    }

    /// Take every logged event since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.zones.events_mut().drain()
    }

    // === Setup ===

    /// Register both sides, build and shuffle their decks, deal opening
    /// hands, place partners and start the first turn.
    ///
    /// Returns the randomly chosen first player.
    pub fn initialize_battle(&mut self, registry: &CardRegistry, setups: [PlayerSetup; 2]) -> Result<PlayerId> {
        let mut shuffle = self.rng.for_context("shuffle");
        for (player, setup) in PlayerId::both().zip(setups) {
            let deck = setup.deck.build(registry, self.zones.ids_mut(), &mut shuffle)?;
            self.zones
                .register_player(player, PlayerData::new(self.config.starting_hp, deck))?;
            if let Some(partner) = setup.partner {
                self.zones.place_partner(player, partner);
            }
        }

        for player in PlayerId::both() {
            for _ in 0..self.config.starting_hand_size {
                self.zones.draw_card(player);
            }
        }

        let first = self.rng.for_context("first_player").roll_player();
        info!(target: "card_battle::flow", seed = self.config.seed, %first, "battle.initialized");
        self.begin_turn(first)?;
        Ok(first)
    }

    /// Return the listed hand cards to the deck, reshuffle and redraw.
    ///
    /// Setup only: refused once the first turn is over or any action has
    /// been dispatched.
    pub fn mulligan(&mut self, player: PlayerId, cards: &[CardId]) -> Result<usize> {
        self.ensure_registered(player)?;
        if self.turn > 1 || self.queue.is_busy() || self.queue.completed() > 0 {
            return Err(BattleError::MulliganClosed(player));
        }
        Ok(self.zones.mulligan(player, cards, &mut self.rng))
    }

    // === Turn flow ===

    /// Begin `player`'s turn.
    ///
    /// Draws first. On a successful draw the player's mana grows and is
    /// refilled, units may attack again and age by one turn. On an empty
    /// deck the `DeckOutPolicy` decides: `Stall` skips that growth but the
    /// turn goes on, `Lose` ends the match. The AI side then plans and
    /// queues its whole turn.
    ///
    /// Returns false, changing nothing, while an action is executing or
    /// waiting on a target or animation.
    pub fn start_turn(&mut self, player: PlayerId) -> Result<bool> {
        self.ensure_registered(player)?;
        if self.pipeline_blocked(player, "turn_start") {
            return Ok(false);
        }
        self.begin_turn(player)?;
        Ok(true)
    }

    fn begin_turn(&mut self, player: PlayerId) -> Result<()> {
        if self.is_over() {
            return Ok(());
        }

        self.turn += 1;
        self.current = Some(player);
        info!(target: "card_battle::flow", %player, turn = self.turn, "turn.start");
        self.zones.emit(BattleEvent::TurnStarted {
            player,
            turn: self.turn,
        });

        if self.zones.draw_card(player) {
            self.zones.increase_max_mp(player);
            self.zones.restore_mp(player);
            self.zones.grant_attack_to_all_units(player);
            self.zones.increment_turns_on_field(player);
        } else {
            match self.config.deck_out {
                DeckOutPolicy::Stall => {
                    info!(target: "card_battle::flow", %player, "turn.deck_out.stall");
                }
                DeckOutPolicy::Lose => {
                    info!(target: "card_battle::flow", %player, "turn.deck_out.lose");
                    self.declare(GameResult::Winner(player.opponent()));
                    return Ok(());
                }
            }
        }

        if self.config.is_ai(player) {
            self.plan_turn(player);
        }
        Ok(())
    }

    /// Hand the turn to `player`'s opponent.
    ///
    /// Returns false if the match is over, it is not `player`'s turn, or an
    /// action is still executing or waiting on a target or animation.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<bool> {
        self.ensure_registered(player)?;
        if self.pipeline_blocked(player, "turn_end") {
            return Ok(false);
        }
        self.hand_over(player)
    }

    /// Whether an action is in flight, so turn flow must not move.
    fn pipeline_blocked(&self, player: PlayerId, kind: &'static str) -> bool {
        let blocked = self.queue.is_busy() || self.current_phase() == GamePhase::TargetSelection;
        if blocked {
            debug!(target: "card_battle::flow", %player, kind, state = ?self.queue.state(), "turn.rejected.busy");
        }
        blocked
    }

    /// Turn handover shared by `end_turn` and a dispatched `TurnEnd`.
    fn hand_over(&mut self, player: PlayerId) -> Result<bool> {
        if self.is_over() {
            debug!(target: "card_battle::flow", %player, "turn_end.ignored.game_over");
            return Ok(false);
        }
        if self.current != Some(player) {
            debug!(target: "card_battle::flow", %player, current = ?self.current, "turn_end.rejected.not_current");
            return Ok(false);
        }

        info!(target: "card_battle::flow", %player, turn = self.turn, "turn.end");
        self.begin_turn(player.opponent())?;
        Ok(true)
    }

    /// Decide the match from both HP totals. Once decided the result
    /// sticks.
    pub fn check_game_end(&mut self) -> Option<GameResult> {
        if self.result.is_some() {
            return self.result;
        }
        let (Some(p0), Some(p1)) = (
            self.zones.get_player(PlayerId::new(0)),
            self.zones.get_player(PlayerId::new(1)),
        ) else {
            return None;
        };
        let result = GameResult::from_hp(p0.hp, p1.hp)?;
        self.declare(result);
        Some(result)
    }

    fn declare(&mut self, result: GameResult) {
        self.result = Some(result);
        let dropped = self.queue.clear();
        info!(target: "card_battle::flow", ?result, turn = self.turn, dropped, "game.over");
        self.zones.emit(BattleEvent::GameOver { result });
    }

    fn plan_turn(&mut self, player: PlayerId) {
        let actions = self.planner.decide_actions(&self.zones, player);
        debug!(target: "card_battle::ai", %player, planned = actions.len(), "turn.planned");
        for action in actions {
            self.queue.enqueue(action);
        }
        if self.config.append_turn_end {
            self.queue.enqueue(GameAction::turn_end(player));
        }
    }

    fn ensure_registered(&self, player: PlayerId) -> Result<()> {
        if self.zones.is_registered(player) {
            Ok(())
        } else {
            Err(BattleError::PlayerNotRegistered(player))
        }
    }

    // === Input ===

    /// Accept an action without any gating. Legality is checked when it
    /// executes.
    pub fn enqueue(&mut self, action: GameAction) {
        self.queue.enqueue(action);
    }

    /// Accept user input. Refused while a target is being chosen or after
    /// the match has ended.
    pub fn submit(&mut self, action: GameAction) -> bool {
        if self.current_phase() == GamePhase::TargetSelection {
            debug!(target: "card_battle::pipeline", kind = action.action_type.label(), "submit.refused.target_selection");
            return false;
        }
        if self.is_over() {
            debug!(target: "card_battle::pipeline", kind = action.action_type.label(), "submit.refused.game_over");
            return false;
        }
        self.queue.enqueue(action);
        true
    }

    /// Attack actions the given canonical unit may take right now.
    #[must_use]
    pub fn legal_attacks(&self, player: PlayerId, unit: UnitId) -> Vec<GameAction> {
        let opponent = player.opponent();
        let (Some(mine), Some(theirs)) = (self.zones.get_player(player), self.zones.get_player(opponent)) else {
            return Vec::new();
        };
        let Some(attacker) = mine.field.unit(unit) else {
            return Vec::new();
        };
        attack_targets(attacker, &theirs.field, opponent)
            .into_iter()
            .map(|target| GameAction::attack(unit, target))
            .collect()
    }

    // === Pipeline ===

    /// One scheduler poll.
    pub fn tick(&mut self) -> Result<bool> {
        self.process_next_action()
    }

    /// Dequeue and dispatch one action if the pipeline is idle.
    ///
    /// Returns `Ok(false)` when nothing was dequeued: the queue is busy or
    /// empty, or the match is over. A malformed action completes and
    /// surfaces as an error.
    pub fn process_next_action(&mut self) -> Result<bool> {
        if self.current.is_none() {
            return Err(BattleError::NotInitialized);
        }
        if self.is_over() {
            return Ok(false);
        }
        let Some(action) = self.queue.begin_next() else {
            return Ok(false);
        };
        debug!(target: "card_battle::pipeline", kind = action.action_type.label(), queued = self.queue.len(), "action.begin");

        match self.dispatch(&action) {
            Ok(Step::Completed) => self.finish_action(),
            Ok(Step::Suspended) => {
                debug!(target: "card_battle::pipeline", state = ?self.queue.state(), "action.suspended");
            }
            Err(err) => {
                self.queue.complete();
                return Err(err);
            }
        }
        Ok(true)
    }

    /// Tick until the pipeline suspends, drains, or the match ends, or
    /// `limit` actions have been dispatched. Returns the number dispatched.
    pub fn run_until_blocked(&mut self, limit: usize) -> Result<usize> {
        let mut dispatched = 0;
        while dispatched < limit && self.process_next_action()? {
            dispatched += 1;
        }
        Ok(dispatched)
    }

    /// Presentation finished the attack animation. Resolves the parked
    /// attack and completes it. No-op (false) if no animation is awaited.
    pub fn animation_completed(&mut self) -> bool {
        let Some(Suspension::Animation { attacker, target, .. }) = self.queue.take_animation() else {
            return false;
        };
        self.resolve_attack(attacker, target);
        self.finish_action();
        true
    }

    /// Choose one of the offered targets for the suspended effect.
    ///
    /// Returns false, and keeps waiting, if `target` was not offered.
    /// Returns false as a no-op when nothing is pending.
    pub fn confirm_target(&mut self, target: EffectTarget) -> bool {
        match self.targeting.confirm(target) {
            Some(selection) => {
                self.finish_selection(selection);
                true
            }
            None => {
                debug!(target: "card_battle::effects", ?target, "target.confirm.refused");
                false
            }
        }
    }

    /// Abandon the suspended selection; the effect resolves with no target.
    pub fn cancel_target_selection(&mut self) -> bool {
        match self.targeting.cancel() {
            Some(selection) => {
                self.finish_selection(selection);
                true
            }
            None => false,
        }
    }

    fn finish_selection(&mut self, selection: Selection) {
        let effect = match self.queue.take_target() {
            Some(Suspension::Target { effect, .. }) => effect,
            other => panic!("Target selection settled without a suspended effect: {:?}", other),
        };
        self.zones.emit(BattleEvent::TargetSelectionEnded {
            player: selection.player,
            chosen: selection.target,
        });
        resolve_effect(&mut self.zones, selection.player, &effect, selection.target);
        self.finish_action();
    }

    fn finish_action(&mut self) {
        if let Some(done) = self.queue.complete() {
            debug!(target: "card_battle::pipeline", kind = done.action_type.label(), "action.complete");
        }
        self.check_game_end();
    }

    fn dispatch(&mut self, action: &GameAction) -> Result<Step> {
        match action.action_type {
            ActionType::Play => self.dispatch_play(action),
            ActionType::Attack => self.dispatch_attack(action),
            ActionType::TurnEnd => {
                let player = action.player.ok_or(BattleError::MalformedAction {
                    kind: "turn_end",
                    missing: "player",
                })?;
                self.ensure_registered(player)?;
                self.hand_over(player)?;
                Ok(Step::Completed)
            }
            ActionType::SummonPartner => {
                let player = action.player.ok_or(BattleError::MalformedAction {
                    kind: "summon_partner",
                    missing: "player",
                })?;
                if self.is_turn_of(player, "summon_partner") {
                    self.zones.summon_partner(player);
                }
                Ok(Step::Completed)
            }
        }
    }

    fn dispatch_play(&mut self, action: &GameAction) -> Result<Step> {
        let card = action.source_card.ok_or(BattleError::MalformedAction {
            kind: "play",
            missing: "source_card",
        })?;
        let Some(owner) = self.zones.owner_of_card(card) else {
            warn!(target: "card_battle::pipeline", card = card.0, "play.stale_card");
            return Ok(Step::Completed);
        };
        if !self.is_turn_of(owner, "play") {
            return Ok(Step::Completed);
        }
        let Some(played) = self.zones.try_play_card(owner, card) else {
            return Ok(Step::Completed);
        };

        let effect = match &played {
            PlayedCard::Unit { card, .. } | PlayedCard::Spell { card } => card.template.play_effect().copied(),
            PlayedCard::Totem { .. } => None,
        };
        match effect {
            Some(effect) => Ok(self.begin_effect(owner, effect, action.effect_target)),
            None => Ok(Step::Completed),
        }
    }

    /// Resolve `effect` now or park it for interactive target choice.
    ///
    /// A target preselected on the action is used when it is among the
    /// current candidates.
    fn begin_effect(&mut self, player: PlayerId, effect: EffectKind, preset: Option<EffectTarget>) -> Step {
        let candidates = effect.available_targets(&self.zones.snapshot(player));

        if let Some(target) = preset.filter(|t| candidates.contains(t)) {
            resolve_effect(&mut self.zones, player, &effect, target);
            return Step::Completed;
        }

        let interactive = self.config.is_interactive(player);
        match self.targeting.request(player, candidates.clone(), interactive) {
            TargetRequest::Resolved(target) => {
                resolve_effect(&mut self.zones, player, &effect, target);
                Step::Completed
            }
            TargetRequest::Pending => {
                debug!(
                    target: "card_battle::effects",
                    %player,
                    effect = effect.label(),
                    candidates = candidates.len(),
                    "target.selection_started"
                );
                self.zones
                    .emit(BattleEvent::TargetSelectionStarted { player, candidates });
                self.queue.suspend(Suspension::Target { player, effect });
                Step::Suspended
            }
        }
    }

    fn dispatch_attack(&mut self, action: &GameAction) -> Result<Step> {
        let attacker = action.source_unit.ok_or(BattleError::MalformedAction {
            kind: "attack",
            missing: "source_unit",
        })?;
        let target = action.target.ok_or(BattleError::MalformedAction {
            kind: "attack",
            missing: "target",
        })?;

        let Some(unit) = self.zones.find_unit(attacker) else {
            warn!(target: "card_battle::pipeline", attacker = attacker.0, "attack.stale_attacker");
            return Ok(Step::Completed);
        };
        let owner = unit.owner;
        let opponent = owner.opponent();
        let legal = attack_targets(unit, &self.zones.player(opponent).field, opponent);
        if !self.is_turn_of(owner, "attack") {
            return Ok(Step::Completed);
        }
        if !legal.contains(&target) {
            if let AttackTarget::Unit(defender) = target {
                if self.zones.find_unit(defender).is_none() {
                    warn!(target: "card_battle::pipeline", defender = defender.0, "attack.stale_defender");
                    return Ok(Step::Completed);
                }
            }
            debug!(target: "card_battle::combat", attacker = attacker.0, ?target, "attack.rejected");
            return Ok(Step::Completed);
        }

        if self.config.animate_attacks {
            self.zones
                .emit(BattleEvent::AttackAnimationRequested { attacker, target });
            self.queue.suspend(Suspension::Animation {
                player: owner,
                attacker,
                target,
            });
            return Ok(Step::Suspended);
        }

        self.resolve_attack(attacker, target);
        Ok(Step::Completed)
    }

    fn resolve_attack(&mut self, attacker: UnitId, target: AttackTarget) {
        match target {
            AttackTarget::Unit(defender) => {
                resolve_unit_attack(&mut self.zones, attacker, defender);
            }
            AttackTarget::Player(player) => resolve_player_attack(&mut self.zones, attacker, player),
        }
    }

    fn is_turn_of(&self, player: PlayerId, kind: &'static str) -> bool {
        let ok = self.current == Some(player);
        if !ok {
            debug!(target: "card_battle::pipeline", %player, kind, current = ?self.current, "action.rejected.not_your_turn");
        }
        ok
    }
}
