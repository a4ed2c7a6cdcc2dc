//! Zone and resource manager.
//!
//! The `ZoneManager` exclusively owns canonical battle state: one
//! `PlayerData` per seat. Every other component borrows from it or works on
//! a disposable `GameState` copy. It provides:
//! - Player registration (once per seat per match)
//! - Deck/hand movement (draw, play, mulligan)
//! - Per-turn resource mutators (mana, attack refresh, turns on field)
//! - Unit and partner lifecycle (summon, destroy, return to partner zone)
//! - Change notifications through its `EventBus`
//!
//! ## Failure semantics
//!
//! Using an unregistered seat is a programmer error and panics. Running out
//! of mana, cards or legal targets is an ordinary outcome reported as
//! `false`/`None`.

use std::sync::Arc;

use tracing::debug;

use super::field::{Totem, Unit};
use crate::cards::{Card, CardKind, PartnerDefinition};
use crate::core::{CardId, GameRng, GameState, IdAllocator, PlayerData, PlayerId, PlayerMap, UnitId};
use crate::effects::LiveView;
use crate::error::{BattleError, Result};
use crate::events::{BattleEvent, EventBus};

/// What a successful `try_play_card` put into play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayedCard {
    /// The card summoned a unit.
    Unit { card: Card, unit: UnitId },
    /// The card placed a totem.
    Totem { card: Card },
    /// The card is a spell whose effect still has to resolve.
    Spell { card: Card },
}

impl PlayedCard {
    #[must_use]
    pub fn card(&self) -> &Card {
        match self {
            PlayedCard::Unit { card, .. } | PlayedCard::Totem { card } | PlayedCard::Spell { card } => card,
        }
    }
}

/// Owner of canonical player data.
///
/// ## Usage
///
/// ```
/// use card_battle::core::{PlayerData, PlayerId};
/// use card_battle::zones::ZoneManager;
///
/// let mut zones = ZoneManager::new();
/// let p0 = PlayerId::new(0);
/// zones.register_player(p0, PlayerData::new(15, Vec::new())).unwrap();
/// assert!(zones.register_player(p0, PlayerData::new(15, Vec::new())).is_err());
///
/// // Empty deck: the draw fails and nothing moves.
/// assert!(!zones.draw_card(p0));
/// assert!(zones.player(p0).hand.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ZoneManager {
    players: PlayerMap<Option<PlayerData>>,
    ids: IdAllocator,
    events: EventBus,
    mp_cap: Option<i32>,
}

impl ZoneManager {
    /// Create a manager with no registered players.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap MaxMP growth at `cap`.
    #[must_use]
    pub fn with_mp_cap(mut self, cap: Option<i32>) -> Self {
        self.mp_cap = cap;
        self
    }

    // === Registration and access ===

    /// Bind a player id to its data. Fails if the id is already bound.
    pub fn register_player(&mut self, player: PlayerId, data: PlayerData) -> Result<()> {
        let slot = self.players.get_mut(player);
        if slot.is_some() {
            return Err(BattleError::PlayerAlreadyRegistered(player));
        }
        *slot = Some(data);
        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, player: PlayerId) -> bool {
        self.players.get(player).is_some()
    }

    /// Get a player's data, or `None` if the seat is unbound.
    #[must_use]
    pub fn get_player(&self, player: PlayerId) -> Option<&PlayerData> {
        self.players.get(player).as_ref()
    }

    /// Get a player's data.
    ///
    /// Panics if the player is not registered.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerData {
        match self.players.get(player) {
            Some(data) => data,
            None => panic!("{} is not registered with the zone manager", player),
        }
    }

    /// Get a player's data mutably.
    ///
    /// Panics if the player is not registered.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerData {
        match self.players.get_mut(player) {
            Some(data) => data,
            None => panic!("{} is not registered with the zone manager", player),
        }
    }

    /// Both players' data, `a` first.
    ///
    /// Panics if either is not registered or `a == b`.
    pub fn players_pair_mut(&mut self, a: PlayerId, b: PlayerId) -> (&mut PlayerData, &mut PlayerData) {
        match self.players.pair_mut(a, b) {
            (Some(first), Some(second)) => (first, second),
            _ => panic!("{} and {} must both be registered with the zone manager", a, b),
        }
    }

    /// Owner-relative deep copy for simulation.
    #[must_use]
    pub fn snapshot(&self, player: PlayerId) -> GameState {
        GameState::capture(player, self.player(player), self.player(player.opponent()))
    }

    /// Live, aliasing view for effect resolution from `acting`'s side.
    pub fn live_view(&mut self, acting: PlayerId) -> LiveView<'_> {
        LiveView::new(acting, &mut self.players)
    }

    /// Allocate card ids for cards created outside a deck recipe.
    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    // === Events ===

    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn emit(&mut self, event: BattleEvent) {
        self.events.emit(event);
    }

    // === Lookup ===

    /// Player holding `card` in hand.
    #[must_use]
    pub fn owner_of_card(&self, card: CardId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, data)| data.as_ref().is_some_and(|d| d.holds(card)))
            .map(|(player, _)| player)
    }

    /// Find a unit on either field.
    #[must_use]
    pub fn find_unit(&self, unit: UnitId) -> Option<&Unit> {
        self.players
            .iter()
            .filter_map(|(_, data)| data.as_ref())
            .find_map(|data| data.field.unit(unit))
    }

    // === Deck and hand ===

    /// Move the top deck card into hand.
    ///
    /// Returns false (and emits `DeckEmpty`) without mutating anything if
    /// the deck is empty.
    pub fn draw_card(&mut self, player: PlayerId) -> bool {
        let data = self.player_mut(player);
        let Some(card) = data.deck.pop_front() else {
            debug!(target: "card_battle::zones", %player, "draw.deck_empty");
            self.emit(BattleEvent::DeckEmpty { player });
            return false;
        };
        let id = card.id;
        data.hand.push_back(card);
        self.emit(BattleEvent::CardDrawn { player, card: id });
        true
    }

    /// Put a card straight into a player's hand.
    pub fn add_card_to_hand(&mut self, player: PlayerId, card: Card) {
        let id = card.id;
        self.player_mut(player).hand.push_back(card);
        self.emit(BattleEvent::CardDrawn { player, card: id });
    }

    /// Return the listed hand cards to the deck, shuffle, and draw the same
    /// number back. Ids not in hand are ignored. Returns how many cards
    /// were replaced.
    pub fn mulligan(&mut self, player: PlayerId, cards: &[CardId], rng: &mut GameRng) -> usize {
        let data = self.player_mut(player);
        let mut returned = 0;
        for &id in cards {
            if let Some(card) = data.take_from_hand(id) {
                data.deck.push_back(card);
                returned += 1;
            }
        }

        let mut deck: Vec<Card> = data.deck.iter().cloned().collect();
        rng.shuffle(&mut deck);
        data.deck = deck.into_iter().collect();

        for _ in 0..returned {
            self.draw_card(player);
        }
        self.emit(BattleEvent::Mulligan { player, count: returned });
        returned
    }

    /// Play a card from hand.
    ///
    /// Validates hand membership and mana, then removes the card, debits
    /// MP and puts units and totems into play. Spells are only paid for;
    /// the caller resolves their effect. Returns `None` with no mutation on
    /// any rejection.
    pub fn try_play_card(&mut self, player: PlayerId, card: CardId) -> Option<PlayedCard> {
        let data = self.player(player);
        let Some(in_hand) = data.hand_card(card) else {
            debug!(target: "card_battle::zones", %player, card = card.0, "play.rejected.not_in_hand");
            return None;
        };
        if in_hand.cost() > data.current_mp {
            debug!(
                target: "card_battle::zones",
                %player,
                card = card.0,
                cost = in_hand.cost(),
                mp = data.current_mp,
                "play.rejected.mana"
            );
            return None;
        }

        let data = self.player_mut(player);
        let card = data.take_from_hand(card)?;
        data.current_mp -= card.cost();
        self.emit(BattleEvent::PlayerDataChanged { player });

        let template = Arc::clone(&card.template);
        let played = match &template.kind {
            CardKind::Unit(stats) => {
                let id = self.ids.next_unit();
                let unit = Unit::new(id, player, stats.attack, stats.hp)
                    .with_keywords(stats.keywords.clone())
                    .with_template(card.template_id());
                self.player_mut(player).field.add_unit(unit);
                self.emit(BattleEvent::UnitSummoned {
                    player,
                    card: Some(card.id),
                    unit: id,
                });
                PlayedCard::Unit { card, unit: id }
            }
            CardKind::Totem => {
                let totem = Totem {
                    owner: player,
                    template: card.template_id(),
                };
                self.player_mut(player).field.add_totem(totem);
                self.emit(BattleEvent::TotemPlaced { player, card: card.id });
                PlayedCard::Totem { card }
            }
            CardKind::Spell { .. } => {
                self.emit(BattleEvent::SpellPlayed { player, card: card.id });
                PlayedCard::Spell { card }
            }
        };

        debug!(
            target: "card_battle::zones",
            %player,
            card = played.card().id.0,
            kind = played.card().kind().label(),
            "play.accepted"
        );
        Some(played)
    }

    // === Per-turn mutators ===

    /// MaxMP += 1, respecting the configured cap.
    pub fn increase_max_mp(&mut self, player: PlayerId) {
        let cap = self.mp_cap;
        let data = self.player_mut(player);
        data.max_mp += 1;
        if let Some(cap) = cap {
            data.max_mp = data.max_mp.min(cap);
        }
        self.emit(BattleEvent::PlayerDataChanged { player });
    }

    /// CurrentMP = MaxMP.
    pub fn restore_mp(&mut self, player: PlayerId) {
        let data = self.player_mut(player);
        data.current_mp = data.max_mp;
        self.emit(BattleEvent::PlayerDataChanged { player });
    }

    pub fn grant_attack_to_all_units(&mut self, player: PlayerId) {
        for unit in self.player_mut(player).field.units_mut() {
            unit.can_attack = true;
        }
    }

    pub fn increment_turns_on_field(&mut self, player: PlayerId) {
        for unit in self.player_mut(player).field.units_mut() {
            unit.turns_on_field += 1;
        }
    }

    /// Reduce a player's HP.
    pub fn damage_player(&mut self, player: PlayerId, amount: i32) {
        self.player_mut(player).hp -= amount;
        self.emit(BattleEvent::PlayerDataChanged { player });
    }

    // === Units and partners ===

    /// Remove a unit from its owner's field and notify. A partner goes back
    /// to its partner zone.
    pub fn destroy_unit(&mut self, owner: PlayerId, unit: UnitId) -> Option<Unit> {
        let removed = self.player_mut(owner).field.remove_unit(unit)?;
        self.unit_left_field(owner, unit, removed.is_partner);
        Some(removed)
    }

    /// Bookkeeping for a unit that is already off the field.
    pub(crate) fn unit_left_field(&mut self, owner: PlayerId, unit: UnitId, was_partner: bool) {
        debug!(target: "card_battle::zones", %owner, unit = unit.0, was_partner, "unit.left_field");
        self.emit(BattleEvent::UnitDestroyed { owner, unit });
        if was_partner {
            self.return_partner(owner, unit);
        }
    }

    /// Put a partner in a player's partner zone (off the field).
    ///
    /// Fails while the player's partner is on the field.
    pub fn place_partner(&mut self, player: PlayerId, partner: PartnerDefinition) -> bool {
        let placed = self.player_mut(player).partner.place(partner);
        if !placed {
            debug!(target: "card_battle::zones", %player, "partner.place_rejected.on_field");
        }
        placed
    }

    /// Pay for and summon the partner as a unit.
    ///
    /// Fails if there is no partner, it is already on the field, or mana is
    /// short.
    pub fn summon_partner(&mut self, player: PlayerId) -> Option<UnitId> {
        let data = self.player(player);
        let Some(partner) = data.partner.partner().cloned() else {
            debug!(target: "card_battle::zones", %player, "partner.rejected.none");
            return None;
        };
        if data.partner.is_on_field() {
            debug!(target: "card_battle::zones", %player, "partner.rejected.on_field");
            return None;
        }
        if partner.cost > data.current_mp {
            debug!(target: "card_battle::zones", %player, cost = partner.cost, "partner.rejected.mana");
            return None;
        }

        let id = self.ids.next_unit();
        let unit = Unit::partner(id, player, &partner);
        let cost = partner.cost;

        let data = self.player_mut(player);
        data.current_mp -= cost;
        data.field.add_unit(unit);
        data.partner.mark_on_field(id);

        self.emit(BattleEvent::PlayerDataChanged { player });
        self.emit(BattleEvent::UnitSummoned {
            player,
            card: None,
            unit: id,
        });
        Some(id)
    }

    /// Take the partner off the field (if still there) and mark it
    /// summonable again.
    pub fn return_partner(&mut self, player: PlayerId, unit: UnitId) {
        let data = self.player_mut(player);
        if data.partner.field_unit() != Some(unit) {
            return;
        }
        data.field.remove_unit(unit);
        data.partner.mark_returned();
        self.emit(BattleEvent::PartnerReturned { player, unit });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTemplate, Keyword, TemplateId};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn card(id: u32, template: CardTemplate) -> Card {
        Card::new(CardId(id), Arc::new(template))
    }

    fn grunt(id: u32, cost: i32) -> Card {
        card(id, CardTemplate::unit(TemplateId::new(1), "Grunt", cost, 2, 3))
    }

    fn manager_with_decks(deck0: Vec<Card>, deck1: Vec<Card>) -> ZoneManager {
        let mut zones = ZoneManager::new();
        zones.register_player(P0, PlayerData::new(15, deck0)).unwrap();
        zones.register_player(P1, PlayerData::new(15, deck1)).unwrap();
        zones
    }

    fn give_mp(zones: &mut ZoneManager, player: PlayerId, mp: i32) {
        let data = zones.player_mut(player);
        data.max_mp = mp;
        data.current_mp = mp;
    }

    #[test]
    fn test_register_twice_fails() {
        let mut zones = manager_with_decks(Vec::new(), Vec::new());
        let err = zones.register_player(P0, PlayerData::default()).unwrap_err();
        assert_eq!(err, BattleError::PlayerAlreadyRegistered(P0));
    }

    #[test]
    #[should_panic(expected = "is not registered")]
    fn test_unregistered_player_panics() {
        let zones = ZoneManager::new();
        let _ = zones.player(P0);
    }

    #[test]
    fn test_draw_moves_top_card() {
        let mut zones = manager_with_decks(vec![grunt(1, 1), grunt(2, 1)], Vec::new());

        assert!(zones.draw_card(P0));
        let data = zones.player(P0);
        assert_eq!(data.hand.len(), 1);
        assert_eq!(data.hand[0].id, CardId(1));
        assert_eq!(data.deck.len(), 1);
        assert!(matches!(
            zones.events().pending().last(),
            Some(BattleEvent::CardDrawn { card: CardId(1), .. })
        ));
    }

    #[test]
    fn test_draw_empty_deck_changes_nothing() {
        let mut zones = manager_with_decks(Vec::new(), Vec::new());
        let before = zones.player(P0).clone();

        assert!(!zones.draw_card(P0));
        assert_eq!(zones.player(P0), &before);
        assert_eq!(zones.events_mut().drain(), vec![BattleEvent::DeckEmpty { player: P0 }]);
    }

    #[test]
    fn test_play_unit_summons() {
        let mut zones = manager_with_decks(vec![grunt(1, 2)], Vec::new());
        zones.draw_card(P0);
        give_mp(&mut zones, P0, 3);

        let played = zones.try_play_card(P0, CardId(1)).unwrap();
        let PlayedCard::Unit { unit, .. } = played else {
            panic!("expected a unit");
        };

        let data = zones.player(P0);
        assert!(data.hand.is_empty());
        assert_eq!(data.current_mp, 1);
        let summoned = data.field.unit(unit).unwrap();
        assert_eq!((summoned.attack, summoned.hp), (2, 3));
        assert_eq!(summoned.turns_on_field, 0);
        assert_eq!(zones.find_unit(unit).unwrap().owner, P0);
    }

    #[test]
    fn test_play_rejected_for_mana() {
        let mut zones = manager_with_decks(vec![grunt(1, 4)], Vec::new());
        zones.draw_card(P0);
        give_mp(&mut zones, P0, 3);
        let before = zones.player(P0).clone();

        assert!(zones.try_play_card(P0, CardId(1)).is_none());
        assert_eq!(zones.player(P0), &before);
    }

    #[test]
    fn test_play_rejected_when_not_in_hand() {
        let mut zones = manager_with_decks(vec![grunt(1, 0)], Vec::new());
        assert!(zones.try_play_card(P0, CardId(1)).is_none());
        assert_eq!(zones.owner_of_card(CardId(1)), None);

        zones.draw_card(P0);
        assert_eq!(zones.owner_of_card(CardId(1)), Some(P0));
        assert!(zones.try_play_card(P1, CardId(1)).is_none());
    }

    #[test]
    fn test_play_totem_and_spell() {
        let totem = card(1, CardTemplate::totem(TemplateId::new(2), "Idol", 1));
        let spell = card(2, CardTemplate::strike(TemplateId::new(3)));
        let mut zones = manager_with_decks(vec![totem, spell], Vec::new());
        zones.draw_card(P0);
        zones.draw_card(P0);
        give_mp(&mut zones, P0, 2);

        assert!(matches!(zones.try_play_card(P0, CardId(1)), Some(PlayedCard::Totem { .. })));
        assert!(matches!(zones.try_play_card(P0, CardId(2)), Some(PlayedCard::Spell { .. })));

        let data = zones.player(P0);
        assert_eq!(data.field.totem_count(), 1);
        assert_eq!(data.field.unit_count(), 0);
        assert_eq!(data.current_mp, 0);
    }

    #[test]
    fn test_turn_start_mutators() {
        let mut zones = manager_with_decks(vec![grunt(1, 0)], Vec::new()).with_mp_cap(Some(2));
        zones.draw_card(P0);
        let PlayedCard::Unit { unit, .. } = zones.try_play_card(P0, CardId(1)).unwrap() else {
            panic!("expected a unit");
        };
        zones.player_mut(P0).field.unit_mut(unit).unwrap().can_attack = false;

        for _ in 0..3 {
            zones.increase_max_mp(P0);
        }
        zones.restore_mp(P0);
        zones.grant_attack_to_all_units(P0);
        zones.increment_turns_on_field(P0);

        let data = zones.player(P0);
        assert_eq!(data.max_mp, 2);
        assert_eq!(data.current_mp, 2);
        let u = data.field.unit(unit).unwrap();
        assert!(u.can_attack);
        assert_eq!(u.turns_on_field, 1);
    }

    #[test]
    fn test_partner_summon_and_return() {
        let mut zones = manager_with_decks(Vec::new(), Vec::new());
        zones.place_partner(P0, PartnerDefinition::new("Aria", 3, 2, 4).with_keyword(Keyword::Guard));

        assert!(zones.summon_partner(P0).is_none(), "no mana yet");
        give_mp(&mut zones, P0, 5);

        let unit = zones.summon_partner(P0).unwrap();
        assert!(zones.summon_partner(P0).is_none(), "already on field");
        assert_eq!(zones.player(P0).current_mp, 2);
        assert!(zones.player(P0).field.has_guard());

        zones.destroy_unit(P0, unit).unwrap();
        let data = zones.player(P0);
        assert!(!data.partner.is_on_field());
        assert_eq!(data.field.unit_count(), 0);

        give_mp(&mut zones, P0, 3);
        let again = zones.summon_partner(P0).unwrap();
        assert_ne!(again, unit);
    }

    #[test]
    fn test_partner_cannot_be_replaced_while_on_field() {
        let mut zones = manager_with_decks(Vec::new(), Vec::new());
        assert!(zones.place_partner(P0, PartnerDefinition::new("Aria", 0, 2, 4)));
        let unit = zones.summon_partner(P0).unwrap();

        assert!(!zones.place_partner(P0, PartnerDefinition::new("Vex", 0, 1, 1)));
        assert!(zones.summon_partner(P0).is_none());

        let data = zones.player(P0);
        assert_eq!(data.field.unit_ids(), vec![unit]);
        assert_eq!(data.partner.field_unit(), Some(unit));
        assert_eq!(data.partner.partner().unwrap().name, "Aria");

        zones.destroy_unit(P0, unit).unwrap();
        assert!(zones.place_partner(P0, PartnerDefinition::new("Vex", 0, 1, 1)));
    }

    #[test]
    fn test_mulligan_redraws_same_count() {
        let deck: Vec<Card> = (0..8).map(|i| grunt(i, 1)).collect();
        let mut zones = manager_with_decks(deck, Vec::new());
        for _ in 0..3 {
            zones.draw_card(P0);
        }
        let mut rng = GameRng::new(11);

        let replaced = zones.mulligan(P0, &[CardId(0), CardId(2), CardId(99)], &mut rng);

        let data = zones.player(P0);
        assert_eq!(replaced, 2);
        assert_eq!(data.hand.len(), 3);
        assert_eq!(data.hand.len() + data.deck.len(), 8);
        assert!(data.holds(CardId(1)));
    }

    #[test]
    fn test_add_card_to_hand() {
        let mut zones = manager_with_decks(Vec::new(), Vec::new());
        let id = zones.ids_mut().next_card();
        zones.add_card_to_hand(P1, card(id.0, CardTemplate::strike(TemplateId::new(1))));
        assert_eq!(zones.owner_of_card(id), Some(P1));
    }
}
