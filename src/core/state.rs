//! Battle state: canonical player data and the owner-relative snapshot.
//!
//! ## PlayerData
//!
//! The authoritative per-player record (HP, mana, deck, hand, field,
//! partner zone). Exactly one exists per seat for the lifetime of a match,
//! owned by the `ZoneManager`.
//!
//! ## GameState
//!
//! A self-contained view from one player's side, used by the AI planner
//! for hypothetical simulation. It is always a deep copy: every unit is an
//! independent value carrying the same `UnitId`, so simulated mutation can
//! never leak into canonical state. Effects that must mutate live state use
//! [`LiveView`](crate::effects::LiveView) instead.

use im::Vector;

use super::player::PlayerId;
use crate::cards::Card;
use crate::core::CardId;
use crate::zones::{FieldZone, PartnerZone};

/// Canonical per-player data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerData {
    pub hp: i32,
    pub max_mp: i32,
    pub current_mp: i32,
    /// Front of the vector is the top of the deck.
    pub deck: Vector<Card>,
    pub hand: Vector<Card>,
    pub field: FieldZone,
    pub partner: PartnerZone,
}

impl PlayerData {
    /// Fresh player with `hp`, no mana and the given deck.
    #[must_use]
    pub fn new(hp: i32, deck: impl IntoIterator<Item = Card>) -> Self {
        Self {
            hp,
            deck: deck.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hand_card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn holds(&self, id: CardId) -> bool {
        self.hand_card(id).is_some()
    }

    /// Remove a card from hand by id.
    pub fn take_from_hand(&mut self, id: CardId) -> Option<Card> {
        let index = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(index))
    }
}

/// Owner-relative snapshot used for AI simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub my_player: PlayerId,
    pub opponent_player: PlayerId,
    pub my_hand: Vector<Card>,
    pub my_field: FieldZone,
    pub opponent_field: FieldZone,
    pub my_hp: i32,
    pub my_mp: i32,
    pub opponent_hp: i32,
    pub opponent_mp: i32,
}

impl GameState {
    /// Deep-copy a snapshot for `me` out of both players' canonical data.
    #[must_use]
    pub fn capture(me: PlayerId, mine: &PlayerData, theirs: &PlayerData) -> Self {
        Self {
            my_player: me,
            opponent_player: me.opponent(),
            my_hand: mine.hand.clone(),
            my_field: mine.field.clone(),
            opponent_field: theirs.field.clone(),
            my_hp: mine.hp,
            my_mp: mine.current_mp,
            opponent_hp: theirs.hp,
            opponent_mp: theirs.current_mp,
        }
    }

    /// Field for either side.
    ///
    /// Panics if `player` is not part of this snapshot.
    #[must_use]
    pub fn field(&self, player: PlayerId) -> &FieldZone {
        if player == self.my_player {
            &self.my_field
        } else if player == self.opponent_player {
            &self.opponent_field
        } else {
            panic!("{} is not part of this snapshot", player)
        }
    }

    pub fn field_mut(&mut self, player: PlayerId) -> &mut FieldZone {
        if player == self.my_player {
            &mut self.my_field
        } else if player == self.opponent_player {
            &mut self.opponent_field
        } else {
            panic!("{} is not part of this snapshot", player)
        }
    }

    pub fn hp_mut(&mut self, player: PlayerId) -> &mut i32 {
        if player == self.my_player {
            &mut self.my_hp
        } else if player == self.opponent_player {
            &mut self.opponent_hp
        } else {
            panic!("{} is not part of this snapshot", player)
        }
    }

    #[must_use]
    pub fn hp(&self, player: PlayerId) -> i32 {
        if player == self.my_player {
            self.my_hp
        } else {
            self.opponent_hp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTemplate, TemplateId};
    use crate::core::UnitId;
    use crate::zones::Unit;
    use std::sync::Arc;

    fn player_with_unit(hp: i32, unit: Unit) -> PlayerData {
        let mut data = PlayerData::new(hp, Vec::new());
        data.field.add_unit(unit);
        data
    }

    #[test]
    fn test_take_from_hand() {
        let template = Arc::new(CardTemplate::strike(TemplateId::new(1)));
        let mut data = PlayerData::new(15, Vec::new());
        data.hand.push_back(Card::new(CardId(4), template));

        assert!(data.holds(CardId(4)));
        assert_eq!(data.take_from_hand(CardId(4)).unwrap().id, CardId(4));
        assert!(!data.holds(CardId(4)));
        assert!(data.take_from_hand(CardId(4)).is_none());
    }

    #[test]
    fn test_capture_is_owner_relative() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let a = player_with_unit(12, Unit::new(UnitId(1), p0, 1, 1));
        let b = player_with_unit(9, Unit::new(UnitId(2), p1, 2, 2));

        let snapshot = GameState::capture(p1, &b, &a);
        assert_eq!(snapshot.my_player, p1);
        assert_eq!(snapshot.opponent_player, p0);
        assert_eq!(snapshot.my_hp, 9);
        assert_eq!(snapshot.opponent_hp, 12);
        assert!(snapshot.field(p0).contains(UnitId(1)));
        assert!(snapshot.field(p1).contains(UnitId(2)));
    }

    #[test]
    fn test_snapshot_mutation_does_not_leak() {
        let p0 = PlayerId::new(0);
        let mine = player_with_unit(15, Unit::new(UnitId(1), p0, 3, 5));
        let theirs = player_with_unit(15, Unit::new(UnitId(2), p0.opponent(), 1, 1));

        let mut snapshot = GameState::capture(p0, &mine, &theirs);
        snapshot.my_field.unit_mut(UnitId(1)).unwrap().hp = -1;
        snapshot.opponent_field.remove_unit(UnitId(2));
        snapshot.my_hp = 0;

        assert_eq!(mine.field.unit(UnitId(1)).unwrap().hp, 5);
        assert!(theirs.field.contains(UnitId(2)));
        assert_eq!(mine.hp, 15);
    }
}
