//! Views that effects resolve against.
//!
//! `BattleView` is implemented twice:
//! - [`LiveView`] aliases canonical `PlayerData`, so mutations are the real
//!   mutations (used when the pipeline resolves an effect)
//! - [`GameState`] is a deep copy, so mutations stay hypothetical (used by
//!   the AI planner)
//!
//! Picking the type picks the semantics; there is no flag to get wrong.

use crate::core::{GameState, PlayerData, PlayerId, PlayerMap};
use crate::zones::FieldZone;

/// State an effect can read and mutate, seen from the acting player.
pub trait BattleView {
    /// Player resolving the effect.
    fn acting_player(&self) -> PlayerId;

    fn field(&self, player: PlayerId) -> &FieldZone;

    fn field_mut(&mut self, player: PlayerId) -> &mut FieldZone;

    fn hp(&self, player: PlayerId) -> i32;

    fn hp_mut(&mut self, player: PlayerId) -> &mut i32;

    fn opponent(&self) -> PlayerId {
        self.acting_player().opponent()
    }
}

/// Mutable view over canonical player data.
pub struct LiveView<'a> {
    acting: PlayerId,
    players: &'a mut PlayerMap<Option<PlayerData>>,
}

impl<'a> LiveView<'a> {
    pub(crate) fn new(acting: PlayerId, players: &'a mut PlayerMap<Option<PlayerData>>) -> Self {
        Self { acting, players }
    }

    fn data(&self, player: PlayerId) -> &PlayerData {
        match self.players.get(player) {
            Some(data) => data,
            None => panic!("{} is not registered", player),
        }
    }

    fn data_mut(&mut self, player: PlayerId) -> &mut PlayerData {
        match self.players.get_mut(player) {
            Some(data) => data,
            None => panic!("{} is not registered", player),
        }
    }
}

impl BattleView for LiveView<'_> {
    fn acting_player(&self) -> PlayerId {
        self.acting
    }

    fn field(&self, player: PlayerId) -> &FieldZone {
        &self.data(player).field
    }

    fn field_mut(&mut self, player: PlayerId) -> &mut FieldZone {
        &mut self.data_mut(player).field
    }

    fn hp(&self, player: PlayerId) -> i32 {
        self.data(player).hp
    }

    fn hp_mut(&mut self, player: PlayerId) -> &mut i32 {
        &mut self.data_mut(player).hp
    }
}

impl BattleView for GameState {
    fn acting_player(&self) -> PlayerId {
        self.my_player
    }

    fn field(&self, player: PlayerId) -> &FieldZone {
        GameState::field(self, player)
    }

    fn field_mut(&mut self, player: PlayerId) -> &mut FieldZone {
        GameState::field_mut(self, player)
    }

    fn hp(&self, player: PlayerId) -> i32 {
        GameState::hp(self, player)
    }

    fn hp_mut(&mut self, player: PlayerId) -> &mut i32 {
        GameState::hp_mut(self, player)
    }
}
