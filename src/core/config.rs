//! Battle configuration.
//!
//! A match is configured once at construction by a `BattleConfig`:
//! - Starting resources (HP, opening hand size, optional MP ceiling)
//! - Which side the AI planner drives and which side is interactive
//! - Whether attacks wait for a presentation "animation complete" signal
//! - What happens when a player must draw from an empty deck
//!
//! Nothing here is hardcoded elsewhere; components read it from the match.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// What the flow controller does when a turn-start draw finds an empty deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckOutPolicy {
    /// Skip mana growth, attack refresh and turns-on-field for that turn.
    /// The turn itself still proceeds.
    #[default]
    Stall,
    /// The player who could not draw loses the match.
    Lose,
}

/// Configuration for one match.
///
/// ## Example
///
/// ```
/// use card_battle::core::{BattleConfig, DeckOutPolicy, PlayerId};
///
/// let config = BattleConfig::new(7)
///     .with_starting_hp(20)
///     .with_ai_player(None)
///     .headless()
///     .with_deck_out(DeckOutPolicy::Lose);
///
/// assert_eq!(config.starting_hp, 20);
/// assert!(!config.animate_attacks);
/// assert!(config.ai_player.is_none());
/// assert_eq!(config.interactive_player, Some(PlayerId::new(0)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Seed for every random decision in the match.
    pub seed: u64,

    /// HP each player starts with.
    pub starting_hp: i32,

    /// Cards drawn by each player during initialization.
    pub starting_hand_size: usize,

    /// Ceiling for MaxMP growth. `None` for unbounded.
    pub mp_cap: Option<i32>,

    /// Side driven by the AI planner at turn start.
    pub ai_player: Option<PlayerId>,

    /// Side whose multi-candidate target choices suspend for input.
    pub interactive_player: Option<PlayerId>,

    /// Attacks wait for `animation_completed` before resolving.
    pub animate_attacks: bool,

    /// Empty-deck handling at turn start.
    pub deck_out: DeckOutPolicy,

    /// Enqueue a TurnEnd after the AI's planned actions.
    pub append_turn_end: bool,
}

impl BattleConfig {
    /// Default two-player setup: player 0 interactive, player 1 AI.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            starting_hp: 15,
            starting_hand_size: 5,
            mp_cap: None,
            ai_player: Some(PlayerId::new(1)),
            interactive_player: Some(PlayerId::new(0)),
            animate_attacks: true,
            deck_out: DeckOutPolicy::Stall,
            append_turn_end: true,
        }
    }

    /// Set starting HP.
    #[must_use]
    pub fn with_starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Cap MaxMP growth.
    #[must_use]
    pub fn with_mp_cap(mut self, cap: i32) -> Self {
        self.mp_cap = Some(cap);
        self
    }

    /// Choose the AI-controlled side (or none).
    #[must_use]
    pub fn with_ai_player(mut self, player: Option<PlayerId>) -> Self {
        self.ai_player = player;
        self
    }

    /// Choose the interactive side (or none).
    #[must_use]
    pub fn with_interactive_player(mut self, player: Option<PlayerId>) -> Self {
        self.interactive_player = player;
        self
    }

    /// Resolve attacks immediately instead of waiting for presentation.
    #[must_use]
    pub fn headless(mut self) -> Self {
        self.animate_attacks = false;
        self
    }

    /// Set the empty-deck policy.
    #[must_use]
    pub fn with_deck_out(mut self, policy: DeckOutPolicy) -> Self {
        self.deck_out = policy;
        self
    }

    /// Control whether AI turns end automatically.
    #[must_use]
    pub fn with_append_turn_end(mut self, append: bool) -> Self {
        self.append_turn_end = append;
        self
    }

    /// Check whether `player` is the interactive side.
    #[must_use]
    pub fn is_interactive(&self, player: PlayerId) -> bool {
        self.interactive_player == Some(player)
    }

    /// Check whether `player` is the AI side.
    #[must_use]
    pub fn is_ai(&self, player: PlayerId) -> bool {
        self.ai_player == Some(player)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
