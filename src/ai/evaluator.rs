//! Linear material/tempo evaluation of a snapshot.
//!
//! `score = hp·(myHP − oppHP) + mp·(myMP − oppMP)
//!        + Σ(unit_hp·HP + unit_attack·Attack) over my units
//!        − Σ(unit_hp·HP + unit_attack·Attack) over opponent units`

use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::zones::FieldZone;

/// Weights of the evaluation function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub hp: i32,
    pub mp: i32,
    pub unit_hp: i32,
    pub unit_attack: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            hp: 10,
            mp: 5,
            unit_hp: 2,
            unit_attack: 3,
        }
    }
}

impl EvalWeights {
    #[must_use]
    pub fn with_hp(mut self, weight: i32) -> Self {
        self.hp = weight;
        self
    }

    #[must_use]
    pub fn with_mp(mut self, weight: i32) -> Self {
        self.mp = weight;
        self
    }

    /// Score a snapshot from its owner's point of view.
    #[must_use]
    pub fn evaluate(&self, state: &GameState) -> i64 {
        let hp = i64::from(self.hp) * i64::from(state.my_hp - state.opponent_hp);
        let mp = i64::from(self.mp) * i64::from(state.my_mp - state.opponent_mp);
        hp + mp + self.material(&state.my_field) - self.material(&state.opponent_field)
    }

    fn material(&self, field: &FieldZone) -> i64 {
        field
            .units()
            .map(|u| i64::from(self.unit_hp * u.hp + self.unit_attack * u.attack))
            .sum()
    }
}
