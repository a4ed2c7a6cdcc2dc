//! Triggered effect behaviors.
//!
//! Every on-summon or spell behavior is an `EffectKind` variant chosen when
//! the template is authored. An effect exposes two operations:
//! - `available_targets`: candidates given a view of the battle
//! - `resolve`: apply the effect to one chosen target
//!
//! An absent or invalid target resolves as a no-op. Damage that drops a
//! unit to HP <= 0 removes it in the same call.

use serde::{Deserialize, Serialize};

use super::targeting::EffectTarget;
use super::view::BattleView;
use crate::core::{PlayerId, UnitId};

/// A triggered effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Damage one enemy unit.
    DamageEnemyUnit { amount: i32 },
    /// Damage one enemy unit or the enemy player.
    DamageEnemy { amount: i32 },
    /// Destroy one enemy unit outright.
    DestroyEnemyUnit,
    /// Heal the acting player, never above `cap`.
    HealSelf { amount: i32, cap: i32 },
}

impl EffectKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::DamageEnemyUnit { .. } => "damage_enemy_unit",
            EffectKind::DamageEnemy { .. } => "damage_enemy",
            EffectKind::DestroyEnemyUnit => "destroy_enemy_unit",
            EffectKind::HealSelf { .. } => "heal_self",
        }
    }

    /// Legal targets, in field order.
    pub fn available_targets<V: BattleView + ?Sized>(&self, view: &V) -> Vec<EffectTarget> {
        let opponent = view.opponent();
        let mut targets: Vec<EffectTarget> = match self {
            EffectKind::HealSelf { .. } => return vec![EffectTarget::None],
            _ => view
                .field(opponent)
                .units()
                .map(|u| EffectTarget::Unit(u.id))
                .collect(),
        };
        if let EffectKind::DamageEnemy { .. } = self {
            targets.push(EffectTarget::Player(opponent));
        }
        targets
    }

    /// Apply the effect to `target`.
    pub fn resolve<V: BattleView + ?Sized>(&self, target: EffectTarget, view: &mut V) {
        let opponent = view.opponent();

        match (*self, target) {
            (EffectKind::DamageEnemyUnit { amount }, EffectTarget::Unit(unit))
            | (EffectKind::DamageEnemy { amount }, EffectTarget::Unit(unit)) => {
                damage_unit(view, opponent, unit, amount);
            }
            (EffectKind::DamageEnemy { amount }, EffectTarget::Player(player)) if player == opponent => {
                *view.hp_mut(player) -= amount;
            }
            (EffectKind::DestroyEnemyUnit, EffectTarget::Unit(unit)) => {
                view.field_mut(opponent).remove_unit(unit);
            }
            (EffectKind::HealSelf { amount, cap }, _) => {
                let me = view.acting_player();
                let hp = view.hp_mut(me);
                *hp = (*hp + amount).min(cap);
            }
            _ => {}
        }
    }
}

/// Damage a unit on `owner`'s field, removing it if it dies. Units not on
/// that field are ignored.
fn damage_unit<V: BattleView + ?Sized>(view: &mut V, owner: PlayerId, unit: UnitId, amount: i32) {
    let field = view.field_mut(owner);
    let dead = match field.unit_mut(unit) {
        Some(u) => {
            u.hp -= amount;
            u.is_dead()
        }
        None => return,
    };
    if dead {
        field.remove_unit(unit);
    }
}
