//! Effect resolution against canonical state.
//!
//! `resolve_effect` runs an effect on a live view and then synchronizes:
//! - units present before but missing after (set difference) are reported
//!   destroyed, and partners go back to their partner zones
//! - surviving units whose HP went down get an HP-changed notification
//! - players whose HP changed get a player-data notification
//!
//! Any unit left at HP <= 0 is swept off its field before notifications go
//! out, so no observer ever sees one.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::effect::EffectKind;
use super::targeting::EffectTarget;
use super::view::BattleView;
use crate::core::{PlayerId, PlayerMap, UnitId};
use crate::events::BattleEvent;
use crate::zones::ZoneManager;

/// What an effect resolution changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectReport {
    pub destroyed: Vec<UnitId>,
    pub damaged: Vec<UnitId>,
    pub players_changed: Vec<PlayerId>,
}

#[derive(Clone, Copy)]
struct UnitBefore {
    owner: PlayerId,
    hp: i32,
    is_partner: bool,
}

/// Resolve `effect` for `acting` against canonical state and emit change
/// notifications.
pub fn resolve_effect(
    zones: &mut ZoneManager,
    acting: PlayerId,
    effect: &EffectKind,
    target: EffectTarget,
) -> EffectReport {
    let mut before: Vec<(UnitId, UnitBefore)> = Vec::new();
    for player in PlayerId::both() {
        for unit in zones.player(player).field.units() {
            before.push((
                unit.id,
                UnitBefore {
                    owner: player,
                    hp: unit.hp,
                    is_partner: unit.is_partner,
                },
            ));
        }
    }
    let hp_before: PlayerMap<i32> = PlayerMap::new(|p| zones.player(p).hp);

    {
        let mut view = zones.live_view(acting);
        effect.resolve(target, &mut view);
        for player in PlayerId::both() {
            view.field_mut(player).remove_dead();
        }
    }

    let after: FxHashMap<UnitId, i32> = PlayerId::both()
        .flat_map(|p| zones.player(p).field.units().map(|u| (u.id, u.hp)).collect::<Vec<_>>())
        .collect();

    let mut report = EffectReport::default();
    for (id, prior) in before {
        match after.get(&id) {
            None => {
                zones.unit_left_field(prior.owner, id, prior.is_partner);
                report.destroyed.push(id);
            }
            Some(&hp) if hp < prior.hp => {
                zones.emit(BattleEvent::UnitHpChanged {
                    owner: prior.owner,
                    unit: id,
                    hp,
                });
                report.damaged.push(id);
            }
            Some(_) => {}
        }
    }

    for player in PlayerId::both() {
        if zones.player(player).hp != hp_before[player] {
            zones.emit(BattleEvent::PlayerDataChanged { player });
            report.players_changed.push(player);
        }
    }

    debug!(
        target: "card_battle::effects",
        player = %acting,
        effect = effect.label(),
        ?target,
        destroyed = report.destroyed.len(),
        damaged = report.damaged.len(),
        "effect.resolved"
    );
    report
}
