//! Attack legality and combat resolution.
//!
//! ## Legality
//!
//! - A unit may attack units if it can still attack this turn and it has
//!   been on the field since the owner's last turn start, or has Rush or
//!   Divine Speed.
//! - A unit may attack the opposing player under the same conditions
//!   (only Divine Speed waives the turns-on-field rule), and only if no
//!   opposing unit has Guard. Guard is field-wide: one Guard blocks every
//!   player-targeted attack, whatever the attacker's keywords.
//!
//! ## Resolution
//!
//! Unit combat is simultaneous: both damage values are read before either
//! is applied. Units at HP <= 0 leave the field in the same call; a fallen
//! partner returns to its partner zone. The attacker is exhausted either
//! way.
//!
//! Resolution expects legality to have been checked already. A missing unit
//! here is a caller bug and panics.

use tracing::debug;

use crate::cards::Keyword;
use crate::core::{AttackTarget, PlayerId, UnitId};
use crate::zones::{FieldZone, Unit, ZoneManager};

/// Units removed by a unit-vs-unit attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attacker_destroyed: bool,
    pub defender_destroyed: bool,
}

/// Whether `attacker` may attack an opposing unit right now.
#[must_use]
pub fn can_attack_unit(attacker: &Unit) -> bool {
    attacker.can_attack
        && (attacker.turns_on_field > 0 || attacker.has(Keyword::Rush) || attacker.has(Keyword::DivineSpeed))
}

/// Whether `attacker` may attack the player behind `opposing_field`.
#[must_use]
pub fn can_attack_player(attacker: &Unit, opposing_field: &FieldZone) -> bool {
    attacker.can_attack
        && !opposing_field.has_guard()
        && (attacker.turns_on_field > 0 || attacker.has(Keyword::DivineSpeed))
}

/// Every attack `attacker` may currently make against `opponent`.
#[must_use]
pub fn attack_targets(attacker: &Unit, opposing_field: &FieldZone, opponent: PlayerId) -> Vec<AttackTarget> {
    let mut targets = Vec::new();
    if can_attack_unit(attacker) {
        targets.extend(opposing_field.units().map(|u| AttackTarget::Unit(u.id)));
    }
    if can_attack_player(attacker, opposing_field) {
        targets.push(AttackTarget::Player(opponent));
    }
    targets
}

/// Exchange damage between two units using pre-damage attack values and
/// exhaust the attacker. Does not remove anything.
pub fn trade_blows(attacker: &mut Unit, defender: &mut Unit) {
    let (dealt, taken) = (attacker.attack, defender.attack);
    defender.hp -= dealt;
    attacker.hp -= taken;
    attacker.can_attack = false;
}

/// Resolve an attack between two units on opposite fields.
///
/// Panics if either unit is missing or both are on the same side.
pub fn resolve_unit_attack(zones: &mut ZoneManager, attacker: UnitId, defender: UnitId) -> AttackOutcome {
    let attacker_owner = owner_of(zones, attacker);
    let defender_owner = owner_of(zones, defender);
    assert_ne!(
        attacker_owner, defender_owner,
        "{} and {} are on the same side",
        attacker, defender
    );

    let (atk_side, def_side) = zones.players_pair_mut(attacker_owner, defender_owner);
    let (atk_unit, def_unit) = match (atk_side.field.unit_mut(attacker), def_side.field.unit_mut(defender)) {
        (Some(a), Some(d)) => (a, d),
        _ => unreachable!("both units were located above"),
    };
    let (atk_before, def_before) = (atk_unit.hp, def_unit.hp);
    trade_blows(atk_unit, def_unit);
    let outcome = AttackOutcome {
        attacker_destroyed: atk_unit.is_dead(),
        defender_destroyed: def_unit.is_dead(),
    };
    let (atk_hp, def_hp) = (atk_unit.hp, def_unit.hp);

    debug!(
        target: "card_battle::combat",
        attacker = attacker.0,
        defender = defender.0,
        attacker_hp = atk_hp,
        defender_hp = def_hp,
        "attack.unit"
    );

    settle(zones, defender_owner, defender, def_before, def_hp);
    settle(zones, attacker_owner, attacker, atk_before, atk_hp);
    outcome
}

/// Resolve an attack on the opposing player. HP <= 0 is left for the flow
/// controller to notice.
///
/// Panics if the attacker is missing.
pub fn resolve_player_attack(zones: &mut ZoneManager, attacker: UnitId, target: PlayerId) {
    let owner = owner_of(zones, attacker);
    let unit = zones
        .player_mut(owner)
        .field
        .unit_mut(attacker)
        .unwrap_or_else(|| panic!("{} vanished during resolution", attacker));
    unit.can_attack = false;
    let damage = unit.attack;

    debug!(target: "card_battle::combat", attacker = attacker.0, player = %target, damage, "attack.player");
    zones.damage_player(target, damage);
}

fn owner_of(zones: &ZoneManager, unit: UnitId) -> PlayerId {
    match zones.find_unit(unit) {
        Some(u) => u.owner,
        None => panic!("{} is not on any field", unit),
    }
}

/// Remove a dead combatant, or report a survivor's HP if it dropped.
fn settle(zones: &mut ZoneManager, owner: PlayerId, unit: UnitId, before: i32, hp: i32) {
    if hp <= 0 {
        zones.destroy_unit(owner, unit);
    } else if hp < before {
        zones.emit(crate::events::BattleEvent::UnitHpChanged { owner, unit, hp });
    }
}
