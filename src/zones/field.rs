//! Battlefield objects: units, totems, field zones and partner zones.
//!
//! Field contents are stored in `im::Vector`s so a whole field clones in
//! O(1) for AI snapshots; a clone is a fully independent value and writes
//! to it never reach the original.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Keyword, Keywords, PartnerDefinition, TemplateId};
use crate::core::{PlayerId, UnitId};

/// A unit on a field.
///
/// Invariant: a unit whose `hp` reached 0 or below is removed from its
/// field in the same step that reduced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub hp: i32,
    pub attack: i32,
    /// Incremented at each of the owner's turn starts.
    pub turns_on_field: u32,
    /// Reset at the owner's turn start, cleared after attacking.
    pub can_attack: bool,
    pub keywords: Keywords,
    pub is_partner: bool,
    /// Template the unit was summoned from (`None` for partners).
    pub template: Option<TemplateId>,
}

impl Unit {
    /// Fresh unit as it enters the field.
    #[must_use]
    pub fn new(id: UnitId, owner: PlayerId, attack: i32, hp: i32) -> Self {
        Self {
            id,
            owner,
            hp,
            attack,
            turns_on_field: 0,
            can_attack: true,
            keywords: Keywords::new(),
            is_partner: false,
            template: None,
        }
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    /// Build the field unit for a partner.
    #[must_use]
    pub fn partner(id: UnitId, owner: PlayerId, definition: &PartnerDefinition) -> Self {
        Self {
            is_partner: true,
            ..Self::new(id, owner, definition.attack, definition.hp)
                .with_keywords(definition.keywords.clone())
        }
    }

    #[must_use]
    pub fn has(&self, keyword: Keyword) -> bool {
        self.keywords.has(keyword)
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// A totem on a field. Totems neither attack nor can be attacked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totem {
    pub owner: PlayerId,
    pub template: TemplateId,
}

/// One player's field: ordered units plus totems.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldZone {
    units: Vector<Unit>,
    totems: Vector<Totem>,
}

impl FieldZone {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Units in display order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    pub fn totems(&self) -> impl Iterator<Item = &Totem> {
        self.totems.iter()
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn totem_count(&self) -> usize {
        self.totems.len()
    }

    #[must_use]
    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|u| u.id).collect()
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: UnitId) -> bool {
        self.unit(id).is_some()
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push_back(unit);
    }

    pub fn add_totem(&mut self, totem: Totem) {
        self.totems.push_back(totem);
    }

    /// Remove a unit by id.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        Some(self.units.remove(index))
    }

    /// Remove every unit at HP <= 0 and return them.
    pub fn remove_dead(&mut self) -> Vec<Unit> {
        let dead: Vec<Unit> = self.units.iter().filter(|u| u.is_dead()).cloned().collect();
        if !dead.is_empty() {
            self.units.retain(|u| !u.is_dead());
        }
        dead
    }

    /// True if any unit here has Guard.
    #[must_use]
    pub fn has_guard(&self) -> bool {
        self.units.iter().any(|u| u.has(Keyword::Guard))
    }
}

/// Holds a player's partner while it is off the field.
///
/// The partner is never duplicated: it is either in the zone (`field_unit`
/// is `None`) or on the field as exactly one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerZone {
    partner: Option<PartnerDefinition>,
    field_unit: Option<UnitId>,
}

impl PartnerZone {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn partner(&self) -> Option<&PartnerDefinition> {
        self.partner.as_ref()
    }

    /// Store `partner` off the field. Refused while the current partner is
    /// on the field.
    pub fn place(&mut self, partner: PartnerDefinition) -> bool {
        if self.is_on_field() {
            return false;
        }
        self.partner = Some(partner);
        true
    }

    #[must_use]
    pub fn is_on_field(&self) -> bool {
        self.field_unit.is_some()
    }

    /// Unit currently representing the partner on the field.
    #[must_use]
    pub fn field_unit(&self) -> Option<UnitId> {
        self.field_unit
    }

    pub(crate) fn mark_on_field(&mut self, unit: UnitId) {
        self.field_unit = Some(unit);
    }

    pub(crate) fn mark_returned(&mut self) {
        self.field_unit = None;
    }
}
