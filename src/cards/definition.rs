//! Card templates - immutable card data.
//!
//! A `CardTemplate` holds what every copy of a card shares: cost, kind,
//! base stats, keywords and its triggered effect. Physical copies are
//! [`Card`](super::Card)s that point at a shared template.
//!
//! Effects are attached as [`EffectKind`] values when the template is
//! authored, so resolution dispatches on a tagged variant rather than on
//! runtime type inspection.

use serde::{Deserialize, Serialize};

use super::keywords::Keywords;
use crate::effects::EffectKind;

/// Identifier for a card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

/// Base stats of a unit card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub hp: i32,
    pub attack: i32,
    pub keywords: Keywords,
    /// Effect resolved right after the unit is summoned.
    pub on_summon: Option<EffectKind>,
}

impl UnitStats {
    /// Plain stats with no keywords or effect.
    #[must_use]
    pub fn new(attack: i32, hp: i32) -> Self {
        Self {
            hp,
            attack,
            keywords: Keywords::new(),
            on_summon: None,
        }
    }
}

/// What a card does when played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    /// Summons a unit onto the owner's field.
    Unit(UnitStats),
    /// Places a totem on the owner's field.
    Totem,
    /// Resolves an effect and is consumed.
    Spell { effect: EffectKind },
}

impl CardKind {
    /// Short label used in logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Unit(_) => "unit",
            CardKind::Totem => "totem",
            CardKind::Spell { .. } => "spell",
        }
    }
}

/// Immutable card template.
///
/// ## Example
///
/// ```
/// use card_battle::cards::{CardKind, CardTemplate, Keyword, TemplateId};
///
/// let knight = CardTemplate::unit(TemplateId::new(1), "Shield Knight", 2, 1, 4)
///     .with_keyword(Keyword::Guard);
///
/// assert_eq!(knight.cost, 2);
/// let CardKind::Unit(stats) = &knight.kind else { unreachable!() };
/// assert!(stats.keywords.has(Keyword::Guard));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: TemplateId,
    pub name: String,
    pub cost: i32,
    pub kind: CardKind,
}

impl CardTemplate {
    /// Vanilla unit template.
    #[must_use]
    pub fn unit(id: TemplateId, name: impl Into<String>, cost: i32, attack: i32, hp: i32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Unit(UnitStats::new(attack, hp)),
        }
    }

    /// Totem template.
    #[must_use]
    pub fn totem(id: TemplateId, name: impl Into<String>, cost: i32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Totem,
        }
    }

    /// Spell template.
    #[must_use]
    pub fn spell(id: TemplateId, name: impl Into<String>, cost: i32, effect: EffectKind) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Spell { effect },
        }
    }

    /// Add a keyword. Panics if the template is not a unit.
    #[must_use]
    pub fn with_keyword(mut self, keyword: crate::cards::Keyword) -> Self {
        match &mut self.kind {
            CardKind::Unit(stats) => stats.keywords.insert(keyword),
            other => panic!("Keyword on non-unit template {:?} ({})", self.id, other.label()),
        }
        self
    }

    /// Attach an on-summon effect. Panics if the template is not a unit.
    #[must_use]
    pub fn with_on_summon(mut self, effect: EffectKind) -> Self {
        match &mut self.kind {
            CardKind::Unit(stats) => stats.on_summon = Some(effect),
            other => panic!("On-summon effect on non-unit template {:?} ({})", self.id, other.label()),
        }
        self
    }

    /// The triggered effect this card resolves when played, if any.
    #[must_use]
    pub fn play_effect(&self) -> Option<&EffectKind> {
        match &self.kind {
            CardKind::Unit(stats) => stats.on_summon.as_ref(),
            CardKind::Spell { effect } => Some(effect),
            CardKind::Totem => None,
        }
    }

    // === Stock templates ===

    /// 1-cost spell: 1 damage to a chosen enemy unit.
    #[must_use]
    pub fn strike(id: TemplateId) -> Self {
        Self::spell(id, "Strike", 1, EffectKind::DamageEnemyUnit { amount: 1 })
    }

    /// 2-cost spell: 2 damage to an enemy unit or the enemy player.
    #[must_use]
    pub fn bolt(id: TemplateId) -> Self {
        Self::spell(id, "Bolt", 2, EffectKind::DamageEnemy { amount: 2 })
    }

    /// 2-cost 1/1 unit that deals 1 damage to an enemy unit on summon.
    #[must_use]
    pub fn summoning_strike(id: TemplateId) -> Self {
        Self::unit(id, "Skirmisher", 2, 1, 1)
            .with_on_summon(EffectKind::DamageEnemyUnit { amount: 1 })
    }

    /// 4-cost 2/2 unit that destroys an enemy unit on summon.
    #[must_use]
    pub fn executioner(id: TemplateId) -> Self {
        Self::unit(id, "Executioner", 4, 2, 2).with_on_summon(EffectKind::DestroyEnemyUnit)
    }

    /// 2-cost 1/2 unit that heals its owner for 2 (up to 15) on summon.
    #[must_use]
    pub fn healer(id: TemplateId) -> Self {
        Self::unit(id, "Field Medic", 2, 1, 2)
            .with_on_summon(EffectKind::HealSelf { amount: 2, cap: 15 })
    }
}

/// A partner: the champion that lives in the partner zone and can be
/// summoned onto the field as a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerDefinition {
    pub name: String,
    pub cost: i32,
    pub hp: i32,
    pub attack: i32,
    pub keywords: Keywords,
}

impl PartnerDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i32, attack: i32, hp: i32) -> Self {
        Self {
            name: name.into(),
            cost,
            hp,
            attack,
            keywords: Keywords::new(),
        }
    }

    /// Add a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: crate::cards::Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }
}
