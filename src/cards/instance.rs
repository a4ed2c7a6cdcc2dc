//! Card instances - physical copies moving between deck and hand.
//!
//! A played card does not persist as a `Card` once resolved: units and
//! totems become field objects, spells are consumed.

use std::sync::Arc;

use super::definition::{CardKind, CardTemplate, TemplateId};
use crate::core::CardId;

/// One physical card with a unique id and a shared immutable template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub template: Arc<CardTemplate>,
}

impl Card {
    /// Create a card instance.
    #[must_use]
    pub fn new(id: CardId, template: Arc<CardTemplate>) -> Self {
        Self { id, template }
    }

    #[must_use]
    pub fn cost(&self) -> i32 {
        self.template.cost
    }

    #[must_use]
    pub fn kind(&self) -> &CardKind {
        &self.template.kind
    }

    #[must_use]
    pub fn template_id(&self) -> TemplateId {
        self.template.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }
}
