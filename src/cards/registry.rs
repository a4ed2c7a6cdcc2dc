//! Card registry for template lookup.
//!
//! The `CardRegistry` stores every template available to a match and hands
//! out shared `Arc` handles so card instances never copy template data.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardTemplate, TemplateId};

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use card_battle::cards::{CardRegistry, CardTemplate, TemplateId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::strike(TemplateId::new(1)));
///
/// let found = registry.get(TemplateId::new(1)).unwrap();
/// assert_eq!(found.name, "Strike");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    templates: FxHashMap<TemplateId, Arc<CardTemplate>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn register(&mut self, template: CardTemplate) {
        if self.templates.contains_key(&template.id) {
            panic!("Template with ID {:?} already registered", template.id);
        }
        self.templates.insert(template.id, Arc::new(template));
    }

    /// Get a shared handle to a template.
    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<Arc<CardTemplate>> {
        self.templates.get(&id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.templates.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values().map(|t| t.as_ref())
    }

    /// Find templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> Vec<&CardTemplate>
    where
        F: Fn(&CardTemplate) -> bool,
    {
        self.templates
            .values()
            .map(|t| t.as_ref())
            .filter(|t| predicate(t))
            .collect()
    }
}
