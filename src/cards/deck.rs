//! Deck recipes and deck construction.
//!
//! A `DeckRecipe` lists templates with copy counts. Building it allocates a
//! fresh `CardId` for every copy and shuffles the result.

use serde::{Deserialize, Serialize};

use super::definition::TemplateId;
use super::instance::Card;
use super::registry::CardRegistry;
use crate::core::{GameRng, IdAllocator};
use crate::error::{BattleError, Result};

/// One line of a recipe: `count` copies of `template`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub template: TemplateId,
    pub count: usize,
}

/// Ordered list of recipe entries.
///
/// ```
/// use card_battle::cards::{CardRegistry, CardTemplate, DeckRecipe, TemplateId};
/// use card_battle::core::{GameRng, IdAllocator};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::strike(TemplateId::new(1)));
///
/// let recipe = DeckRecipe::new().with(TemplateId::new(1), 3);
/// let mut ids = IdAllocator::new();
/// let deck = recipe.build(&registry, &mut ids, &mut GameRng::new(1)).unwrap();
/// assert_eq!(deck.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecipe {
    pub entries: Vec<RecipeEntry>,
}

impl DeckRecipe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` copies of a template.
    #[must_use]
    pub fn with(mut self, template: TemplateId, count: usize) -> Self {
        self.entries.push(RecipeEntry { template, count });
        self
    }

    /// Total number of cards the recipe produces.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Instantiate and shuffle the deck.
    ///
    /// Fails if the recipe names a template the registry does not know.
    pub fn build(
        &self,
        registry: &CardRegistry,
        ids: &mut IdAllocator,
        rng: &mut GameRng,
    ) -> Result<Vec<Card>> {
        let mut deck = Vec::with_capacity(self.card_count());

        for entry in &self.entries {
            let template = registry
                .get(entry.template)
                .ok_or(BattleError::UnknownTemplate(entry.template))?;
            for _ in 0..entry.count {
                deck.push(Card::new(ids.next_card(), template.clone()));
            }
        }

        rng.shuffle(&mut deck);
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;
    use rustc_hash::FxHashSet;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(CardTemplate::unit(TemplateId::new(1), "Grunt", 1, 1, 1));
        registry.register(CardTemplate::strike(TemplateId::new(2)));
        registry
    }

    #[test]
    fn test_build_assigns_unique_ids() {
        let recipe = DeckRecipe::new()
            .with(TemplateId::new(1), 10)
            .with(TemplateId::new(2), 5);
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(3);

        let first = recipe.build(&registry(), &mut ids, &mut rng).unwrap();
        let second = recipe.build(&registry(), &mut ids, &mut rng).unwrap();

        let unique: FxHashSet<_> = first.iter().chain(second.iter()).map(|c| c.id).collect();
        assert_eq!(unique.len(), 30);
    }

    #[test]
    fn test_build_is_deterministic() {
        let recipe = DeckRecipe::new()
            .with(TemplateId::new(1), 6)
            .with(TemplateId::new(2), 6);

        let order = |seed| {
            let mut ids = IdAllocator::new();
            recipe
                .build(&registry(), &mut ids, &mut GameRng::new(seed))
                .unwrap()
                .iter()
                .map(|c| c.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(order(5), order(5));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let recipe = DeckRecipe::new().with(TemplateId::new(42), 1);
        let mut ids = IdAllocator::new();
        let err = recipe
            .build(&registry(), &mut ids, &mut GameRng::new(0))
            .unwrap_err();
        assert_eq!(err, BattleError::UnknownTemplate(TemplateId::new(42)));
    }
}
