//! Card system: templates, instances, registry and deck construction.
//!
//! ## Key Types
//!
//! - `TemplateId`: Identifier for card templates
//! - `CardTemplate`: Immutable card data (cost, kind, stats, effect)
//! - `Card`: A physical copy with a unique `CardId`
//! - `PartnerDefinition`: Data for a player's summonable partner
//! - `CardRegistry`: Template lookup
//! - `DeckRecipe`: Template counts that build into a shuffled deck

pub mod deck;
pub mod definition;
pub mod instance;
pub mod keywords;
pub mod registry;

pub use deck::{DeckRecipe, RecipeEntry};
pub use definition::{CardKind, CardTemplate, PartnerDefinition, TemplateId, UnitStats};
pub use instance::Card;
pub use keywords::{Keyword, Keywords};
pub use registry::CardRegistry;
