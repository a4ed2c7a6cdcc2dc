//! Keyword abilities carried by units and partners.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A keyword ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// May attack units on the turn it entered the field.
    Rush,
    /// May attack units or the player on the turn it entered the field.
    DivineSpeed,
    /// While on the field, the opposing side cannot attack this player.
    Guard,
}

/// Small inline set of keywords. Units rarely carry more than three.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords(SmallVec<[Keyword; 3]>);

impl Keywords {
    /// Empty keyword set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword (no duplicates).
    #[must_use]
    pub fn with(mut self, keyword: Keyword) -> Self {
        self.insert(keyword);
        self
    }

    /// Add a keyword if not already present.
    pub fn insert(&mut self, keyword: Keyword) {
        if !self.has(keyword) {
            self.0.push(keyword);
        }
    }

    /// Check for a keyword.
    #[must_use]
    pub fn has(&self, keyword: Keyword) -> bool {
        self.0.contains(&keyword)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Keyword> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Keyword> for Keywords {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut keywords = Keywords::new();
        for keyword in iter {
            keywords.insert(keyword);
        }
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_deduplicate() {
        let keywords: Keywords = [Keyword::Guard, Keyword::Rush, Keyword::Guard]
            .into_iter()
            .collect();

        assert!(keywords.has(Keyword::Guard));
        assert!(keywords.has(Keyword::Rush));
        assert!(!keywords.has(Keyword::DivineSpeed));
        assert_eq!(keywords.iter().count(), 2);
    }
}
