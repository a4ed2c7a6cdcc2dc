//! Identifiers for cards and battlefield units.
//!
//! Both id spaces are allocated by an [`IdAllocator`] owned by the match
//! (the zone manager), never by global counters. Ids are monotonic and never
//! reused within a match, so a stale id simply fails to resolve.
//!
//! ```
//! use card_battle::core::IdAllocator;
//!
//! let mut ids = IdAllocator::new();
//! let a = ids.next_unit();
//! let b = ids.next_unit();
//! assert!(b > a);
//! ```

use serde::{Deserialize, Serialize};

/// Identity of one physical card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

/// Identity of one unit on a field (`instanceId`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Monotonic allocator for card and unit ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_card: u32,
    next_unit: u32,
}

impl IdAllocator {
    /// Create an allocator starting at zero for both id spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh card id.
    pub fn next_card(&mut self) -> CardId {
        let id = CardId(self.next_card);
        self.next_card += 1;
        id
    }

    /// Allocate a fresh unit id.
    pub fn next_unit(&mut self) -> UnitId {
        let id = UnitId(self.next_unit);
        self.next_unit += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdAllocator::new();
        let units: Vec<_> = (0..5).map(|_| ids.next_unit()).collect();

        for pair in units.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_card_and_unit_spaces_are_independent() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_card(), CardId(0));
        assert_eq!(ids.next_unit(), UnitId(0));
        assert_eq!(ids.next_card(), CardId(1));
        assert_eq!(ids.next_unit(), UnitId(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UnitId(3)), "Unit(3)");
        assert_eq!(format!("{}", CardId(9)), "Card(9)");
    }
}
