//! Reference collection
//!
//!     One collector is shared by a top-level scan and every nested scan it spawns for
//!     container bodies, so post links at any depth end up in the same list. Ids are kept in
//!     encounter order, duplicates included, until [ReferenceCollector::into_references].

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCollector {
    ids: Vec<u64>,
}

impl ReferenceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: u64) {
        self.ids.push(id);
    }

    /// Every id registered so far, in encounter order and with duplicates.
    pub fn raw(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deduplicate the collected ids, keeping the first occurrence of each.
    pub fn into_references(self) -> Vec<u64> {
        let mut seen = HashSet::with_capacity(self.ids.len());
        self.ids.into_iter().filter(|id| seen.insert(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_in_first_seen_order() {
        let mut collector = ReferenceCollector::new();
        for id in [7, 3, 7, 9, 3] {
            collector.push(id);
        }
        assert_eq!(collector.raw(), &[7, 3, 7, 9, 3]);
        assert_eq!(collector.len(), 5);
        assert_eq!(collector.into_references(), vec![7, 3, 9]);
    }

    #[test]
    fn test_empty_collector() {
        let collector = ReferenceCollector::new();
        assert!(collector.is_empty());
        assert!(collector.into_references().is_empty());
    }
}
