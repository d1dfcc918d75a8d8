use std::collections::{BTreeSet, HashMap};

/// Dense zero-based labels for the distinct identities of one split.
///
/// Labels follow ascending identity order, so the smallest identity gets
/// label 0 and the mapping doesn't depend on manifest order.
#[derive(Debug, Clone, Default)]
pub struct RelabelMap {
    labels: HashMap<i64, u32>,
}

impl RelabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from identities, repeats allowed.
    pub fn from_identities<I>(identities: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        // Distinct identities, sorted
        let distinct: BTreeSet<i64> = identities.into_iter().collect();

        let mut map = Self::new();
        for identity in distinct {
            map.insert(identity);
        }
        map
    }

    /// Insert an identity, returning its label. An identity already in the
    /// map keeps its label; a new one gets the next free label.
    pub fn insert(&mut self, identity: i64) -> u32 {
        let next = self.labels.len() as u32;
        *self.labels.entry(identity).or_insert(next)
    }

    pub fn label(&self, identity: i64) -> Option<u32> {
        self.labels.get(&identity).copied()
    }

    /// Number of distinct identities, which is also one past the largest label
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
