use std::collections::{BTreeMap, BTreeSet};

/// A name-keyed copy of the index, independent of interning order.
#[derive(Debug, PartialEq, Eq)]
pub struct GraphView {
    adjacency: BTreeMap<String, BTreeSet<String>>,
    closures: BTreeMap<String, BTreeSet<String>>,
}

impl GraphView {
    pub fn new(
        adjacency: BTreeMap<String, BTreeSet<String>>,
        closures: BTreeMap<String, BTreeSet<String>>,
    ) -> Self {
        Self {
            adjacency,
            closures,
        }
    }
}
