//! Degree-of-separation predicates over the trust graph.

use crate::{data::GraphIndex, tools::intersects, types::Trust};

/// The three verdicts for one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdicts {
    /// The parties have paid each other before.
    pub direct: bool,
    /// The parties are within two hops.
    pub two_hops: bool,
    /// The parties are within four hops.
    pub four_hops: bool,
}

impl Verdicts {
    pub fn new(direct: bool, two_hops: bool, four_hops: bool) -> Self {
        Self {
            direct,
            two_hops,
            four_hops,
        }
    }

    /// The verdicts in output channel order.
    pub fn trust(&self) -> [Trust; 3] {
        [
            self.direct.into(),
            self.two_hops.into(),
            self.four_hops.into(),
        ]
    }
}

impl From<Verdicts> for (bool, bool, bool) {
    fn from(v: Verdicts) -> Self {
        (v.direct, v.two_hops, v.four_hops)
    }
}

#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    index: &'a GraphIndex,
}

impl<'a> Classifier<'a> {
    pub fn new(index: &'a GraphIndex) -> Self {
        Self { index }
    }

    pub fn direct(&self, id1: &str, id2: &str) -> bool {
        self.index.has_edge(id1, id2)
    }

    pub fn two_hops(&self, id1: &str, id2: &str) -> bool {
        self.index.within_two_hops(id1, id2)
    }

    /// Whether the 2-degree closures of both parties meet.
    pub fn four_hops(&self, id1: &str, id2: &str) -> bool {
        match (self.index.vid(id1), self.index.vid(id2)) {
            (Some(u), Some(v)) => intersects(self.index.closure(u), self.index.closure(v)),
            _ => false,
        }
    }

    /// Evaluates all three predicates, from the narrowest outwards.
    ///
    /// A narrower hit implies the broader ones, so evaluation stops at the
    /// first predicate that holds.
    pub fn classify(&self, id1: &str, id2: &str) -> Verdicts {
        let (u, v) = match (self.index.vid(id1), self.index.vid(id2)) {
            (Some(u), Some(v)) => (u, v),
            _ => return Verdicts::default(),
        };
        if self.index.is_neighbor(u, v) {
            Verdicts::new(true, true, true)
        } else if self.index.is_within_two_hops(u, v) {
            Verdicts::new(false, true, true)
        } else {
            let four_hops = intersects(self.index.closure(u), self.index.closure(v));
            Verdicts::new(false, false, four_hops)
        }
    }
}

/// Classifies one payment against the index.
pub fn classify(index: &GraphIndex, id1: &str, id2: &str) -> Verdicts {
    Classifier::new(index).classify(id1, id2)
}
