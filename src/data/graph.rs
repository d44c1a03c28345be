use super::{records, GraphBuilder, GraphInfo, GraphView};
use crate::{error::Result, tools::contains, types::VId};
use log::info;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    io::Read,
    time::Instant,
};

/// The immutable trust graph.
///
/// Holds, for every account seen in the batch data, its sorted neighbor
/// list and its sorted 2-degree closure (itself, its neighbors and their
/// neighbors). Accounts never seen in the batch are absent, and every
/// query involving them answers `false`.
pub struct GraphIndex {
    vids: HashMap<String, VId>,
    names: Vec<String>,
    adjacency: Vec<Box<[VId]>>,
    closures: Vec<Box<[VId]>>,
}

impl GraphIndex {
    pub(super) fn new(
        vids: HashMap<String, VId>,
        names: Vec<String>,
        adjacency: Vec<Box<[VId]>>,
        closures: Vec<Box<[VId]>>,
    ) -> Self {
        Self {
            vids,
            names,
            adjacency,
            closures,
        }
    }

    pub fn from_edges<I, S>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (a, b) in edges {
            builder.add_edge(a.as_ref(), b.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Reads a batch file and builds the index.
    ///
    /// Any malformed row aborts the build.
    pub fn from_reader<R: Read>(batch: R) -> Result<Self> {
        let time_now = Instant::now();
        let mut builder = GraphBuilder::new();
        info!("scanning batch edges...");
        for record in records(batch) {
            let (a, b) = record?;
            builder.add_edge(&a, &b)?;
        }
        info!(
            "scanned {} edges in {}ms",
            builder.num_records(),
            (Instant::now() - time_now).as_millis()
        );
        Ok(builder.build())
    }

    pub fn vid(&self, name: &str) -> Option<VId> {
        self.vids.get(name).copied()
    }

    pub fn name(&self, vid: VId) -> &str {
        &self.names[vid as usize]
    }

    pub fn num_vertices(&self) -> usize {
        self.names.len()
    }

    pub fn neighbors(&self, vid: VId) -> &[VId] {
        &self.adjacency[vid as usize]
    }

    pub fn closure(&self, vid: VId) -> &[VId] {
        &self.closures[vid as usize]
    }

    pub fn is_neighbor(&self, u: VId, v: VId) -> bool {
        contains(self.neighbors(u), &v)
    }

    pub fn is_within_two_hops(&self, u: VId, v: VId) -> bool {
        contains(self.closure(u), &v)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.vid(a), self.vid(b)) {
            (Some(u), Some(v)) => self.is_neighbor(u, v),
            _ => false,
        }
    }

    pub fn within_two_hops(&self, a: &str, b: &str) -> bool {
        match (self.vid(a), self.vid(b)) {
            (Some(u), Some(v)) => self.is_within_two_hops(u, v),
            _ => false,
        }
    }

    pub fn vertex_exists(&self, a: &str) -> bool {
        self.vid(a)
            .map_or(false, |vid| !self.neighbors(vid).is_empty())
    }

    pub fn info(&self) -> GraphInfo {
        let num_edges = self
            .adjacency
            .iter()
            .enumerate()
            .map(|(u, ns)| ns.iter().filter(|&&v| v as usize >= u).count())
            .sum();
        GraphInfo::new(
            self.num_vertices(),
            num_edges,
            self.adjacency.iter().map(|ns| ns.len()).max().unwrap_or(0),
            self.closures.iter().map(|c| c.len()).sum(),
        )
    }

    pub fn view(&self) -> GraphView {
        let named = |sets: &[Box<[VId]>]| -> BTreeMap<String, BTreeSet<String>> {
            sets.iter()
                .enumerate()
                .map(|(vid, set)| {
                    (
                        self.names[vid].clone(),
                        set.iter().map(|&n| self.name(n).to_string()).collect(),
                    )
                })
                .collect()
        };
        GraphView::new(named(&self.adjacency), named(&self.closures))
    }
}

/// Builds the index from the contents of a batch file.
pub fn build_index<R: Read>(batch: R) -> Result<GraphIndex> {
    GraphIndex::from_reader(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample() -> GraphIndex {
        GraphIndex::from_edges(vec![("A", "B"), ("B", "C"), ("C", "D"), ("E", "F")]).unwrap()
    }

    #[test]
    fn test_symmetry() {
        let index = sample();
        for (a, b) in [("A", "B"), ("B", "C"), ("C", "D"), ("E", "F")].iter() {
            assert!(index.has_edge(a, b));
            assert!(index.has_edge(b, a));
        }
        assert!(!index.has_edge("A", "C"));
        assert!(!index.has_edge("C", "A"));
    }

    #[test]
    fn test_self_closure() {
        let index = sample();
        for vid in 0..index.num_vertices() as VId {
            assert!(index.is_within_two_hops(vid, vid));
            assert!(index
                .neighbors(vid)
                .iter()
                .all(|&n| index.is_within_two_hops(vid, n)));
        }
    }

    #[test]
    fn test_within_two_hops() {
        let index = sample();
        assert!(index.within_two_hops("A", "C"));
        assert!(index.within_two_hops("B", "D"));
        assert!(!index.within_two_hops("A", "D"));
        assert!(!index.within_two_hops("A", "E"));
    }

    #[test]
    fn test_absent_vertex() {
        let index = sample();
        assert!(!index.vertex_exists("ghost"));
        assert!(index.vertex_exists("A"));
        assert!(!index.has_edge("ghost", "A"));
        assert!(!index.has_edge("A", "ghost"));
        assert!(!index.within_two_hops("ghost", "ghost"));
        assert_eq!(index.vid("ghost"), None);
    }

    #[test]
    fn test_idempotent_edges() {
        let once = GraphIndex::from_edges(vec![("A", "B"), ("B", "C")]).unwrap();
        let twice =
            GraphIndex::from_edges(vec![("A", "B"), ("A", "B"), ("B", "A"), ("B", "C")]).unwrap();
        assert_eq!(once.view(), twice.view());
        assert_eq!(twice.info().num_edges(), 2);
    }

    #[test]
    fn test_order_independence() {
        let edges = vec![
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("E", "F"),
            ("D", "A"),
            ("F", "G"),
        ];
        let mut reversed = edges.clone();
        reversed.reverse();
        let mut rotated = edges.clone();
        rotated.rotate_left(3);
        let expected = GraphIndex::from_edges(edges).unwrap().view();
        assert_eq!(GraphIndex::from_edges(reversed).unwrap().view(), expected);
        assert_eq!(GraphIndex::from_edges(rotated).unwrap().view(), expected);
    }

    #[test]
    fn test_self_loop() {
        let index = GraphIndex::from_edges(vec![("A", "A"), ("A", "B")]).unwrap();
        assert!(index.has_edge("A", "A"));
        assert!(!index.has_edge("B", "B"));
        assert_eq!(index.info().num_edges(), 2);
    }

    #[test]
    fn test_info() {
        let info = sample().info();
        assert_eq!(
            (info.num_vertices(), info.num_edges(), info.max_degree()),
            (6, 4, 2)
        );
        // A:{A,B,C} B:{A,B,C,D} C:{A,B,C,D} D:{B,C,D} E:{E,F} F:{E,F}
        assert_eq!(info.num_closure_entries(), 18);
    }

    #[test]
    fn test_from_reader() {
        let batch = "time, id1, id2, amount, message\n\
                     2016-11-01 17:38:25, 49466, 6989, 23.74, Movie\n\
                     2016-11-01 17:38:25, 6989, 8552, 5.00, Rent\n";
        let index = GraphIndex::from_reader(batch.as_bytes()).unwrap();
        assert!(index.has_edge("6989", "49466"));
        assert!(index.within_two_hops("49466", "8552"));
    }

    #[test]
    fn test_from_reader_malformed() {
        let batch = "time, id1, id2\n1, a, b\n2\n";
        assert!(matches!(
            GraphIndex::from_reader(batch.as_bytes()),
            Err(Error::MalformedRecord { line: 3, fields: 1 })
        ));
    }
}
