use super::GraphIndex;
use crate::{
    error::{Error, Result},
    tools::sorted_union,
    types::VId,
};
use log::{info, warn};
use rayon::prelude::*;
use std::{
    collections::{HashMap, HashSet},
    convert::TryFrom,
    iter::once,
    time::Instant,
};

/// Collects undirected edges and freezes them into a [`GraphIndex`].
#[derive(Default)]
pub struct GraphBuilder {
    vids: HashMap<String, VId>,
    names: Vec<String>,
    neighbors: Vec<HashSet<VId>>,
    num_records: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the undirected edge `(a, b)`. Repeated edges are no-ops.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        let (u, v) = (self.intern(a)?, self.intern(b)?);
        self.neighbors[u as usize].insert(v);
        self.neighbors[v as usize].insert(u);
        self.num_records += 1;
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.names.len()
    }

    pub fn num_records(&self) -> usize {
        self.num_records
    }

    /// Sorts adjacency lists and precomputes every 2-degree closure.
    pub fn build(self) -> GraphIndex {
        let GraphBuilder {
            vids,
            names,
            neighbors,
            num_records,
        } = self;
        info!(
            "freezing adjacency: {} vertices from {} records",
            names.len(),
            num_records
        );
        let adjacency: Vec<Box<[VId]>> = neighbors
            .into_par_iter()
            .map(|ns| {
                let mut ns: Vec<VId> = ns.into_iter().collect();
                ns.sort_unstable();
                ns.into_boxed_slice()
            })
            .collect();
        log_available_memory();
        let time_now = Instant::now();
        let closures = create_closures(&adjacency);
        info!(
            "closures computed in {}ms",
            (Instant::now() - time_now).as_millis()
        );
        GraphIndex::new(vids, names, adjacency, closures)
    }

    fn intern(&mut self, name: &str) -> Result<VId> {
        if let Some(&vid) = self.vids.get(name) {
            return Ok(vid);
        }
        let vid = next_vid(self.names.len())?;
        self.vids.insert(name.to_string(), vid);
        self.names.push(name.to_string());
        self.neighbors.push(HashSet::new());
        Ok(vid)
    }
}

/// The id handed to the `num_vertices`-th distinct account.
fn next_vid(num_vertices: usize) -> Result<VId> {
    VId::try_from(num_vertices).map_err(|_| Error::TooManyVertices { num_vertices })
}

/// closure(v) = {v} ∪ adjacency(v) ∪ adjacency(n) for every neighbor n.
fn create_closures(adjacency: &[Box<[VId]>]) -> Vec<Box<[VId]>> {
    (0..adjacency.len())
        .into_par_iter()
        .map(|v| {
            let own = [v as VId];
            sorted_union(
                once(&own[..])
                    .chain(once(&*adjacency[v]))
                    .chain(adjacency[v].iter().map(|&n| &*adjacency[n as usize])),
            )
        })
        .collect()
}

fn log_available_memory() {
    match sys_info::mem_info() {
        Ok(mem) => info!("computing closures, {}M memory available", mem.avail / 1024),
        Err(e) => warn!("computing closures, available memory unknown: {}", e),
    }
}
