use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display(
    fmt = "vertices={} edges={} max_degree={} closure_entries={}",
    num_vertices,
    num_edges,
    max_degree,
    num_closure_entries
)]
pub struct GraphInfo {
    num_vertices: usize,
    num_edges: usize,
    max_degree: usize,
    num_closure_entries: usize,
}

impl GraphInfo {
    pub fn new(
        num_vertices: usize,
        num_edges: usize,
        max_degree: usize,
        num_closure_entries: usize,
    ) -> Self {
        Self {
            num_vertices,
            num_edges,
            max_degree,
            num_closure_entries,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Total size of all 2-degree closures, the dominant memory cost.
    pub fn num_closure_entries(&self) -> usize {
        self.num_closure_entries
    }
}
