use ahash::AHashSet;
use indexmap::map::Entry;
use indexmap::IndexMap;
use itertools::Itertools;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub u64);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        VertexId(id)
    }
}

/// Which producer last wrote the cached ordering slot of a [`Digraph`].
///
/// The slot is shared storage: vertex insertion appends to it, deletion
/// removes from it, [`Digraph::sort_vertices`] and [`Digraph::dfs`] overwrite
/// it wholesale. The tag lets callers tell stale sort results apart from a
/// freshly computed topological order.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderingProvenance {
    /// Maintained incrementally: ids in the order vertices were added.
    #[default]
    Insertion,
    /// Written by [`Digraph::sort_vertices`]: ids in ascending numeric order.
    Ascending,
    /// Written by [`Digraph::dfs`] with `compute_ordering` set: reverse
    /// finish-time order, a topological sort when the graph is acyclic.
    Topological,
}

/// A directed graph over integer-identified vertices.
///
/// Vertices map to their out-neighbor sets. Neighbor sets are unordered;
/// vertex iteration follows insertion order (the [`IndexMap`] key order),
/// which is also the root order of the [`dfs`](Digraph::dfs) outer driver.
///
/// Mutations either apply fully or fail with a [`DigraphError`] before any
/// state changes.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Digraph {
    adjacency: IndexMap<VertexId, AHashSet<VertexId>>,
    ordering: Vec<VertexId>,
    provenance: OrderingProvenance,
}

impl Digraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex with an empty out-neighbor set and appends it to the
    /// cached ordering.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>) -> Result<(), DigraphError> {
        let id = id.into();
        match self.adjacency.entry(id) {
            Entry::Occupied(_) => Err(DigraphError::DuplicateVertex(id)),
            Entry::Vacant(e) => {
                e.insert(AHashSet::new());
                self.ordering.push(id);
                self.provenance = OrderingProvenance::Insertion;
                Ok(())
            }
        }
    }

    /// Removes a vertex, all of its incident edges (incoming and outgoing),
    /// and its slot in the cached ordering. The sweep over the remaining
    /// neighbor sets is O(V + E).
    pub fn delete_vertex(&mut self, id: impl Into<VertexId>) -> Result<(), DigraphError> {
        let id = id.into();
        if self.adjacency.shift_remove(&id).is_none() {
            return Err(DigraphError::UnknownVertex(id));
        }
        for neighbors in self.adjacency.values_mut() {
            neighbors.remove(&id);
        }
        self.ordering.retain(|v| *v != id);
        Ok(())
    }

    /// Adds the edge `u -> v`. Both endpoints must already exist. Adding an
    /// edge that is already present is not an error.
    pub fn add_edge(
        &mut self,
        u: impl Into<VertexId>,
        v: impl Into<VertexId>,
    ) -> Result<(), DigraphError> {
        let (u, v) = (u.into(), v.into());
        if !self.adjacency.contains_key(&u) {
            return Err(DigraphError::UnknownVertex(u));
        }
        if !self.adjacency.contains_key(&v) {
            return Err(DigraphError::UnknownVertex(v));
        }
        self.adjacency[&u].insert(v);
        Ok(())
    }

    /// Removes the edge `u -> v`.
    pub fn remove_edge(
        &mut self,
        u: impl Into<VertexId>,
        v: impl Into<VertexId>,
    ) -> Result<(), DigraphError> {
        let (u, v) = (u.into(), v.into());
        let removed = self
            .adjacency
            .get_mut(&u)
            .is_some_and(|neighbors| neighbors.remove(&v));
        if !removed {
            return Err(DigraphError::UnknownEdge(u, v));
        }
        Ok(())
    }

    /// Whether the edge `u -> v` exists. Total over the id space: an absent
    /// `u` yields `false`, never an error.
    pub fn has_edge(&self, u: impl Into<VertexId>, v: impl Into<VertexId>) -> bool {
        self.adjacency
            .get(&u.into())
            .is_some_and(|neighbors| neighbors.contains(&v.into()))
    }

    pub fn contains_vertex(&self, id: impl Into<VertexId>) -> bool {
        self.adjacency.contains_key(&id.into())
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|neighbors| neighbors.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates vertex ids in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterates the out-neighbors of `u` in unspecified order.
    pub fn out_neighbors(
        &self,
        u: impl Into<VertexId>,
    ) -> Result<impl Iterator<Item = VertexId> + '_, DigraphError> {
        let u = u.into();
        self.adjacency
            .get(&u)
            .map(|neighbors| neighbors.iter().copied())
            .ok_or(DigraphError::UnknownVertex(u))
    }

    pub fn out_degree(&self, u: impl Into<VertexId>) -> Result<usize, DigraphError> {
        let u = u.into();
        self.adjacency
            .get(&u)
            .map(|neighbors| neighbors.len())
            .ok_or(DigraphError::UnknownVertex(u))
    }

    /// Overwrites the cached ordering with all vertex ids in ascending
    /// numeric order. Unrelated to the graph structure; invalidates any
    /// previously cached topological order.
    pub fn sort_vertices(&mut self) {
        self.ordering = self.adjacency.keys().copied().sorted().collect();
        self.provenance = OrderingProvenance::Ascending;
    }

    /// The cached ordering slot, whatever last wrote it. Check
    /// [`ordering_provenance`](Self::ordering_provenance) to interpret it;
    /// callers needing a guaranteed topological order must call
    /// [`dfs(true)`](Self::dfs) immediately beforehand.
    pub fn ordering(&self) -> &[VertexId] {
        &self.ordering
    }

    pub fn ordering_provenance(&self) -> OrderingProvenance {
        self.provenance
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DigraphError {
    #[error("vertex {0} does not exist")]
    UnknownVertex(VertexId),
    #[error("vertex {0} already exists")]
    DuplicateVertex(VertexId),
    #[error("edge {0} -> {1} does not exist")]
    UnknownEdge(VertexId, VertexId),
}

pub mod bfs;
pub mod dfs;
