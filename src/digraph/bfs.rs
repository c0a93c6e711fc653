use std::collections::VecDeque;

use indexmap::IndexMap;

use super::{Digraph, DigraphError, VertexId};

/// Per-vertex attributes computed by [`Digraph::bfs`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BfsAttrs {
    /// Hop count of a shortest path from the source; `None` when unreached.
    pub distance: Option<u64>,
    /// Predecessor on one shortest path. `None` for the source itself and
    /// for unreached vertices.
    pub parent: Option<VertexId>,
}

/// The result of a breadth-first search: every vertex of the graph, reached
/// or not, keyed to its [`BfsAttrs`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BfsTree {
    source: VertexId,
    attrs: IndexMap<VertexId, BfsAttrs>,
}

impl BfsTree {
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn get(&self, v: impl Into<VertexId>) -> Option<&BfsAttrs> {
        self.attrs.get(&v.into())
    }

    pub fn distance(&self, v: impl Into<VertexId>) -> Option<u64> {
        self.attrs.get(&v.into()).and_then(|a| a.distance)
    }

    pub fn parent(&self, v: impl Into<VertexId>) -> Option<VertexId> {
        self.attrs.get(&v.into()).and_then(|a| a.parent)
    }

    /// Iterates vertices in the graph's insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &BfsAttrs)> {
        self.attrs.iter().map(|(v, a)| (*v, a))
    }

    /// Reconstructs a shortest path from the source to `v` by walking the
    /// predecessor chain. `None` when `v` is unknown or unreached.
    pub fn path_to(&self, v: impl Into<VertexId>) -> Option<Vec<VertexId>> {
        let v = v.into();
        self.attrs.get(&v)?.distance?;
        let mut path = vec![v];
        let mut current = v;
        while let Some(parent) = self.attrs.get(&current).and_then(|a| a.parent) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

impl Digraph {
    /// Level-order exploration from `source`, assigning every vertex its
    /// shortest hop-distance and a predecessor.
    ///
    /// Each vertex is enqueued at most once, the moment it is first
    /// discovered. Which predecessor a vertex gets when several frontier
    /// vertices point at it depends on neighbor-set iteration order and is
    /// deliberately unspecified.
    pub fn bfs(&self, source: impl Into<VertexId>) -> Result<BfsTree, DigraphError> {
        let source = source.into();
        if !self.contains_vertex(source) {
            return Err(DigraphError::UnknownVertex(source));
        }

        let mut attrs: IndexMap<VertexId, BfsAttrs> =
            self.vertices().map(|v| (v, BfsAttrs::default())).collect();
        attrs[&source].distance = Some(0);

        let mut queue = VecDeque::new();
        queue.push_back((source, 0u64));

        while let Some((u, depth)) = queue.pop_front() {
            for v in self.adjacency[&u].iter().copied() {
                let entry = &mut attrs[&v];
                if entry.distance.is_none() {
                    entry.distance = Some(depth + 1);
                    entry.parent = Some(u);
                    queue.push_back((v, depth + 1));
                }
            }
        }

        Ok(BfsTree { source, attrs })
    }
}
