use ahash::AHashSet;
use indexmap::IndexMap;

use super::{Digraph, OrderingProvenance, VertexId};

/// Per-vertex attributes computed by [`Digraph::dfs`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DfsAttrs {
    /// Counter value when the vertex was first visited.
    pub discovery: u64,
    /// Counter value when all of the vertex's descendants were exhausted.
    pub finish: u64,
    /// Tree-edge predecessor; `None` for vertices discovered as roots of the
    /// outer driver.
    pub parent: Option<VertexId>,
}

/// The result of a depth-first search: every vertex keyed to its
/// [`DfsAttrs`]. Discovery and finish events share one counter, so the
/// recorded times over the whole forest are a permutation of `1..=2|V|`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DfsForest {
    attrs: IndexMap<VertexId, DfsAttrs>,
}

impl DfsForest {
    pub fn get(&self, v: impl Into<VertexId>) -> Option<&DfsAttrs> {
        self.attrs.get(&v.into())
    }

    pub fn discovery(&self, v: impl Into<VertexId>) -> Option<u64> {
        self.attrs.get(&v.into()).map(|a| a.discovery)
    }

    pub fn finish(&self, v: impl Into<VertexId>) -> Option<u64> {
        self.attrs.get(&v.into()).map(|a| a.finish)
    }

    pub fn parent(&self, v: impl Into<VertexId>) -> Option<VertexId> {
        self.attrs.get(&v.into()).and_then(|a| a.parent)
    }

    /// Iterates vertices in the graph's insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &DfsAttrs)> {
        self.attrs.iter().map(|(v, a)| (*v, a))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl Digraph {
    /// Depth-first search over every vertex of the graph.
    ///
    /// The outer driver walks vertices in insertion order and launches a
    /// visit from every vertex not yet seen, so disconnected and multi-root
    /// graphs are fully covered. The visit itself runs on an explicit stack
    /// of (vertex, neighbor-iterator) frames rather than the call stack;
    /// event order matches what the recursive formulation would produce.
    ///
    /// With `compute_ordering` set, the reversed finish order overwrites the
    /// cached ordering slot with [`OrderingProvenance::Topological`]. That
    /// sequence is a topological sort only when the graph is acyclic; cycles
    /// are not detected, and on a cyclic graph the slot holds some
    /// permutation of the vertices with no ordering guarantee. With
    /// `compute_ordering` unset the slot is left untouched.
    pub fn dfs(&mut self, compute_ordering: bool) -> DfsForest {
        let mut attrs: IndexMap<VertexId, DfsAttrs> = self
            .adjacency
            .keys()
            .map(|&v| (v, DfsAttrs::default()))
            .collect();
        let mut visited: AHashSet<VertexId> = AHashSet::with_capacity(self.adjacency.len());
        let mut finish_order = Vec::with_capacity(self.adjacency.len());
        let mut time = 0u64;

        let roots: Vec<VertexId> = self.adjacency.keys().copied().collect();
        for root in roots {
            if !visited.insert(root) {
                continue;
            }
            time += 1;
            attrs[&root].discovery = time;

            let mut stack = vec![(root, self.adjacency[&root].iter())];
            while let Some((u, mut neighbors)) = stack.pop() {
                if let Some(&v) = neighbors.next() {
                    stack.push((u, neighbors));
                    if visited.insert(v) {
                        attrs[&v].parent = Some(u);
                        time += 1;
                        attrs[&v].discovery = time;
                        stack.push((v, self.adjacency[&v].iter()));
                    }
                } else {
                    time += 1;
                    attrs[&u].finish = time;
                    finish_order.push(u);
                }
            }
        }

        if compute_ordering {
            finish_order.reverse();
            self.ordering = finish_order;
            self.provenance = OrderingProvenance::Topological;
        }

        DfsForest { attrs }
    }
}

#[cfg(test)]
mod test {
    use crate::digraph::{Digraph, OrderingProvenance, VertexId};

    fn fork() -> Digraph {
        let mut g = Digraph::new();
        for id in 1u64..=3 {
            g.add_vertex(id).unwrap();
        }
        g.add_edge(1u64, 2u64).unwrap();
        g.add_edge(1u64, 3u64).unwrap();
        g
    }

    #[test]
    fn parenthesis_structure_of_a_fork() {
        let mut g = fork();
        let forest = g.dfs(true);

        assert_eq!(forest.discovery(1u64), Some(1));
        assert!(forest.discovery(2u64).unwrap() > 1);
        assert!(forest.discovery(3u64).unwrap() > 1);
        // root finishes last
        assert_eq!(forest.finish(1u64), Some(6));
        assert_eq!(forest.parent(1u64), None);
        assert_eq!(forest.parent(2u64), Some(VertexId(1)));
        assert_eq!(forest.parent(3u64), Some(VertexId(1)));

        // the root precedes both children in the topological order
        let order = g.ordering();
        assert_eq!(order[0], VertexId(1));
        assert_eq!(order.len(), 3);
        assert_eq!(g.ordering_provenance(), OrderingProvenance::Topological);
    }

    #[test]
    fn times_are_a_permutation_of_two_v() {
        let mut g = Digraph::new();
        for id in 0u64..7 {
            g.add_vertex(id).unwrap();
        }
        for (u, v) in [(0u64, 1u64), (1, 2), (0, 3), (3, 4), (5, 6), (6, 0)] {
            g.add_edge(u, v).unwrap();
        }

        let forest = g.dfs(false);
        let mut times: Vec<u64> = forest
            .iter()
            .flat_map(|(_, a)| [a.discovery, a.finish])
            .collect();
        times.sort_unstable();
        assert_eq!(times, (1..=14).collect::<Vec<u64>>());

        for (_, a) in forest.iter() {
            assert!(a.discovery < a.finish);
        }
    }

    #[test]
    fn intervals_of_tree_children_nest_inside_their_parent() {
        let mut g = Digraph::new();
        for id in 1u64..=6 {
            g.add_vertex(id).unwrap();
        }
        for (u, v) in [(1u64, 2u64), (2, 3), (1, 4), (4, 5), (5, 6)] {
            g.add_edge(u, v).unwrap();
        }

        let forest = g.dfs(false);
        for (v, a) in forest.iter() {
            if let Some(p) = a.parent {
                let parent = forest.get(p).unwrap();
                assert!(parent.discovery < a.discovery, "parent of {v} discovered after it");
                assert!(a.finish < parent.finish, "parent of {v} finished before it");
            }
        }
    }

    #[test]
    fn disconnected_graphs_are_fully_covered() {
        let mut g = Digraph::new();
        for id in 1u64..=4 {
            g.add_vertex(id).unwrap();
        }
        g.add_edge(1u64, 2u64).unwrap();
        // 3 and 4 form a second component with no edges

        let forest = g.dfs(false);
        assert_eq!(forest.len(), 4);
        assert_eq!(forest.parent(3u64), None);
        assert_eq!(forest.parent(4u64), None);
        assert!(forest.discovery(3u64).unwrap() > forest.finish(2u64).unwrap());
    }

    #[test]
    fn dfs_without_ordering_leaves_the_slot_alone() {
        let mut g = fork();
        g.sort_vertices();
        let before = g.ordering().to_vec();

        g.dfs(false);
        assert_eq!(g.ordering(), before.as_slice());
        assert_eq!(g.ordering_provenance(), OrderingProvenance::Ascending);
    }

    #[test]
    fn empty_graph_yields_an_empty_forest() {
        let mut g = Digraph::new();
        let forest = g.dfs(true);
        assert!(forest.is_empty());
        assert!(g.ordering().is_empty());
        assert_eq!(g.ordering_provenance(), OrderingProvenance::Topological);
    }

    #[test]
    fn long_chains_do_not_exhaust_the_stack() {
        let n = 10_000u64;
        let mut g = Digraph::new();
        for id in 0..n {
            g.add_vertex(id).unwrap();
        }
        for id in 0..n - 1 {
            g.add_edge(id, id + 1).unwrap();
        }

        let forest = g.dfs(true);
        assert_eq!(forest.discovery(0u64), Some(1));
        assert_eq!(forest.finish(0u64), Some(2 * n));
        assert_eq!(g.ordering()[0], VertexId(0));
        assert_eq!(g.ordering()[(n - 1) as usize], VertexId(n - 1));
    }

    #[test]
    fn cyclic_graphs_still_produce_a_full_sequence() {
        let mut g = Digraph::new();
        for id in 1u64..=3 {
            g.add_vertex(id).unwrap();
        }
        g.add_edge(1u64, 2u64).unwrap();
        g.add_edge(2u64, 3u64).unwrap();
        g.add_edge(3u64, 1u64).unwrap();

        g.dfs(true);
        let mut order: Vec<VertexId> = g.ordering().to_vec();
        order.sort();
        assert_eq!(order, vec![VertexId(1), VertexId(2), VertexId(3)]);
    }
}
