//! Breadth-first shortest paths over a lattice, keeping every tied predecessor.

use std::collections::{HashMap, VecDeque};

use super::lattice::{Lattice, NodeKey};

/// An incoming arc that lies on some shortest path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predecessor {
    /// Node the arc comes from.
    pub source: NodeKey,
    /// Arc label.
    pub label: String,
    /// Arc weight.
    pub weight: u64,
}

/// Hop distances from the start node and the predecessors that achieve them.
#[derive(Debug, Clone, Default)]
pub struct ShortestPaths {
    distances: HashMap<NodeKey, usize>,
    predecessors: HashMap<NodeKey, Vec<Predecessor>>,
}

impl ShortestPaths {
    /// Run the search from the lattice's start node.
    ///
    /// Distance counts arcs, not weights. A node is enqueued only when its
    /// distance is first set; later arcs arriving at the same distance are
    /// recorded as additional predecessors.
    pub fn search(lattice: &Lattice) -> Self {
        let start = lattice.start();
        let mut paths = Self::default();
        paths.distances.insert(start, 0);

        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let Some(&distance) = paths.distances.get(&node) else {
                continue;
            };
            let next = distance + 1;

            for arc in lattice.outgoing(&node) {
                let incoming = Predecessor {
                    source: node,
                    label: arc.label.clone(),
                    weight: arc.weight,
                };
                match paths.distances.get(&arc.target).copied() {
                    Some(known) if known < next => {}
                    Some(known) if known == next => {
                        paths
                            .predecessors
                            .entry(arc.target)
                            .or_default()
                            .push(incoming);
                    }
                    _ => {
                        paths.distances.insert(arc.target, next);
                        paths.predecessors.insert(arc.target, vec![incoming]);
                        queue.push_back(arc.target);
                    }
                }
            }
        }

        tracing::trace!(reached = paths.distances.len(), "shortest paths computed");
        paths
    }

    /// Hop distance from the start node, if reachable.
    pub fn distance(&self, node: &NodeKey) -> Option<usize> {
        self.distances.get(node).copied()
    }

    /// Every predecessor arc achieving the node's distance, in discovery order.
    pub fn predecessors(&self, node: &NodeKey) -> &[Predecessor] {
        self.predecessors
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if the node was reached.
    pub fn reaches(&self, node: &NodeKey) -> bool {
        self.distances.contains_key(node)
    }
}
