//! Pronunciation lattice construction.
//!
//! The target word is aligned against every reference entry at every offset
//! that leaves room for a three-symbol overlap. Each maximal run of matching
//! symbols becomes a clique of arcs: one arc for every ordered pair of run
//! positions, labeled with the reference symbols strictly between them.
//! Identical arcs from different alignments accumulate weight.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::lexicon::{NO_BREAK, ReferenceEntry, SYLLABLE_BREAK, WORD_BOUNDARY};

/// A lattice node: a reference symbol pinned to a target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    /// The symbol the reference entry had at this position.
    pub symbol: char,
    /// Index into the wrapped target word.
    pub position: usize,
}

impl NodeKey {
    /// Create a node key.
    pub const fn new(symbol: char, position: usize) -> Self {
        Self { symbol, position }
    }
}

/// An outgoing arc with its accumulated weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutArc {
    /// Node the arc leads to.
    pub target: NodeKey,
    /// Reference symbols strictly between the two nodes.
    pub label: String,
    /// Number of alignments that produced this arc.
    pub weight: u64,
}

/// Outgoing arcs of one node, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Node {
    arcs: Vec<OutArc>,
    index: HashMap<(NodeKey, String), usize>,
}

impl Node {
    /// Outgoing arcs in the order they were first produced.
    pub fn arcs(&self) -> &[OutArc] {
        &self.arcs
    }

    fn add_arc(&mut self, target: NodeKey, label: String) {
        match self.index.entry((target, label)) {
            Entry::Occupied(slot) => self.arcs[*slot.get()].weight += 1,
            Entry::Vacant(slot) => {
                let label = slot.key().1.clone();
                slot.insert(self.arcs.len());
                self.arcs.push(OutArc {
                    target,
                    label,
                    weight: 1,
                });
            }
        }
    }
}

/// Wrap a word for alignment: `cat` becomes `#c*a*t#`.
pub fn wrap_target(word: &str) -> Vec<char> {
    let mut target = vec![WORD_BOUNDARY];
    for (i, c) in word.chars().enumerate() {
        if i > 0 {
            target.push(NO_BREAK);
        }
        target.push(c);
    }
    target.push(WORD_BOUNDARY);
    target
}

/// The weighted lattice for one target word.
#[derive(Debug, Clone)]
pub struct Lattice {
    target: Vec<char>,
    nodes: HashMap<NodeKey, Node>,
}

impl Lattice {
    /// Align `word` against every entry and collect the resulting arcs.
    #[tracing::instrument(skip(entries))]
    pub fn build<'a>(
        word: &str,
        entries: impl IntoIterator<Item = &'a ReferenceEntry>,
    ) -> Self {
        let target = wrap_target(word);
        let mut lattice = Self::with_boundaries(target);
        let n = lattice.target.len() as isize;
        let mut run: Vec<NodeKey> = Vec::new();

        for entry in entries {
            let symbols = entry.symbols();
            let m = symbols.len() as isize;

            for offset in (3 - n)..=(m - 3) {
                let lo = (-offset).max(0);
                let hi = n.min(m - offset);
                for i in lo..hi {
                    let reference = symbols[(i + offset) as usize];
                    if symbols_match(lattice.target[i as usize], reference) {
                        run.push(NodeKey::new(reference, i as usize));
                    } else {
                        lattice.absorb_run(&mut run);
                    }
                }
                lattice.absorb_run(&mut run);
            }
        }

        tracing::debug!(
            nodes = lattice.node_count(),
            arcs = lattice.arc_count(),
            "lattice built"
        );
        lattice
    }

    fn with_boundaries(target: Vec<char>) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(NodeKey::new(WORD_BOUNDARY, 0), Node::default());
        nodes.insert(
            NodeKey::new(WORD_BOUNDARY, target.len() - 1),
            Node::default(),
        );
        Self { target, nodes }
    }

    /// Materialize every node of a matching run, add its arcs, and clear it.
    fn absorb_run(&mut self, run: &mut Vec<NodeKey>) {
        for key in run.iter() {
            self.nodes.entry(*key).or_default();
        }
        for (from, to, label) in run_arcs(run.as_slice()) {
            self.nodes.entry(from).or_default().add_arc(to, label);
        }
        run.clear();
    }

    /// The wrapped target word.
    pub fn target(&self) -> &[char] {
        &self.target
    }

    /// The start boundary node.
    pub const fn start(&self) -> NodeKey {
        NodeKey::new(WORD_BOUNDARY, 0)
    }

    /// The end boundary node.
    pub fn end(&self) -> NodeKey {
        NodeKey::new(WORD_BOUNDARY, self.target.len() - 1)
    }

    /// Look up a node.
    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Outgoing arcs of a node; empty for unknown nodes.
    pub fn outgoing(&self, key: &NodeKey) -> &[OutArc] {
        self.nodes.get(key).map(Node::arcs).unwrap_or_default()
    }

    /// Weight of a specific arc, if present.
    pub fn arc_weight(&self, from: &NodeKey, to: &NodeKey, label: &str) -> Option<u64> {
        self.outgoing(from)
            .iter()
            .find(|arc| arc.target == *to && arc.label == label)
            .map(|arc| arc.weight)
    }

    /// Number of nodes, boundaries included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct arcs.
    pub fn arc_count(&self) -> usize {
        self.nodes.values().map(|node| node.arcs.len()).sum()
    }

    /// Sum of all arc weights.
    pub fn total_weight(&self) -> u64 {
        self.nodes
            .values()
            .flat_map(|node| node.arcs.iter())
            .map(|arc| arc.weight)
            .sum()
    }
}

/// A target gap matches either reference marker; everything else must be equal.
const fn symbols_match(target: char, reference: char) -> bool {
    target == reference || (target == NO_BREAK && reference == SYLLABLE_BREAK)
}

/// Every (from, to, label) arc implied by one matching run.
fn run_arcs(run: &[NodeKey]) -> Vec<(NodeKey, NodeKey, String)> {
    let mut arcs = Vec::with_capacity(run.len() * run.len().saturating_sub(1) / 2);
    for (i, &from) in run.iter().enumerate() {
        let mut label = String::new();
        for &to in &run[i + 1..] {
            arcs.push((from, to, label.clone()));
            label.push(to.symbol);
        }
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(s: &str) -> ReferenceEntry {
        s.parse().unwrap()
    }

    #[test]
    fn wrap_target_interleaves_gaps() {
        let wrapped: String = wrap_target("cat").into_iter().collect();
        assert_eq!(wrapped, "#c*a*t#");
        let empty: String = wrap_target("").into_iter().collect();
        assert_eq!(empty, "##");
    }

    #[test]
    fn boundaries_exist_without_matches() {
        let lattice = Lattice::build("cat", &[entry("#d*o*g#")]);
        assert!(lattice.node(&lattice.start()).is_some());
        assert!(lattice.node(&lattice.end()).is_some());
        assert!(lattice.outgoing(&lattice.start()).is_empty());
    }

    #[test]
    fn run_arcs_cover_every_pair() {
        let run = [
            NodeKey::new('#', 0),
            NodeKey::new('a', 1),
            NodeKey::new('-', 2),
            NodeKey::new('b', 3),
        ];
        let arcs = run_arcs(&run);
        assert_eq!(arcs.len(), 6);
        assert!(arcs.contains(&(run[0], run[3], "a-".to_string())));
        assert!(arcs.contains(&(run[1], run[2], String::new())));
    }

    #[test]
    fn weights_count_supporting_alignments() {
        // Two copies of the same entry: every arc of the full-word run is
        // supported by exactly two (entry, offset) alignments.
        let entries = [entry("#c-a-t#"), entry("#c-a-t#")];
        let lattice = Lattice::build("cat", &entries);

        // 7 symbols in the run, one arc per pair
        assert_eq!(lattice.arc_count(), 21);
        assert_eq!(lattice.total_weight(), 42);
        assert_eq!(
            lattice.arc_weight(&lattice.start(), &lattice.end(), "c-a-t"),
            Some(2)
        );
        assert_eq!(
            lattice.arc_weight(&NodeKey::new('c', 1), &NodeKey::new('t', 5), "-a-"),
            Some(2)
        );
    }

    #[test]
    fn target_gap_matches_break_marker() {
        let lattice = Lattice::build("cat", &[entry("#c-a*t#")]);
        assert_eq!(
            lattice.arc_weight(&lattice.start(), &lattice.end(), "c-a*t"),
            Some(1)
        );
        assert!(lattice.node(&NodeKey::new('-', 2)).is_some());
        assert!(lattice.node(&NodeKey::new('*', 4)).is_some());
    }

    #[test]
    fn partial_overlaps_produce_shared_nodes() {
        let lattice = Lattice::build("cats", &[entry("#c-a-t#"), entry("#b*a*t*s#")]);
        let a = NodeKey::new('a', 3);
        let t = NodeKey::new('t', 5);

        assert_eq!(lattice.arc_weight(&lattice.start(), &a, "c-"), Some(1));
        assert_eq!(lattice.arc_weight(&a, &lattice.end(), "*t*s"), Some(1));
        assert_eq!(lattice.arc_weight(&t, &lattice.end(), "*s"), Some(1));
        // the runs never touch the other entry's boundary
        assert_eq!(
            lattice.arc_weight(&lattice.start(), &lattice.end(), "c-a-t*s"),
            None
        );
    }
}
