//! Enumeration of every shortest path through a searched lattice.

use serde::{Deserialize, Serialize};

use super::lattice::{Lattice, NodeKey};
use super::search::ShortestPaths;
use crate::lexicon::WORD_BOUNDARY;

/// One shortest path from the start boundary to the end boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePath {
    /// Letters interleaved with boundary markers, e.g. `c-a*t*s`.
    pub hyphenation: String,
    /// Arc weights in start-to-end order.
    pub weights: Vec<u64>,
}

struct Frame {
    node: NodeKey,
    suffix: String,
    weights: Vec<u64>,
}

/// Walk predecessor arcs back from the end node and collect every path.
///
/// Branches are explored in predecessor order, so the output order matches a
/// recursive depth-first walk. Paths that spell the same hyphenation through
/// different nodes are all returned.
pub fn enumerate(lattice: &Lattice, search: &ShortestPaths) -> Vec<CandidatePath> {
    let start = lattice.start();
    let mut candidates = Vec::new();
    let mut stack = vec![Frame {
        node: lattice.end(),
        suffix: String::new(),
        weights: Vec::new(),
    }];

    while let Some(frame) = stack.pop() {
        if frame.node == start {
            let mut weights = frame.weights;
            weights.reverse();
            let hyphenation = frame
                .suffix
                .strip_suffix(WORD_BOUNDARY)
                .unwrap_or(&frame.suffix)
                .to_string();
            candidates.push(CandidatePath {
                hyphenation,
                weights,
            });
            continue;
        }

        let predecessors = search.predecessors(&frame.node);
        if predecessors.is_empty() {
            // dead end
            continue;
        }

        let mut path = String::with_capacity(frame.suffix.len() + 1);
        path.push(frame.node.symbol);
        path.push_str(&frame.suffix);

        for pred in predecessors.iter().rev() {
            let mut weights = frame.weights.clone();
            weights.push(pred.weight);
            stack.push(Frame {
                node: pred.source,
                suffix: format!("{}{path}", pred.label),
                weights,
            });
        }
    }

    tracing::debug!(candidates = candidates.len(), "shortest paths enumerated");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::ReferenceEntry;

    fn candidates(word: &str, entries: &[&str]) -> Vec<CandidatePath> {
        let entries: Vec<ReferenceEntry> = entries.iter().map(|e| e.parse().unwrap()).collect();
        let lattice = Lattice::build(word, &entries);
        let search = ShortestPaths::search(&lattice);
        enumerate(&lattice, &search)
    }

    #[test]
    fn single_arc_path() {
        let found = candidates("cat", &["#c-a-t#", "#c-a-t#"]);
        assert_eq!(
            found,
            vec![CandidatePath {
                hyphenation: "c-a-t".to_string(),
                weights: vec![2],
            }]
        );
    }

    #[test]
    fn tied_paths_in_predecessor_order() {
        let found = candidates("cats", &["#c-a-t#", "#b*a*t*s#"]);
        let hyphenations: Vec<&str> = found.iter().map(|c| c.hyphenation.as_str()).collect();
        assert_eq!(hyphenations, vec!["c-a*t*s", "c-a-t*s"]);
        assert!(found.iter().all(|c| c.weights == vec![1, 1]));
    }

    #[test]
    fn identical_spellings_are_not_merged() {
        // Both runs share the target's '*' gaps, so every chain spells the
        // same hyphenation.
        let found = candidates("cats", &["#c*a*t#", "#b*a*t*s#"]);
        assert!(found.len() > 1);
        assert!(found.iter().all(|c| c.hyphenation == "c*a*t*s"));
    }

    #[test]
    fn unreachable_end_yields_nothing() {
        assert!(candidates("cats", &["#d*o*g#"]).is_empty());
    }
}
