//! Multi-strategy scoring of candidate paths.
//!
//! Each candidate is ranked under three statistics of its arc weights:
//!
//! - **PF** (product of frequencies): the product of the weights;
//! - **SDPS**: the population variance of the weights;
//! - **WL** (weak link): the smallest weight.
//!
//! Under each statistic candidates are sorted best-first. The top group of
//! tied values starts at rank `n` (the number of candidates); every group
//! awards its members `rank - (size - 1) / 2` points and the next group ranks
//! one lower. Points are summed per distinct hyphenation.

use std::cmp::Ordering;
use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::paths::CandidatePath;

/// The three per-path statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PathStatistics {
    /// Product of arc weights (saturating).
    pub product: u128,
    /// Population variance of arc weights, for display. Ranking uses the
    /// exact value.
    pub variance: f64,
    /// Smallest arc weight.
    pub weak_link: u64,
    #[serde(skip)]
    spread: Spread,
}

/// Exact population variance as `numerator / denominator`, where the
/// numerator is `n·Σw² − (Σw)²` and the denominator is `n²`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Spread {
    numerator: u128,
    denominator: u128,
}

impl Spread {
    fn of(weights: &[u64]) -> Self {
        let n = weights.len() as u128;
        let (sum, sum_sq) = weights.iter().fold((0u128, 0u128), |(sum, sq), &w| {
            let w = u128::from(w);
            (
                sum.saturating_add(w),
                sq.saturating_add(w.saturating_mul(w)),
            )
        });
        Self {
            numerator: n
                .saturating_mul(sum_sq)
                .saturating_sub(sum.saturating_mul(sum)),
            denominator: n.saturating_mul(n).max(1),
        }
    }

    fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    fn compare(self, other: Self) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }
        match (
            self.numerator.checked_mul(other.denominator),
            other.numerator.checked_mul(self.denominator),
        ) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl PathStatistics {
    /// Compute statistics for a weight sequence.
    ///
    /// Every statistic is independent of weight order. An empty sequence has
    /// product 1, variance 0 and weak link 0.
    pub fn from_weights(weights: &[u64]) -> Self {
        let spread = Spread::of(weights);
        Self {
            product: weights
                .iter()
                .fold(1u128, |acc, &w| acc.saturating_mul(u128::from(w))),
            variance: spread.as_f64(),
            weak_link: weights.iter().copied().min().unwrap_or(0),
            spread,
        }
    }

    /// Order two paths by the exact variance of their weights.
    pub fn compare_variance(&self, other: &Self) -> Ordering {
        self.spread.compare(other.spread)
    }
}

/// A distinct hyphenation with its summed points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredPath {
    /// Letters interleaved with boundary markers.
    pub hyphenation: String,
    /// Total points across the three strategies and every occurrence.
    pub score: f64,
    /// How many candidate paths spelled this hyphenation.
    pub occurrences: usize,
    /// Statistics of the first candidate with this hyphenation.
    pub statistics: PathStatistics,
}

/// Score every candidate and fold the points into distinct hyphenations.
///
/// The result keeps first-seen order, which is also the tie-break order for
/// [`best`].
pub fn score(candidates: &[CandidatePath]) -> Vec<ScoredPath> {
    let stats: Vec<PathStatistics> = candidates
        .iter()
        .map(|c| PathStatistics::from_weights(&c.weights))
        .collect();

    let mut points = vec![0.0; candidates.len()];
    award_points(&stats, &mut points, |a, b| a.product.cmp(&b.product));
    award_points(&stats, &mut points, PathStatistics::compare_variance);
    award_points(&stats, &mut points, |a, b| a.weak_link.cmp(&b.weak_link));

    let mut scored: Vec<ScoredPath> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for ((candidate, stat), pts) in candidates.iter().zip(&stats).zip(points) {
        match index.get(candidate.hyphenation.as_str()) {
            Some(&i) => {
                scored[i].score += pts;
                scored[i].occurrences += 1;
            }
            None => {
                index.insert(candidate.hyphenation.as_str(), scored.len());
                scored.push(ScoredPath {
                    hyphenation: candidate.hyphenation.clone(),
                    score: pts,
                    occurrences: 1,
                    statistics: *stat,
                });
            }
        }
    }
    scored
}

/// The highest-scoring hyphenation; the earliest one wins a tie.
pub fn best(scored: &[ScoredPath]) -> Option<&ScoredPath> {
    scored.iter().reduce(|best, next| {
        if next.score > best.score {
            next
        } else {
            best
        }
    })
}

/// Rank candidates under one statistic and add tie-averaged points.
///
/// `compare` orders two statistics ascending; ranking is descending. The
/// sort is stable, so equal candidates keep their enumeration order.
fn award_points<F>(stats: &[PathStatistics], points: &mut [f64], compare: F)
where
    F: Fn(&PathStatistics, &PathStatistics) -> Ordering,
{
    let n = stats.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| compare(&stats[b], &stats[a]));

    let mut rank = n as f64;
    let mut group_start = 0;
    for i in 1..=n {
        let closes_group =
            i == n || compare(&stats[order[i]], &stats[order[group_start]]) == Ordering::Less;
        if closes_group {
            let size = (i - group_start) as f64;
            let award = rank - (size - 1.0) / 2.0;
            for &candidate in &order[group_start..i] {
                points[candidate] += award;
            }
            rank -= 1.0;
            group_start = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(hyphenation: &str, weights: &[u64]) -> CandidatePath {
        CandidatePath {
            hyphenation: hyphenation.to_string(),
            weights: weights.to_vec(),
        }
    }

    #[test]
    fn statistics_of_weights() {
        let stats = PathStatistics::from_weights(&[6, 1]);
        assert_eq!(stats.product, 6);
        assert!((stats.variance - 6.25).abs() < f64::EPSILON);
        assert_eq!(stats.weak_link, 1);
    }

    #[test]
    fn variance_has_no_square_root() {
        let stats = PathStatistics::from_weights(&[1, 3, 5]);
        // mean 3, squared deviations 4 + 0 + 4
        assert!((stats.variance - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn variance_ignores_weight_order() {
        let forward = PathStatistics::from_weights(&[7, 1, 6]);
        let shuffled = PathStatistics::from_weights(&[6, 1, 7]);
        assert_eq!(forward, shuffled);
        assert_eq!(forward.compare_variance(&shuffled), Ordering::Equal);

        let mut points = vec![0.0; 2];
        award_points(
            &[forward, shuffled],
            &mut points,
            PathStatistics::compare_variance,
        );
        assert_eq!(points, vec![1.5, 1.5]);
    }

    #[test]
    fn variance_compares_across_lengths() {
        // 8/3 against 9/4
        let three = PathStatistics::from_weights(&[1, 3, 5]);
        let four = PathStatistics::from_weights(&[1, 1, 4, 4]);
        assert_eq!(three.compare_variance(&four), Ordering::Greater);
    }

    #[test]
    fn product_saturates() {
        let stats = PathStatistics::from_weights(&[u64::MAX, u64::MAX, u64::MAX]);
        assert_eq!(stats.product, u128::MAX);
    }

    #[test]
    fn tied_groups_share_averaged_rank() {
        let stats = [
            PathStatistics::from_weights(&[2, 3]),
            PathStatistics::from_weights(&[6, 1]),
            PathStatistics::from_weights(&[2, 2]),
        ];
        let mut points = vec![0.0; 3];
        award_points(&stats, &mut points, |a, b| a.product.cmp(&b.product));
        // PF: 6, 6, 4 -> first two tie at rank 3: 3 - (2 - 1) / 2
        assert_eq!(points, vec![2.5, 2.5, 2.0]);
    }

    #[test]
    fn totals_pick_expected_winner() {
        let candidates = [
            candidate("a*b-c", &[2, 3]),
            candidate("a-b*c", &[6, 1]),
            candidate("a*b*c", &[2, 2]),
        ];
        let scored = score(&candidates);
        // PF:   2.5, 2.5, 2.0
        // SDPS: 2.0, 3.0, 1.0
        // WL:   2.5, 2.0, 2.5
        let totals: Vec<f64> = scored.iter().map(|s| s.score).collect();
        assert_eq!(totals, vec![7.0, 7.5, 5.5]);
        assert_eq!(best(&scored).unwrap().hyphenation, "a-b*c");
    }

    #[test]
    fn duplicate_hyphenations_sum_points() {
        let candidates = [
            candidate("a-b", &[1, 1]),
            candidate("a*b", &[1, 1]),
            candidate("a-b", &[1, 1]),
        ];
        let scored = score(&candidates);
        assert_eq!(scored.len(), 2);
        // one group of three: 3 - 1 = 2 points per strategy
        assert_eq!(scored[0].hyphenation, "a-b");
        assert_eq!(scored[0].occurrences, 2);
        assert_eq!(scored[0].score, 12.0);
        assert_eq!(scored[1].score, 6.0);
    }

    #[test]
    fn earliest_wins_equal_totals() {
        let candidates = [candidate("x-y", &[1]), candidate("x*y", &[1])];
        let scored = score(&candidates);
        assert_eq!(scored[0].score, scored[1].score);
        assert_eq!(best(&scored).unwrap().hyphenation, "x-y");
    }

    #[test]
    fn no_candidates_no_winner() {
        assert!(score(&[]).is_empty());
        assert!(best(&[]).is_none());
    }
}
