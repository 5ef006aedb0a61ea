//! Similarity of a complete alignment.
//!
//! The score is a distance: lower is better. It adds up
//!
//! - **gravity**: the mean matched position, so early matches win;
//! - **compactness**: the mean distance between every pair of matched
//!   positions, so tight matches win;
//! - **contiguous sets**: the number of breaks between runs of consecutive
//!   positions;
//!
//! and subtracts [`BOUNDARY_WEIGHT`] for every matched word boundary.

use crate::fuzzy_matcher::{IndexType, ScoreType};

/// Score returned when there is nothing to score.
pub const NO_SCORE: ScoreType = -1.0;

/// Amount subtracted from the score for each match on a word boundary.
pub const BOUNDARY_WEIGHT: f64 = 2.0;

/// Compute the similarity of an alignment.
///
/// `positions` must be strictly increasing. `haystack_len` is unused by the
/// current formula.
pub fn similarity(_haystack_len: usize, positions: &[IndexType], boundary_count: usize) -> ScoreType {
    let m = positions.len();
    if m == 0 {
        return NO_SCORE;
    }

    let mut sum: u64 = 0;
    // For sorted positions, sum_{a<b} (p_b - p_a) == sum_k p_k * (2k - (m - 1)).
    let mut pairwise: i64 = 0;
    let mut contiguous_sets: u64 = 0;

    for (k, &pos) in positions.iter().enumerate() {
        sum += pos as u64;
        pairwise += pos as i64 * (2 * k as i64 - (m as i64 - 1));
        if k > 0 && positions[k - 1] + 1 != pos {
            contiguous_sets += 1;
        }
    }

    let gravity = sum as f64 / m as f64;
    let pairs = (m * (m - 1) / 2) as f64;
    let compactness = if m > 1 { pairwise as f64 / pairs } else { 0.0 };

    (gravity + compactness + contiguous_sets as f64 - BOUNDARY_WEIGHT * boundary_count as f64) as ScoreType
}
