//! Fuzzy matching algorithm and its scoring function.
//!
//! The matcher explores every in-order alignment of a pattern inside a choice
//! by forking partial alignments, and keeps the one with the lowest
//! similarity score.

/// Similarity scoring of a complete alignment
pub mod scoring;
/// Surfer fuzzy matching algorithm
pub mod surfer;
pub(crate) mod util;

/// Character index into a choice.
pub type IndexType = usize;
/// Similarity score, lower is better.
pub type ScoreType = f32;

/// Character indices of the matched pattern characters, in ascending order.
pub type MatchIndices = Vec<IndexType>;

/// Trait for fuzzy matching text patterns against choices.
///
/// Scores are "distances": the lower the score, the better the match.
pub trait FuzzyMatcher: Send + Sync {
    /// fuzzy match choice with pattern, and return the score & matched indices of characters
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(ScoreType, MatchIndices)>;

    /// fuzzy match choice with pattern, and return the score of matching
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<ScoreType> {
        self.fuzzy_indices(choice, pattern).map(|(score, _)| score)
    }

    /// Fuzzy match and return (score, begin_char_index, end_char_index).
    ///
    /// `begin` is the character index of the first matched pattern character,
    /// `end` is the character index of the last matched pattern character.
    fn fuzzy_match_range(&self, choice: &str, pattern: &str) -> Option<(ScoreType, usize, usize)> {
        self.fuzzy_indices(choice, pattern).map(|(score, indices)| {
            let begin = indices.first().copied().unwrap_or(0);
            let end = indices.last().copied().unwrap_or(0);
            (score, begin, end)
        })
    }
}
