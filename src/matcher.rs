//! This module contains the ranking coordinator
use std::cmp::Ordering as CmpOrdering;
use std::num::NonZeroUsize;

use rayon::prelude::*;

use crate::fuzzy_matcher::MatchIndices;
use crate::fuzzy_matcher::surfer::{DEFAULT_LIMIT, SearchResult, SurferMatcher};
use crate::{CaseMatching, SurferError, SurferOptions};

//==============================================================================
/// A candidate that matched the query, with its score and matched positions.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedItem {
    /// Position of the candidate in the input
    pub index: usize,
    /// The candidate text
    pub text: String,
    /// Similarity score, lower is better
    pub score: f32,
    /// Character indices of the matched query characters
    pub positions: MatchIndices,
}

impl MatchedItem {
    fn unscored(index: usize, text: &str) -> Self {
        Self {
            index,
            text: text.to_string(),
            score: SearchResult::NO_MATCH_SCORE,
            positions: Vec::new(),
        }
    }

    fn rank_cmp(&self, other: &Self) -> CmpOrdering {
        self.score.total_cmp(&other.score).then(self.index.cmp(&other.index))
    }
}

//==============================================================================
/// Scores candidates against a query and sorts them, best first.
#[derive(Debug, Clone)]
pub struct Matcher {
    case_matching: CaseMatching,
    max_results: Option<usize>,
    max_matchers: Option<NonZeroUsize>,
    normalize: bool,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            case_matching: CaseMatching::default(),
            max_results: None,
            max_matchers: DEFAULT_LIMIT,
            normalize: false,
        }
    }
}

impl Matcher {
    /// Creates a new Matcher builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Sets the case matching mode (smart, ignore, or respect).
    pub fn case(mut self, case_matching: CaseMatching) -> Self {
        self.case_matching = case_matching;
        self
    }

    /// Keeps at most `max_results` results.
    pub fn max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    /// Bounds the number of alignments explored per candidate; `None` removes
    /// the bound.
    pub fn max_matchers(mut self, max_matchers: Option<NonZeroUsize>) -> Self {
        self.max_matchers = max_matchers;
        self
    }

    /// Strips diacritics before matching.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Finalizes the builder and returns the configured Matcher.
    pub fn build(self) -> Self {
        self
    }

    /// Creates a Matcher configured from the given SurferOptions.
    pub fn from_options(options: &SurferOptions) -> Result<Self, SurferError> {
        let max_matchers = NonZeroUsize::new(options.max_matchers)
            .ok_or_else(|| SurferError::InvalidArgument("max-matchers must be at least 1".to_string()))?;
        Ok(Matcher::builder()
            .case(options.case)
            .max_results(options.max_results)
            .max_matchers(Some(max_matchers))
            .normalize(options.normalize)
            .build())
    }

    /// Returns the case matching setting for this matcher.
    pub fn case_matching(&self) -> CaseMatching {
        self.case_matching
    }

    fn create_engine(&self) -> SurferMatcher {
        debug!(
            "Creating matcher: case {:?}, max matchers {:?}, normalize {}",
            self.case_matching, self.max_matchers, self.normalize
        );
        SurferMatcher::default()
            .case(self.case_matching)
            .max_matchers(self.max_matchers)
            .normalize(self.normalize)
    }

    fn match_one(engine: &SurferMatcher, query: &str, index: usize, text: &str) -> Option<MatchedItem> {
        if query.is_empty() {
            return Some(MatchedItem::unscored(index, text));
        }
        let (score, positions) = engine.search(query, text).into_option()?;
        Some(MatchedItem {
            index,
            text: text.to_string(),
            score,
            positions,
        })
    }

    fn finish(&self, mut matched_items: Vec<MatchedItem>) -> Vec<MatchedItem> {
        matched_items.par_sort_unstable_by(MatchedItem::rank_cmp);
        if let Some(max_results) = self.max_results {
            matched_items.truncate(max_results);
        }
        matched_items
    }

    /// Scores every item against `query` and returns the matches sorted by
    /// ascending score, ties keeping input order.
    ///
    /// Leading and trailing whitespace of the query is ignored. An empty query
    /// matches every item, in input order, with no score.
    pub fn rank<S: AsRef<str> + Sync>(&self, query: &str, items: &[S]) -> Vec<MatchedItem> {
        let query = query.trim();
        let engine = self.create_engine();
        trace!("matcher start, total: {}", items.len());
        let matched_items: Vec<MatchedItem> = items
            .par_iter()
            .enumerate()
            .filter_map(|(index, item)| Self::match_one(&engine, query, index, item.as_ref()))
            .collect();
        trace!("matcher stop, total matched: {}", matched_items.len());
        self.finish(matched_items)
    }
}
