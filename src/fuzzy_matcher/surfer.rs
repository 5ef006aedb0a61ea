//! Surfer's fuzzy matching algorithm.
//!
//! The needle is aligned against the haystack left to right while a pool of
//! partial alignments ("matchers") is kept alive. Every haystack character is
//! first offered as a restart point: a matcher that already consumed the same
//! character forks a copy truncated right before it, so an alternative and
//! possibly tighter alignment gets explored without dropping the original
//! one. Then every unfinished matcher tries to consume the character. Each
//! matcher that consumes the whole needle is scored with
//! [`similarity`](crate::fuzzy_matcher::scoring::similarity), and the lowest
//! score found first wins.
//!
//! The pool only grows during a call. On repetitive input it can grow very
//! fast, so forking stops once it holds `max_matchers` entries
//! ([`DEFAULT_MAX_MATCHERS`] by default). Below that size the result is the
//! same as an unbounded search.
//!
//! # Example:
//! ```
//! use surfer::fuzzy_matcher::FuzzyMatcher;
//! use surfer::fuzzy_matcher::surfer::{SurferMatcher, search};
//!
//! let result = search("fb", "foo_bar", false);
//! assert_eq!(result.positions, [0, 4]);
//! assert_eq!(result.score, 3.0);
//!
//! let result = search("xyz", "abc", false);
//! assert!(!result.is_match());
//! assert_eq!(result.score, -1.0);
//!
//! let matcher = SurferMatcher::default();
//! let (_score, indices) = matcher.fuzzy_indices("axbycz", "abc").unwrap();
//! assert_eq!(indices, [0, 2, 4]);
//! ```

use std::cell::RefCell;
use std::num::NonZeroUsize;

use thread_local::ThreadLocal;

use crate::CaseMatching;
use crate::fuzzy_matcher::scoring::{NO_SCORE, similarity};
use crate::fuzzy_matcher::util::{chars_match, fold_char, is_all_uppercase, is_word_boundary, to_lower};
use crate::fuzzy_matcher::{FuzzyMatcher, IndexType, MatchIndices, ScoreType};

/// Default upper bound on the number of matchers alive during one search.
pub const DEFAULT_MAX_MATCHERS: usize = 4096;

pub(crate) const DEFAULT_LIMIT: Option<NonZeroUsize> = NonZeroUsize::new(DEFAULT_MAX_MATCHERS);

//------------------------------------------------------------------------------
/// Outcome of a search.
///
/// A search that found nothing, or was given an empty needle, carries
/// [`SearchResult::NO_MATCH_SCORE`] and no positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Similarity of the best alignment, lower is better
    pub score: ScoreType,
    /// Character indices of the haystack matched by each needle character
    pub positions: MatchIndices,
}

impl SearchResult {
    /// Score reported when nothing matched.
    pub const NO_MATCH_SCORE: ScoreType = NO_SCORE;

    /// The "no match" sentinel
    pub fn no_match() -> Self {
        Self {
            score: Self::NO_MATCH_SCORE,
            positions: Vec::new(),
        }
    }

    /// Whether an alignment was found
    pub fn is_match(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Converts into `Some((score, positions))`, or `None` for the sentinel
    pub fn into_option(self) -> Option<(ScoreType, MatchIndices)> {
        if self.is_match() {
            Some((self.score, self.positions))
        } else {
            None
        }
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::no_match()
    }
}

//------------------------------------------------------------------------------
/// One candidate alignment of a needle prefix.
///
/// `consumed`, `positions` and `boundaries` always have the same length,
/// which is the number of needle characters matched so far.
#[derive(Debug, Clone, Default, PartialEq)]
struct Hypothesis {
    consumed: Vec<char>,
    positions: Vec<IndexType>,
    boundaries: Vec<bool>,
}

impl Hypothesis {
    /// Index of the next needle character this hypothesis expects.
    #[inline]
    fn needle_idx(&self) -> usize {
        self.positions.len()
    }

    fn boundary_count(&self) -> usize {
        self.boundaries.iter().filter(|&&b| b).count()
    }

    /// Copy of `self` truncated before the first consumed `lower_ch`, if the
    /// rest of the needle still fits in the `remaining` haystack characters.
    fn fork_at(&self, lower_ch: char, needle_len: usize, remaining: usize) -> Option<Self> {
        let idx = self.consumed.iter().position(|&c| c == lower_ch)?;
        if needle_len - idx > remaining {
            return None;
        }
        Some(Self {
            consumed: self.consumed[..idx].to_vec(),
            positions: self.positions[..idx].to_vec(),
            boundaries: self.boundaries[..idx].to_vec(),
        })
    }

    fn consume(&mut self, position: IndexType, boundary: bool, lower_ch: char) {
        self.boundaries.push(boundary);
        self.positions.push(position);
        self.consumed.push(lower_ch);
    }
}

/// Runs the search and also reports how many matchers were alive at the end.
fn search_chars(
    needle: &[char],
    haystack: &[char],
    case: CaseMatching,
    max_matchers: Option<NonZeroUsize>,
) -> (SearchResult, usize) {
    if needle.is_empty() {
        return (SearchResult::no_match(), 0);
    }

    let needle_len = needle.len();
    let haystack_len = haystack.len();
    // In an all-uppercase haystack capitals carry no word information
    let upper_is_boundary = !is_all_uppercase(haystack);

    let mut matchers = vec![Hypothesis::default()];
    let mut best = SearchResult::no_match();
    let mut capped = false;

    for (i, &ch) in haystack.iter().enumerate() {
        let lower_ch = to_lower(ch);

        // forks created here are not forked again for the same character
        let alive = matchers.len();
        for j in 0..alive {
            if max_matchers.is_some_and(|limit| matchers.len() >= limit.get()) {
                if !capped {
                    trace!("matcher limit reached at char {i}/{haystack_len}, no more forks");
                    capped = true;
                }
                break;
            }
            if let Some(fork) = matchers[j].fork_at(lower_ch, needle_len, haystack_len - i) {
                matchers.push(fork);
            }
        }

        for matcher in matchers.iter_mut() {
            let needle_idx = matcher.needle_idx();
            if needle_idx == needle_len {
                continue;
            }

            let expected = needle[needle_idx];
            if !chars_match(expected, ch, case) {
                continue;
            }

            let boundary = is_word_boundary(haystack, i, upper_is_boundary);
            matcher.consume(i, boundary, to_lower(expected));

            if matcher.needle_idx() == needle_len {
                let score = similarity(haystack_len, &matcher.positions, matcher.boundary_count());
                if !best.is_match() || score < best.score {
                    best = SearchResult {
                        score,
                        positions: matcher.positions.clone(),
                    };
                }
            }
        }
    }

    (best, matchers.len())
}

//------------------------------------------------------------------------------
/// Fuzzy matcher using surfer's forking search.
#[derive(Debug)]
pub struct SurferMatcher {
    case: CaseMatching,
    max_matchers: Option<NonZeroUsize>,
    normalize: bool,
    use_cache: bool,
    c_cache: ThreadLocal<RefCell<Vec<char>>>,
    p_cache: ThreadLocal<RefCell<Vec<char>>>,
}

impl Default for SurferMatcher {
    fn default() -> Self {
        Self {
            case: CaseMatching::default(),
            max_matchers: DEFAULT_LIMIT,
            normalize: false,
            use_cache: true,
            c_cache: ThreadLocal::new(),
            p_cache: ThreadLocal::new(),
        }
    }
}

impl SurferMatcher {
    /// Sets the case matching mode.
    pub fn case(mut self, case: CaseMatching) -> Self {
        self.case = case;
        self
    }

    /// Sets the matcher to ignore case when matching.
    pub fn ignore_case(self) -> Self {
        self.case(CaseMatching::Ignore)
    }

    /// Sets the matcher to use smart case: uppercase pattern characters only
    /// match uppercase characters.
    pub fn smart_case(self) -> Self {
        self.case(CaseMatching::Smart)
    }

    /// Sets the matcher to respect case exactly.
    pub fn respect_case(self) -> Self {
        self.case(CaseMatching::Respect)
    }

    /// Bounds the number of matchers alive during one search; `None` removes
    /// the bound.
    pub fn max_matchers(mut self, max_matchers: Option<NonZeroUsize>) -> Self {
        self.max_matchers = max_matchers;
        self
    }

    /// Strips diacritics from both the pattern and the choice before matching.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Enables or disables thread-local caching of character buffers.
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Searches `needle` in `haystack`.
    pub fn search(&self, needle: &str, haystack: &str) -> SearchResult {
        self.search_with_stats(needle, haystack).0
    }

    fn search_with_stats(&self, needle: &str, haystack: &str) -> (SearchResult, usize) {
        let mut choice_chars = self.c_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        let mut pattern_chars = self.p_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();

        choice_chars.clear();
        pattern_chars.clear();
        if self.normalize {
            choice_chars.extend(haystack.chars().map(fold_char));
            pattern_chars.extend(needle.chars().map(fold_char));
        } else {
            choice_chars.extend(haystack.chars());
            pattern_chars.extend(needle.chars());
        }

        let ret = search_chars(&pattern_chars, &choice_chars, self.case, self.max_matchers);

        if !self.use_cache {
            choice_chars.clear();
            choice_chars.shrink_to_fit();
            pattern_chars.clear();
            pattern_chars.shrink_to_fit();
        }

        ret
    }
}

impl FuzzyMatcher for SurferMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(ScoreType, MatchIndices)> {
        self.search(pattern, choice).into_option()
    }
}

//------------------------------------------------------------------------------
/// Searches `needle` in `haystack`, case-insensitively unless `smart_case`
/// is set and a needle character is uppercase.
///
/// Returns the best alignment, or the [`SearchResult::no_match`] sentinel when
/// the needle is empty or is not a subsequence of the haystack.
pub fn search(needle: &str, haystack: &str, smart_case: bool) -> SearchResult {
    SurferMatcher::default()
        .case(CaseMatching::from_smart_case(smart_case))
        .use_cache(false)
        .search(needle, haystack)
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;
    use crate::fuzzy_matcher::util::{assert_order, wrap_matches};

    fn assert_close(actual: f32, expected: f64) {
        assert!(
            (actual as f64 - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    fn wrap_search(needle: &str, haystack: &str) -> Option<String> {
        let (_score, indices) = search(needle, haystack, false).into_option()?;
        Some(wrap_matches(haystack, &indices))
    }

    #[test]
    fn test_empty_needle() {
        assert_eq!(search("", "clusterSendMessage", false), SearchResult::no_match());
        assert_eq!(search("", "", true), SearchResult::no_match());
    }

    #[test]
    fn test_no_match() {
        assert_eq!(search("whatever", "", false), SearchResult::no_match());
        assert_eq!(search("whatever", "clusterSendMessage", false), SearchResult::no_match());
        assert_eq!(search("xyz", "abc", false), SearchResult::no_match());
        assert_eq!(search("ba", "ab", false), SearchResult::no_match());
    }

    #[test]
    fn test_match_indices() {
        assert_eq!("[a]x[b]y[c]z", &wrap_search("abc", "axbycz").unwrap());
        assert_eq!("a[x]b[y]c[z]", &wrap_search("xyz", "axbycz").unwrap());
        assert_eq!("[f]oo[B]ar", &wrap_search("fb", "fooBar").unwrap());
        assert_eq!("[f]oo_[b]ar", &wrap_search("fb", "foo_bar").unwrap());
    }

    #[test]
    fn test_exact_containment() {
        let result = search("abc", "abc", false);
        assert_eq!(result.positions, [0, 1, 2]);
        assert_close(result.score, 1.0 + 4.0 / 3.0 - 2.0);
    }

    #[test]
    fn test_prefers_earliest_tight_alignment() {
        let result = search("cls", "clusterSendMessage", false);
        assert_eq!(result.positions, [0, 1, 3]);
        assert_close(result.score, 7.0 / 3.0);
    }

    #[test]
    fn test_fork_finds_better_alignment() {
        // the greedy alignment is s(3) e(5) n(9) d(10); a fork restarting at
        // the capital S finds the contiguous run
        let result = search("send", "clusterSendMessage", false);
        assert_eq!(result.positions, [7, 8, 9, 10]);
        assert_close(result.score, 8.5 + 10.0 / 6.0 - 2.0);

        let result = search("Send", "clusterSendMessage", false);
        assert_eq!(result.positions, [7, 8, 9, 10]);
    }

    #[test]
    fn test_ties_keep_first_completed() {
        // [0, 3] and [2, 3] both score 3.5; [0, 3] completes first
        let result = search("ab", "axab", false);
        assert_eq!(result.positions, [0, 3]);
        assert_close(result.score, 3.5);
    }

    #[test]
    fn test_negative_best_is_kept() {
        // [3, 4] and [0, 4] complete later with worse scores
        let result = search("ab", "ab_ab", false);
        assert_eq!(result.positions, [0, 1]);
        assert_close(result.score, -0.5);
    }

    #[test]
    fn test_smart_case() {
        assert_eq!(search("clSM", "clusterSendMessage", true).positions, [0, 1, 7, 11]);
        // lowercase `s` matches the first `s`, but the fork restarting at `S`
        // scores better
        let result = search("clsM", "clusterSendMessage", true);
        assert_eq!(result.positions, [0, 1, 7, 11]);
        assert_close(result.score, 7.25);

        assert!(!search("clSE", "clusterSendMessage", true).is_match());
        assert!(!search("clssS", "clusterSendMessage", true).is_match());
        assert!(search("clSE", "clusterSendMessage", false).is_match());
    }

    #[test]
    fn test_case_toggle() {
        assert_eq!(search("Abc", "xAbcx", true).positions, [1, 2, 3]);
        assert!(!search("Abc", "xabcx", true).is_match());
        assert_eq!(search("Abc", "xabcx", false).positions, [1, 2, 3]);
        assert_eq!(search("Abc", "xABCx", false).positions, [1, 2, 3]);
    }

    #[test]
    fn test_boundary_bonus() {
        assert_close(search("fb", "fooBar", false).score, 1.5);
        assert_close(search("fb", "foo_bar", false).score, 3.0);
        assert_close(search("fb", "foo-bar", false).score, 3.0);
        assert_close(search("fb", "foo bar", false).score, 3.0);
        assert_close(search("fb", "fooxbar", false).score, 5.0);
    }

    #[test]
    fn test_all_uppercase_haystack() {
        // capitals are not boundaries here: only position 0 counts
        let result = search("fb", "FOOBAR", false);
        assert_eq!(result.positions, [0, 3]);
        assert_close(result.score, 3.5);

        let result = search("fb", "FOO_BAR", false);
        assert_eq!(result.positions, [0, 4]);
        assert_close(result.score, 3.0);
    }

    #[test]
    fn test_unicode_match() {
        let result = search("H世", "Hello, 世界", true);
        assert_eq!(result.positions, [0, 7]);
        assert_eq!(search("é", "CAFÉ", false).positions, [3]);
    }

    #[test]
    fn test_idempotent() {
        let first = search("clsM", "clusterSendMessage", true);
        let second = search("clsM", "clusterSendMessage", true);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert_eq!(first.positions, second.positions);
    }

    #[test]
    fn test_match_quality_ordering() {
        let matcher = SurferMatcher::default();
        assert_order(&matcher, "fb", &["fooBar", "foo_bar", "fooxbar", "xxfoobar"]);
        assert_order(&matcher, "ab", &["ab", "a_b", "axb"]);
    }

    #[test]
    fn test_fuzzy_matcher_trait() {
        let matcher = SurferMatcher::default();
        assert_eq!(matcher.fuzzy_match("abc", ""), None);
        assert_eq!(matcher.fuzzy_match("abc", "abx"), None);
        assert_eq!(matcher.fuzzy_match_range("xxfoobar", "fb").map(|(_, b, e)| (b, e)), Some((2, 5)));
    }

    #[test]
    fn test_respect_case() {
        let matcher = SurferMatcher::default().respect_case();
        assert!(matcher.fuzzy_match("abc", "ABC").is_none());
        assert!(matcher.fuzzy_match("abc", "aBc").is_none());
        assert!(matcher.fuzzy_match("ABC", "ABC").is_some());
    }

    #[test]
    fn test_normalize() {
        let matcher = SurferMatcher::default().ignore_case();
        assert!(matcher.fuzzy_match("café", "cafe").is_none());

        let matcher = matcher.normalize(true);
        let (_, indices) = matcher.fuzzy_indices("café", "cafe").unwrap();
        assert_eq!(indices, [0, 1, 2, 3]);
        let (_, indices) = matcher.fuzzy_indices("Crème brûlée", "bru").unwrap();
        assert_eq!(indices, [6, 7, 8]);
    }

    #[test]
    fn test_fork_at() {
        let mut hypothesis = Hypothesis::default();
        hypothesis.consume(3, false, 's');
        hypothesis.consume(5, false, 'e');

        let fork = hypothesis.fork_at('e', 4, 10).unwrap();
        assert_eq!(fork.needle_idx(), 1);
        assert_eq!(fork.positions, [3]);
        assert_eq!(fork.consumed, ['s']);
        assert_eq!(fork.boundaries, [false]);

        // the whole needle must still fit in what is left of the haystack
        assert!(hypothesis.fork_at('s', 4, 3).is_none());
        assert!(hypothesis.fork_at('s', 4, 4).is_some());
        assert!(hypothesis.fork_at('x', 4, 10).is_none());
        // the original is left untouched
        assert_eq!(hypothesis.positions, [3, 5]);
    }

    #[test]
    fn test_matcher_limit() {
        let haystack = "a".repeat(40);
        let matcher = SurferMatcher::default();
        let (result, alive) = matcher.search_with_stats("aaa", &haystack);
        assert_eq!(result.positions, [0, 1, 2]);
        assert_close(result.score, 1.0 / 3.0);
        assert!(alive <= DEFAULT_MAX_MATCHERS);

        let matcher = SurferMatcher::default().max_matchers(NonZeroUsize::new(16));
        let (result, alive) = matcher.search_with_stats("aaa", &haystack);
        assert_eq!(result.positions, [0, 1, 2]);
        assert!(alive <= 16);
    }

    #[test]
    fn test_limit_below_need_changes_nothing_else() {
        let unbounded = SurferMatcher::default().max_matchers(None);
        let bounded = SurferMatcher::default();
        for (needle, haystack) in [
            ("send", "clusterSendMessage"),
            ("clsM", "clusterSendMessage"),
            ("fb", "foo_bar_fooBar"),
            ("abc", "aabbccabc"),
        ] {
            assert_eq!(unbounded.search(needle, haystack), bounded.search(needle, haystack));
        }
    }

    #[test]
    fn test_single_matcher_is_greedy() {
        // without forks only the leftmost alignment is ever tried
        let matcher = SurferMatcher::default().ignore_case().max_matchers(NonZeroUsize::new(1));
        let (result, alive) = matcher.search_with_stats("send", "clusterSendMessage");
        assert_eq!(alive, 1);
        assert_eq!(result.positions, [3, 5, 9, 10]);
    }
}
