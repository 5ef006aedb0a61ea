//! Convenience re-exports of commonly used types and traits.
pub use crate::error::SurferError;
pub use crate::fuzzy_matcher::FuzzyMatcher;
pub use crate::fuzzy_matcher::surfer::{DEFAULT_MAX_MATCHERS, SearchResult, SurferMatcher, search};
pub use crate::matcher::{MatchedItem, Matcher};
pub use crate::options::{SurferOptions, SurferOptionsBuilder};
pub use crate::reader::SurferItemReader;
pub use crate::CaseMatching;
