//! Surfer is a fuzzy subsequence matcher for Rust.
//!
//! It scores how well a short query (the needle) matches a candidate string
//! (the haystack) as an in-order, possibly scattered subsequence, preferring
//! matches that start words, sit close together and occur early. Lower scores
//! are better. Surfer can be used as a library or, with the `cli` feature, as
//! a non-interactive filter reading candidates from stdin.
//!
//! # Examples
//!
//! ```
//! use surfer::prelude::*;
//!
//! let result = search("fb", "fooBar", false);
//! assert_eq!(result.positions, [0, 3]);
//!
//! let matcher = Matcher::builder().case(CaseMatching::Smart).build();
//! let ranked = matcher.rank("fb", &["xfxxb", "foo_bar", "nothing"]);
//! assert_eq!(ranked[0].text, "foo_bar");
//! assert_eq!(ranked.len(), 2);
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::error::SurferError;
pub use crate::fuzzy_matcher::surfer::{SearchResult, SurferMatcher, search};
pub use crate::matcher::{MatchedItem, Matcher};
pub use crate::options::{SurferOptions, SurferOptionsBuilder};
pub use crate::reader::SurferItemReader;

pub mod error;
pub mod fuzzy_matcher;
pub mod matcher;
pub mod options;
pub mod prelude;
pub mod reader;

//------------------------------------------------------------------------------
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "snake_case"))]
/// Case sensitivity mode for matching
pub enum CaseMatching {
    /// Case-sensitive matching for every character
    Respect,
    /// Case-insensitive matching
    Ignore,
    /// Smart case: uppercase characters of the query only match uppercase
    /// characters, lowercase ones match either case
    #[default]
    Smart,
}

impl CaseMatching {
    /// Maps the boolean `smart_case` flag to a mode: smart case when set,
    /// case-insensitive otherwise.
    pub fn from_smart_case(smart_case: bool) -> Self {
        if smart_case {
            CaseMatching::Smart
        } else {
            CaseMatching::Ignore
        }
    }
}
