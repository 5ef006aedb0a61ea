//! Configuration options for surfer.
//!
//! This module provides the `SurferOptions` struct and builder for configuring
//! matching, input parsing and output formatting.

use derive_builder::Builder;

use crate::CaseMatching;
use crate::fuzzy_matcher::surfer::DEFAULT_MAX_MATCHERS;

/// surf - fuzzy filter in Rust
///
/// surf reads candidates from stdin and prints those matching the query,
/// best match first.
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(
    feature = "cli",
    command(name = "surf", args_override_self = true, verbatim_doc_comment, version, about)
)]
pub struct SurferOptions {
    //  --- Search ---
    /// Query to match the candidates against
    ///
    /// Without a query every candidate is printed, in input order.
    #[cfg_attr(feature = "cli", arg(short, long, help_heading = "Search"))]
    #[builder(setter(into, strip_option))]
    pub filter: Option<String>,

    /// Case sensitivity
    ///
    /// With `smart`, uppercase query characters only match uppercase
    /// characters while lowercase ones match either case.
    #[cfg_attr(
        feature = "cli",
        arg(long, default_value = "smart", value_enum, help_heading = "Search")
    )]
    pub case: CaseMatching,

    /// Maximum number of results to print
    #[cfg_attr(feature = "cli", arg(short = 'n', long, help_heading = "Search"))]
    #[builder(setter(into, strip_option))]
    pub max_results: Option<usize>,

    /// Maximum number of partial alignments explored per candidate
    ///
    /// Repetitive candidates can make the search explode; once the limit is
    /// reached no new alignment is started for that candidate.
    #[cfg_attr(
        feature = "cli",
        arg(long, default_value_t = DEFAULT_MAX_MATCHERS, help_heading = "Search")
    )]
    #[builder(setter(into))]
    pub max_matchers: usize,

    /// Strip diacritics before matching (`é` matches `e`)
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Search"))]
    pub normalize: bool,

    //  --- Input/Output ---
    /// Read input delimited by ASCII NUL characters
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Input/Output"))]
    pub read0: bool,

    /// Print output delimited by ASCII NUL characters
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Input/Output"))]
    pub print0: bool,

    /// Print the query as the first line
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Input/Output"))]
    pub print_query: bool,

    /// Print the score before each result, separated by a tab
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Input/Output"))]
    pub print_score: bool,

    /// Print the matched character positions after each result, separated by a tab
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Input/Output"))]
    pub print_positions: bool,
}

impl Default for SurferOptions {
    fn default() -> Self {
        Self {
            filter: None,
            case: CaseMatching::default(),
            max_results: None,
            max_matchers: DEFAULT_MAX_MATCHERS,
            normalize: false,
            read0: false,
            print0: false,
            print_query: false,
            print_score: false,
            print_positions: false,
        }
    }
}

impl SurferOptions {
    /// The query, empty when none was given
    pub fn query(&self) -> &str {
        self.filter.as_deref().unwrap_or_default()
    }

    /// Byte separating input records
    pub fn line_ending(&self) -> u8 {
        if self.read0 { b'\0' } else { b'\n' }
    }

    /// String terminating output records
    pub fn output_ending(&self) -> &'static str {
        if self.print0 { "\0" } else { "\n" }
    }
}
