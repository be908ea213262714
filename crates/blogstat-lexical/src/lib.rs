//! Annotation engine and lexical aggregation for blogstat.
//!
//! # Modules
//!
//! - [`types`]: tokens, categories and rankings
//! - [`aggregate`]: top-K frequency rankings per category
//! - [`annotator`]: the [`Annotator`] trait
//! - [`lexicon`]: the built-in rule-based annotator
//! - [`readability`]: readability scores and counts
//! - [`engine`]: the process-wide [`Engine`]
//!
//! # Example
//!
//! ```rust
//! use blogstat_lexical::{Engine, EngineOptions, LexicalSummary};
//!
//! let engine = Engine::initialize(&EngineOptions::default()).unwrap();
//! let annotation = engine.annotate("We run. They run. The dog sleeps.").unwrap();
//! let summary = LexicalSummary::from_tokens(&annotation.tokens, 10);
//! assert_eq!(summary.verbs.terms().next(), Some("run"));
//! ```

#![doc = include_str!("../README.md")]

pub mod aggregate;
pub mod annotator;
pub mod engine;
pub mod lexicon;
pub mod readability;
pub mod types;

pub use aggregate::{DEFAULT_TOP_K, FrequencyCounter, LexicalSummary, top_by_category};
pub use annotator::{Annotation, Annotator};
pub use engine::{Engine, EngineOptions};
pub use lexicon::{Lexicon, LexiconAnnotator};
pub use readability::{DescriptiveStats, ReadabilityScores, TokenCounts};
pub use types::{AnnotatedToken, FrequencyRanking, PosCategory, TermCount};

#[cfg(any(test, feature = "test-utils"))]
pub use annotator::MockAnnotator;
