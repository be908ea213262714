//! Annotation engine abstraction.
//!
//! An [`Annotator`] turns cleaned text into part-of-speech tagged tokens and
//! descriptive statistics. The built-in implementation is
//! [`LexiconAnnotator`](crate::LexiconAnnotator); tests use
//! [`MockAnnotator`].

use serde::{Deserialize, Serialize};

use blogstat_core::Result;

use crate::readability::DescriptiveStats;
use crate::types::AnnotatedToken;

/// Output of one annotation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Tokens in document order.
    pub tokens: Vec<AnnotatedToken>,
    /// Readability scores and counts for the whole text.
    pub stats: DescriptiveStats,
}

/// A part-of-speech tagger plus readability calculator.
///
/// Implementations are read-only after construction and shared across
/// documents.
pub trait Annotator: Send + Sync {
    /// Short engine name, for logs and `version` output.
    fn name(&self) -> &str;

    /// Verify the engine can serve requests.
    ///
    /// Called once by [`Engine::initialize`](crate::Engine::initialize); an
    /// error here aborts startup.
    fn ensure_ready(&self) -> Result<()>;

    /// Annotate `text`.
    fn annotate(&self, text: &str) -> Result<Annotation>;
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockAnnotator;

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use blogstat_core::{Error, Result};

    use super::{Annotation, Annotator};
    use crate::readability;
    use crate::types::AnnotatedToken;

    /// Annotator returning canned tokens.
    ///
    /// Statistics are still computed from the input text, so reports built
    /// with the mock carry real counts.
    #[derive(Clone, Debug)]
    pub struct MockAnnotator {
        tokens: Vec<AnnotatedToken>,
        ready: bool,
        calls: Arc<AtomicUsize>,
    }

    impl MockAnnotator {
        /// Mock that returns `tokens` for every input.
        pub fn new(tokens: Vec<AnnotatedToken>) -> Self {
            Self {
                tokens,
                ready: true,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Mock whose readiness check fails.
        pub fn unready() -> Self {
            Self {
                ready: false,
                ..Self::new(Vec::new())
            }
        }

        /// Number of `annotate` calls so far, across clones.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Annotator for MockAnnotator {
        fn name(&self) -> &str {
            "mock"
        }

        fn ensure_ready(&self) -> Result<()> {
            if self.ready {
                Ok(())
            } else {
                Err(Error::engine("mock annotator is not ready"))
            }
        }

        fn annotate(&self, text: &str) -> Result<Annotation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Annotation {
                tokens: self.tokens.clone(),
                stats: readability::compute(text),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosCategory;

    #[test]
    fn test_mock_returns_canned_tokens() {
        let mock = MockAnnotator::new(vec![AnnotatedToken::new("cat", PosCategory::Noun)]);
        let annotation = mock.annotate("The cat sat.").unwrap();
        assert_eq!(annotation.tokens.len(), 1);
        assert_eq!(annotation.stats.counts.tokens, 3);
    }

    #[test]
    fn test_mock_counts_calls_across_clones() {
        let mock = MockAnnotator::new(Vec::new());
        let clone = mock.clone();
        mock.annotate("a").unwrap();
        clone.annotate("b").unwrap();
        assert_eq!(mock.calls(), 2);
    }

    #[test]
    fn test_unready_mock() {
        let mock = MockAnnotator::unready();
        let err = mock.ensure_ready().unwrap_err();
        assert!(err.is_engine_error());
        assert_eq!(mock.name(), "mock");
    }

    #[test]
    fn test_annotator_is_object_safe() {
        let boxed: Box<dyn Annotator> = Box::new(MockAnnotator::new(Vec::new()));
        assert!(boxed.ensure_ready().is_ok());
    }
}
