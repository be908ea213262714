//! Process-wide annotation engine.
//!
//! The engine is built once at startup, checked for readiness, and then
//! shared read-only by every pipeline run. A failure here is fatal: the
//! binary exits before serving any selection.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use blogstat_core::Result;

use crate::annotator::{Annotation, Annotator};
use crate::lexicon::LexiconAnnotator;

/// Settings used to build the [`Engine`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Optional user lexicon file.
    pub lexicon: Option<PathBuf>,
}

impl EngineOptions {
    pub fn with_lexicon(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon = Some(path.into());
        self
    }
}

/// Ready-to-use annotation engine.
#[derive(Clone)]
pub struct Engine {
    annotator: Arc<dyn Annotator>,
}

impl Engine {
    /// Build the built-in lexicon engine and verify it is ready.
    ///
    /// # Errors
    ///
    /// Fails when the user lexicon cannot be loaded or the readiness check
    /// does not pass.
    pub fn initialize(options: &EngineOptions) -> Result<Self> {
        let annotator = LexiconAnnotator::load(options.lexicon.as_deref())?;
        Self::with_annotator(Arc::new(annotator))
    }

    /// Wrap an existing annotator, running its readiness check.
    pub fn with_annotator(annotator: Arc<dyn Annotator>) -> Result<Self> {
        annotator.ensure_ready()?;
        log::info!("annotation engine '{}' initialized", annotator.name());
        Ok(Self { annotator })
    }

    /// Name of the underlying annotator.
    pub fn name(&self) -> &str {
        self.annotator.name()
    }

    /// Annotate `text`.
    pub fn annotate(&self, text: &str) -> Result<Annotation> {
        self.annotator.annotate(text)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("annotator", &self.annotator.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::MockAnnotator;
    use crate::types::{AnnotatedToken, PosCategory};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_initialize_default() {
        let engine = Engine::initialize(&EngineOptions::default()).unwrap();
        assert_eq!(engine.name(), "lexicon");
        let annotation = engine.annotate("Birds fly.").unwrap();
        assert_eq!(annotation.stats.counts.tokens, 2);
    }

    #[test]
    fn test_initialize_with_lexicon() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[words]\nfly = \"adj\"").unwrap();
        let engine = Engine::initialize(&EngineOptions::default().with_lexicon(file.path())).unwrap();
        let annotation = engine.annotate("Birds fly.").unwrap();
        assert_eq!(annotation.tokens[1].category, PosCategory::Adj);
    }

    #[test]
    fn test_initialize_missing_lexicon_fails() {
        let options = EngineOptions::default().with_lexicon("/nonexistent/words.toml");
        assert!(Engine::initialize(&options).is_err());
    }

    #[test]
    fn test_unready_annotator_fails() {
        let err = Engine::with_annotator(Arc::new(MockAnnotator::unready())).unwrap_err();
        assert!(err.is_engine_error());
    }

    #[test]
    fn test_clones_share_annotator() {
        let mock = MockAnnotator::new(vec![AnnotatedToken::new("x", PosCategory::Noun)]);
        let engine = Engine::with_annotator(Arc::new(mock.clone())).unwrap();
        let other = engine.clone();
        engine.annotate("a").unwrap();
        other.annotate("b").unwrap();
        assert_eq!(mock.calls(), 2);
        assert!(format!("{engine:?}").contains("mock"));
    }
}
