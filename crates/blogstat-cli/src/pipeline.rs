//! Per-post analysis: load, normalize, annotate, aggregate.
//!
//! Each call runs one full cycle with no state carried between posts beyond
//! the shared [`Engine`].

use serde::Serialize;
use std::path::{Path, PathBuf};

use blogstat_content::{Document, load_document, normalize};
use blogstat_core::{ConfigProvider, Result};
use blogstat_lexical::{DescriptiveStats, Engine, FrequencyRanking, LexicalSummary};

use crate::catalog::Catalog;
use crate::state::AppState;

/// Everything the display layer shows for one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostReport {
    pub path: PathBuf,
    pub title: String,
    pub stats: DescriptiveStats,
    pub nouns: FrequencyRanking,
    pub verbs: FrequencyRanking,
    pub adjectives: FrequencyRanking,
    pub cleaned_text: String,
}

/// Analyze an already-loaded document.
pub fn analyze_document(engine: &Engine, doc: &Document, k: usize) -> Result<PostReport> {
    let cleaned_text = normalize(&doc.raw_body);
    let annotation = engine.annotate(&cleaned_text)?;
    let LexicalSummary {
        nouns,
        verbs,
        adjectives,
    } = LexicalSummary::from_tokens(&annotation.tokens, k);

    log::debug!(
        "analyzed '{}': {} tokens, {} sentences",
        doc.title,
        annotation.stats.counts.tokens,
        annotation.stats.counts.sentences
    );

    Ok(PostReport {
        path: doc.path.clone(),
        title: doc.title.clone(),
        stats: annotation.stats,
        nouns,
        verbs,
        adjectives,
        cleaned_text,
    })
}

/// Load the post at `path` and analyze it.
///
/// # Errors
///
/// A load error if the post cannot be read or its frontmatter is malformed;
/// an engine error if annotation fails.
pub async fn analyze_post(engine: &Engine, path: &Path, k: usize) -> Result<PostReport> {
    let doc = load_document(path).await?;
    analyze_document(engine, &doc, k)
}

/// Resolve `selection` against the catalog and analyze it.
pub async fn analyze_selection<C: ConfigProvider>(
    state: &AppState<C>,
    catalog: &Catalog,
    selection: &str,
    k: usize,
) -> Result<PostReport> {
    let path = catalog.resolve(selection)?;
    analyze_post(state.engine(), &path, k).await
}
