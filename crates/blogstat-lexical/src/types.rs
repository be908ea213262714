//! Token and ranking types shared by the annotator and the aggregator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use blogstat_core::Error;

// ============================================================================
// Part-of-speech categories
// ============================================================================

/// Coarse part-of-speech category assigned to a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosCategory {
    /// Common or proper noun.
    Noun,
    /// Main verb (auxiliaries are `Other`).
    Verb,
    /// Adjective.
    Adj,
    /// Everything else: function words, adverbs, numerals, punctuation.
    Other,
}

impl PosCategory {
    /// The categories that reports rank, in display order.
    pub const RANKED: [PosCategory; 3] = [PosCategory::Noun, PosCategory::Verb, PosCategory::Adj];

    /// Lowercase name, as used in lexicon files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adj => "adj",
            Self::Other => "other",
        }
    }

    /// Plural label for report headings.
    pub fn plural_label(&self) -> &'static str {
        match self {
            Self::Noun => "nouns",
            Self::Verb => "verbs",
            Self::Adj => "adjectives",
            Self::Other => "other tokens",
        }
    }
}

impl fmt::Display for PosCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PosCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noun" | "propn" => Ok(Self::Noun),
            "verb" => Ok(Self::Verb),
            "adj" | "adjective" => Ok(Self::Adj),
            "other" => Ok(Self::Other),
            other => Err(Error::invalid_data(format!(
                "unknown part-of-speech category '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A token as produced by the annotation engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Text exactly as it appears in the cleaned document.
    pub surface_form: String,
    /// Assigned category.
    pub category: PosCategory,
}

impl AnnotatedToken {
    /// Create a token.
    pub fn new(surface_form: impl Into<String>, category: PosCategory) -> Self {
        Self {
            surface_form: surface_form.into(),
            category,
        }
    }
}

// ============================================================================
// Rankings
// ============================================================================

/// One entry of a frequency ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    /// Surface form.
    pub term: String,
    /// Number of occurrences; always positive.
    pub count: usize,
}

/// Terms ordered by descending count, ties in first-occurrence order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyRanking {
    entries: Vec<TermCount>,
}

impl FrequencyRanking {
    /// Wrap already-ordered entries.
    pub(crate) fn from_ordered(entries: Vec<TermCount>) -> Self {
        Self { entries }
    }

    /// Ranked entries.
    pub fn entries(&self) -> &[TermCount] {
        &self.entries
    }

    /// Terms only, in rank order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.as_str())
    }

    /// `(term, count)` pairs, in rank order.
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.entries
            .iter()
            .map(|e| (e.term.as_str(), e.count))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
