//! Frequency rankings over annotated tokens.
//!
//! Counting is case-sensitive on the surface form with no lemmatization.
//! Ties are broken by first occurrence in the filtered token stream, so the
//! same input always produces the same ranking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{AnnotatedToken, FrequencyRanking, PosCategory, TermCount};

/// Default number of entries kept per ranking.
pub const DEFAULT_TOP_K: usize = 10;

// ============================================================================
// FrequencyCounter
// ============================================================================

/// Counter that remembers the order in which terms were first seen.
#[derive(Debug, Default, Clone)]
pub struct FrequencyCounter {
    index: HashMap<String, usize>,
    entries: Vec<TermCount>,
}

impl FrequencyCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `term`.
    pub fn add(&mut self, term: &str) {
        match self.index.get(term) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(term.to_string(), self.entries.len());
                self.entries.push(TermCount {
                    term: term.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Occurrences of `term` seen so far.
    pub fn get(&self, term: &str) -> usize {
        self.index
            .get(term)
            .map_or(0, |&slot| self.entries[slot].count)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` most common terms.
    pub fn most_common(self, k: usize) -> FrequencyRanking {
        let mut entries = self.entries;
        // sort_by is stable: equal counts keep first-seen order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(k);
        FrequencyRanking::from_ordered(entries)
    }
}

impl<'a> FromIterator<&'a str> for FrequencyCounter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counter = Self::new();
        for term in iter {
            counter.add(term);
        }
        counter
    }
}

// ============================================================================
// Rankings
// ============================================================================

/// Rank the `k` most frequent surface forms of `category` in `tokens`.
///
/// # Example
///
/// ```
/// use blogstat_lexical::{AnnotatedToken, PosCategory, top_by_category};
///
/// let tokens: Vec<_> = ["run", "jump", "run", "jump", "swim"]
///     .into_iter()
///     .map(|w| AnnotatedToken::new(w, PosCategory::Verb))
///     .collect();
///
/// let top = top_by_category(&tokens, PosCategory::Verb, 2);
/// assert_eq!(top.pairs(), vec![("run", 2), ("jump", 2)]);
/// ```
pub fn top_by_category(
    tokens: &[AnnotatedToken],
    category: PosCategory,
    k: usize,
) -> FrequencyRanking {
    if k == 0 {
        return FrequencyRanking::default();
    }
    tokens
        .iter()
        .filter(|t| t.category == category)
        .map(|t| t.surface_form.as_str())
        .collect::<FrequencyCounter>()
        .most_common(k)
}

/// Noun, verb and adjective rankings for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalSummary {
    pub nouns: FrequencyRanking,
    pub verbs: FrequencyRanking,
    pub adjectives: FrequencyRanking,
}

impl LexicalSummary {
    /// Run [`top_by_category`] for each ranked category.
    pub fn from_tokens(tokens: &[AnnotatedToken], k: usize) -> Self {
        Self {
            nouns: top_by_category(tokens, PosCategory::Noun, k),
            verbs: top_by_category(tokens, PosCategory::Verb, k),
            adjectives: top_by_category(tokens, PosCategory::Adj, k),
        }
    }

    /// Ranking for one of the ranked categories; `None` for `Other`.
    pub fn get(&self, category: PosCategory) -> Option<&FrequencyRanking> {
        match category {
            PosCategory::Noun => Some(&self.nouns),
            PosCategory::Verb => Some(&self.verbs),
            PosCategory::Adj => Some(&self.adjectives),
            PosCategory::Other => None,
        }
    }
}
