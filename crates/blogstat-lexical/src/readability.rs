//! Readability scores and descriptive counts.
//!
//! Words and sentences come from Unicode segmentation (UAX #29); syllables
//! are estimated from vowel groups. Scores whose denominator would be zero
//! are `None`, as is SMOG for documents shorter than 30 sentences.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Words longer than this many characters count as long words (LIX, RIX).
pub const LONG_WORD_CHARS: usize = 6;

/// Words with at least this many syllables count as polysyllables.
pub const POLYSYLLABLE_MIN: usize = 3;

/// SMOG is only defined over samples of this many sentences or more.
pub const SMOG_MIN_SENTENCES: usize = 30;

/// Readability formulas computed for one text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityScores {
    pub flesch_reading_ease: Option<f64>,
    pub flesch_kincaid_grade: Option<f64>,
    pub gunning_fog: Option<f64>,
    pub smog: Option<f64>,
    pub automated_readability_index: Option<f64>,
    pub coleman_liau_index: Option<f64>,
    pub lix: Option<f64>,
    pub rix: Option<f64>,
}

/// Raw counts the scores are derived from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub tokens: usize,
    pub unique_tokens: usize,
    /// `unique_tokens / tokens`; `None` for an empty text.
    pub proportion_unique: Option<f64>,
    /// Characters inside words.
    pub characters: usize,
    pub letters: usize,
    pub syllables: usize,
    pub sentences: usize,
    pub long_words: usize,
    pub polysyllables: usize,
}

/// Readability scores together with their counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub readability: ReadabilityScores,
    pub counts: TokenCounts,
}

/// Estimate the syllables in `word` by counting vowel groups.
///
/// A trailing silent `e` is dropped (but not in `-le`). Every word has at
/// least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut groups = 0;
    let mut in_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !in_vowel {
            groups += 1;
        }
        in_vowel = vowel;
    }
    if groups > 1 && lower.ends_with('e') && !lower.ends_with("le") {
        groups -= 1;
    }
    groups.max(1)
}

fn ratio(num: f64, den: usize) -> Option<f64> {
    (den > 0).then(|| num / den as f64)
}

/// Collect counts over `text`.
pub fn count(text: &str) -> TokenCounts {
    let mut counts = TokenCounts::default();
    let mut unique = HashSet::new();

    for word in text.unicode_words() {
        let chars = word.chars().count();
        let syllables = count_syllables(word);

        counts.tokens += 1;
        counts.characters += chars;
        counts.letters += word.chars().filter(|c| c.is_alphabetic()).count();
        counts.syllables += syllables;
        if chars > LONG_WORD_CHARS {
            counts.long_words += 1;
        }
        if syllables >= POLYSYLLABLE_MIN {
            counts.polysyllables += 1;
        }
        unique.insert(word.to_lowercase());
    }

    counts.unique_tokens = unique.len();
    counts.proportion_unique = ratio(counts.unique_tokens as f64, counts.tokens);
    counts.sentences = text.unicode_sentences().count();
    counts
}

/// Compute the readability formulas from `counts`.
pub fn scores(counts: &TokenCounts) -> ReadabilityScores {
    let words = counts.tokens;
    let sentences = counts.sentences;
    if words == 0 || sentences == 0 {
        return ReadabilityScores::default();
    }

    let wps = words as f64 / sentences as f64;
    let spw = counts.syllables as f64 / words as f64;
    let lpw = counts.letters as f64 / words as f64;
    let poly_share = counts.polysyllables as f64 / words as f64;
    let long_share = counts.long_words as f64 / words as f64;
    let sentences_per_100 = sentences as f64 / words as f64 * 100.0;

    let smog = (sentences >= SMOG_MIN_SENTENCES).then(|| {
        1.043 * (counts.polysyllables as f64 * 30.0 / sentences as f64).sqrt() + 3.1291
    });

    ReadabilityScores {
        flesch_reading_ease: Some(206.835 - 1.015 * wps - 84.6 * spw),
        flesch_kincaid_grade: Some(0.39 * wps + 11.8 * spw - 15.59),
        gunning_fog: Some(0.4 * (wps + 100.0 * poly_share)),
        smog,
        automated_readability_index: Some(4.71 * lpw + 0.5 * wps - 21.43),
        coleman_liau_index: Some(0.0588 * lpw * 100.0 - 0.296 * sentences_per_100 - 15.8),
        lix: Some(wps + 100.0 * long_share),
        rix: ratio(counts.long_words as f64, sentences),
    }
}

/// Counts and scores for `text`.
pub fn compute(text: &str) -> DescriptiveStats {
    let counts = count(text);
    DescriptiveStats {
        readability: scores(&counts),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("score should be defined");
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("Readability"), 5);
        assert_eq!(count_syllables("2021"), 1);
    }

    #[test]
    fn test_counts_simple_sentence() {
        let counts = count("The cat sat.");
        assert_eq!(counts.tokens, 3);
        assert_eq!(counts.unique_tokens, 3);
        assert_eq!(counts.characters, 9);
        assert_eq!(counts.letters, 9);
        assert_eq!(counts.syllables, 3);
        assert_eq!(counts.sentences, 1);
        assert_eq!(counts.long_words, 0);
        assert_eq!(counts.polysyllables, 0);
        approx(counts.proportion_unique, 1.0);
    }

    #[test]
    fn test_unique_is_case_insensitive() {
        let counts = count("Dog dog DOG.");
        assert_eq!(counts.tokens, 3);
        assert_eq!(counts.unique_tokens, 1);
    }

    #[test]
    fn test_scores_simple_sentence() {
        let stats = compute("The cat sat.");
        approx(stats.readability.flesch_reading_ease, 206.835 - 3.045 - 84.6);
        approx(stats.readability.flesch_kincaid_grade, 0.39 * 3.0 + 11.8 - 15.59);
        approx(stats.readability.gunning_fog, 1.2);
        approx(stats.readability.lix, 3.0);
        approx(stats.readability.rix, 0.0);
        assert_eq!(stats.readability.smog, None);
    }

    #[test]
    fn test_long_and_polysyllabic_words() {
        let counts = count("Readability matters.");
        assert_eq!(counts.long_words, 2);
        assert_eq!(counts.polysyllables, 1);
    }

    #[test]
    fn test_multiple_sentences() {
        let counts = count("One here. Two there! Three everywhere?");
        assert_eq!(counts.sentences, 3);
        assert_eq!(counts.tokens, 6);
    }

    #[test]
    fn test_empty_text_has_no_scores() {
        let stats = compute("");
        assert_eq!(stats.counts.tokens, 0);
        assert_eq!(stats.counts.proportion_unique, None);
        assert_eq!(stats.readability, ReadabilityScores::default());
    }

    #[test]
    fn test_smog_needs_thirty_sentences() {
        let text = "Complicated words appear. ".repeat(SMOG_MIN_SENTENCES);
        let stats = compute(&text);
        assert_eq!(stats.counts.sentences, SMOG_MIN_SENTENCES);
        assert!(stats.readability.smog.is_some());

        let short = "Complicated words appear. ".repeat(SMOG_MIN_SENTENCES - 1);
        assert!(compute(&short).readability.smog.is_none());
    }
}
