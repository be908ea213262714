//! Rule-based part-of-speech tagging.
//!
//! [`LexiconAnnotator`] tags each word-boundary segment of a text by
//! consulting, in order:
//!
//! 1. the user lexicon, if one was loaded;
//! 2. numerals and punctuation (`Other`);
//! 3. closed-class word lists (`Other`);
//! 4. `-ly` adverbs (`Other`);
//! 5. the previous token: after a determiner the word is an adjective or a
//!    noun, after `to`, a modal or a subject pronoun it is a verb;
//! 6. seed lists of common verbs (with regular inflections) and adjectives;
//! 7. derivational suffixes;
//! 8. otherwise `Noun`.
//!
//! # User lexicon
//!
//! ```toml
//! [words]
//! rust = "noun"
//! refactor = "verb"
//! async = "adj"
//! ```
//!
//! Lookups are case-insensitive and win over every built-in rule.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

use blogstat_core::{Error, Result};

use crate::annotator::{Annotation, Annotator};
use crate::readability;
use crate::types::{AnnotatedToken, PosCategory};

// ============================================================================
// Word lists
// ============================================================================

fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its",
        "our", "their", "some", "any", "each", "every", "no", "all", "both", "either", "neither",
        "much", "many", "more", "most", "few", "several", "such", "what", "which", "whose",
        "another",
    ])
});

static CLOSED_CLASS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        // pronouns
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "mine", "yours", "hers", "ours", "theirs", "someone", "anyone", "everyone", "something",
        "anything", "everything", "nothing", "one",
        // prepositions
        "about", "above", "across", "after", "against", "along", "among", "around", "at",
        "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "down",
        "during", "except", "for", "from", "in", "inside", "into", "like", "near", "of", "off",
        "on", "onto", "out", "outside", "over", "past", "since", "through", "throughout", "till",
        "to", "toward", "towards", "under", "until", "up", "upon", "with", "within", "without",
        "via",
        // conjunctions
        "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "while",
        "whereas", "if", "unless", "whether", "than", "as", "when", "where", "why", "how",
        // auxiliaries and contractions
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "doing", "will", "would", "shall", "should", "can", "could", "may",
        "might", "must", "ought", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't",
        "weren't", "can't", "won't", "wouldn't", "shouldn't", "couldn't", "haven't", "hasn't",
        "hadn't", "i'm", "you're", "we're", "they're", "it's", "that's", "there's", "i've",
        "we've", "you've", "they've", "i'll", "you'll", "we'll", "they'll", "he's", "she's",
        "let's", "i'd", "you'd", "we'd", "they'd",
        // adverbs and particles
        "not", "very", "also", "just", "only", "even", "still", "already", "again", "never",
        "always", "often", "sometimes", "usually", "quite", "too", "here", "there", "now",
        "then", "soon", "today", "yesterday", "tomorrow", "perhaps", "maybe", "almost", "enough",
        "rather", "instead", "however", "therefore", "thus", "hence", "indeed", "else", "ever",
        "away", "back", "well", "yes", "oh",
    ])
});

static VERB_CONTEXT: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "to", "can", "could", "will", "would", "shall", "should", "may", "might", "must", "i",
        "you", "he", "she", "we", "they", "don't", "doesn't", "didn't", "can't", "won't",
        "wouldn't", "shouldn't", "couldn't", "let's", "i'll", "you'll", "we'll", "they'll",
    ])
});

static SEED_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "run", "jump", "swim", "write", "read", "make", "build", "use", "go", "get", "see",
        "know", "think", "take", "come", "want", "look", "find", "give", "tell", "call", "try",
        "ask", "need", "feel", "become", "leave", "put", "mean", "keep", "let", "begin", "seem",
        "show", "hear", "move", "live", "believe", "bring", "happen", "provide", "sit", "stand",
        "lose", "pay", "meet", "include", "continue", "learn", "lead", "understand", "watch",
        "follow", "stop", "create", "speak", "allow", "add", "spend", "grow", "walk", "win",
        "offer", "remember", "love", "consider", "appear", "buy", "wait", "serve", "send",
        "expect", "stay", "fall", "reach", "remain", "suggest", "raise", "sell", "require",
        "decide", "pull", "install", "deploy", "compile", "fix", "ship", "say", "explain",
        "describe", "discuss", "enjoy", "prefer", "avoid", "implement", "return", "happen",
        "change", "help", "start", "work", "play", "open", "close", "check", "share",
        // irregular past forms
        "said", "made", "went", "got", "saw", "knew", "thought", "took", "came", "found",
        "gave", "told", "felt", "left", "wrote", "ran", "built", "became", "began", "brought",
        "sat", "stood", "lost", "paid", "met", "led", "understood", "spoke", "grew", "won",
        "bought", "sent", "fell", "kept", "swam", "done", "gone", "seen", "known", "taken",
        "given", "written", "spoken",
    ])
});

static SEED_ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "good", "new", "first", "last", "long", "great", "little", "own", "other", "old",
        "right", "big", "high", "different", "small", "large", "next", "early", "young",
        "important", "public", "bad", "same", "able", "fast", "slow", "easy", "hard", "simple",
        "clear", "full", "free", "real", "best", "better", "sure", "whole", "true", "false",
        "hot", "cold", "happy", "nice", "short", "low", "late", "strong", "possible", "main",
        "quick", "safe", "ready", "quiet", "loud", "red", "blue", "green", "black", "white",
        "dark", "huge", "tiny", "modern", "common", "worse", "worst", "bigger", "smaller",
        "faster", "slower", "easier", "harder", "fine", "wrong", "busy", "open",
    ])
});

const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence"];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ical", "ish", "ic", "ary",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ing", "ed"];

/// Shortest word a suffix rule applies to.
const MIN_SUFFIX_WORD: usize = 5;

// ============================================================================
// User lexicon
// ============================================================================

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    words: BTreeMap<String, String>,
}

/// Word-to-category overrides supplied by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, PosCategory>,
}

impl Lexicon {
    /// An empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a lexicon from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or an unknown category.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| Error::config(format!("invalid lexicon: {e}")))?;
        let mut lexicon = Self::new();
        for (word, category) in file.words {
            let category = category
                .parse()
                .map_err(|e| Error::config(format!("lexicon entry '{word}': {e}")))?;
            lexicon.insert(&word, category);
        }
        Ok(lexicon)
    }

    /// Read a lexicon file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let lexicon = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        log::info!(
            "loaded {} lexicon entries from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, word: &str, category: PosCategory) {
        self.entries.insert(word.to_lowercase(), category);
    }

    /// Category for `word`, ignoring case.
    pub fn get(&self, word: &str) -> Option<PosCategory> {
        self.entries.get(&word.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// LexiconAnnotator
// ============================================================================

/// The built-in annotation engine.
#[derive(Clone, Debug, Default)]
pub struct LexiconAnnotator {
    lexicon: Lexicon,
}

impl LexiconAnnotator {
    /// Annotator using only the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotator whose rules are overridden by `lexicon`.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Annotator with the user lexicon at `path`, if given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::with_lexicon(Lexicon::load(path)?)),
            None => Ok(Self::new()),
        }
    }

    /// The user lexicon in effect.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Tag `text` without computing statistics.
    pub fn tag(&self, text: &str) -> Vec<AnnotatedToken> {
        let mut tokens = Vec::new();
        let mut prev: Option<String> = None;
        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            let key = lookup_key(segment);
            let category = self
                .lexicon
                .get(&key)
                .unwrap_or_else(|| builtin_category(segment, &key, prev.as_deref()));
            tokens.push(AnnotatedToken::new(segment, category));
            prev = Some(key);
        }
        tokens
    }
}

impl Annotator for LexiconAnnotator {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn ensure_ready(&self) -> Result<()> {
        let probe = [("they", None), ("run", Some("they")), ("the", None), ("big", Some("the"))];
        let expected = [
            PosCategory::Other,
            PosCategory::Verb,
            PosCategory::Other,
            PosCategory::Adj,
        ];
        for ((word, prev), want) in probe.into_iter().zip(expected) {
            let got = builtin_category(word, word, prev);
            if got != want {
                return Err(Error::engine(format!(
                    "lexicon self-check failed: '{word}' tagged {got}, expected {want}"
                )));
            }
        }
        log::debug!(
            "lexicon annotator ready ({} user entries)",
            self.lexicon.len()
        );
        Ok(())
    }

    fn annotate(&self, text: &str) -> Result<Annotation> {
        let tokens = self.tag(text);
        log::trace!("tagged {} tokens", tokens.len());
        Ok(Annotation {
            tokens,
            stats: readability::compute(text),
        })
    }
}

// ============================================================================
// Rules
// ============================================================================

fn lookup_key(segment: &str) -> String {
    segment.to_lowercase().replace('\u{2019}', "'")
}

fn builtin_category(segment: &str, key: &str, prev: Option<&str>) -> PosCategory {
    if !segment.chars().any(char::is_alphabetic) {
        return PosCategory::Other;
    }
    if DETERMINERS.contains(key) || CLOSED_CLASS.contains(key) {
        return PosCategory::Other;
    }
    if key.len() > 4 && key.ends_with("ly") && !SEED_ADJECTIVES.contains(key) {
        return PosCategory::Other;
    }

    if let Some(prev) = prev {
        if DETERMINERS.contains(prev) {
            return adjective_like(key).unwrap_or(PosCategory::Noun);
        }
        let lowercase = segment.chars().next().is_some_and(char::is_lowercase);
        if lowercase && VERB_CONTEXT.contains(prev) && adjective_like(key).is_none() {
            return PosCategory::Verb;
        }
    }

    if verb_stems(key).any(|stem| SEED_VERBS.contains(stem.as_str())) {
        return PosCategory::Verb;
    }
    if let Some(adj) = adjective_like(key) {
        return adj;
    }
    if key.chars().count() >= MIN_SUFFIX_WORD {
        if NOUN_SUFFIXES.iter().any(|s| key.ends_with(s)) {
            return PosCategory::Noun;
        }
        if VERB_SUFFIXES.iter().any(|s| key.ends_with(s)) {
            return PosCategory::Verb;
        }
    }
    PosCategory::Noun
}

fn adjective_like(key: &str) -> Option<PosCategory> {
    let suffixed = key.chars().count() >= MIN_SUFFIX_WORD
        && ADJECTIVE_SUFFIXES.iter().any(|s| key.ends_with(s))
        && !NOUN_SUFFIXES.iter().any(|s| key.ends_with(s));
    (SEED_ADJECTIVES.contains(key) || suffixed).then_some(PosCategory::Adj)
}

/// Candidate base forms for a possibly inflected verb.
fn verb_stems(key: &str) -> impl Iterator<Item = String> + '_ {
    let mut stems = vec![key.to_string()];
    if let Some(base) = key.strip_suffix("ies") {
        stems.push(format!("{base}y"));
    }
    if let Some(base) = key.strip_suffix("es") {
        stems.push(base.to_string());
    }
    if let Some(base) = key.strip_suffix('s') {
        stems.push(base.to_string());
    }
    for suffix in ["ing", "ed"] {
        if let Some(base) = key.strip_suffix(suffix) {
            stems.push(base.to_string());
            stems.push(format!("{base}e"));
            if let Some(undoubled) = undouble(base) {
                stems.push(undoubled);
            }
        }
    }
    if let Some(base) = key.strip_suffix('d') {
        stems.push(base.to_string());
    }
    stems.into_iter()
}

fn undouble(base: &str) -> Option<String> {
    let mut chars = base.chars().rev();
    let last = chars.next()?;
    (chars.next() == Some(last)).then(|| base[..base.len() - last.len_utf8()].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn tags(text: &str) -> Vec<(String, PosCategory)> {
        LexiconAnnotator::new()
            .tag(text)
            .into_iter()
            .map(|t| (t.surface_form, t.category))
            .collect()
    }

    fn category_of(text: &str, word: &str) -> PosCategory {
        tags(text)
            .into_iter()
            .find(|(w, _)| w == word)
            .map(|(_, c)| c)
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // Tagging rules
    // ------------------------------------------------------------------------

    #[test]
    fn test_simple_sentence() {
        let tagged = tags("The big dog runs quickly.");
        assert_eq!(
            tagged,
            vec![
                ("The".into(), PosCategory::Other),
                ("big".into(), PosCategory::Adj),
                ("dog".into(), PosCategory::Noun),
                ("runs".into(), PosCategory::Verb),
                ("quickly".into(), PosCategory::Other),
                (".".into(), PosCategory::Other),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(tags("  \n\t ").len(), 0);
        assert_eq!(tags("cat\n\ncat").len(), 2);
    }

    #[test]
    fn test_numerals_are_other() {
        assert_eq!(category_of("in 2021 we", "2021"), PosCategory::Other);
    }

    #[test]
    fn test_verb_after_context_words() {
        assert_eq!(category_of("I want to deploy", "deploy"), PosCategory::Verb);
        assert_eq!(category_of("we should refactor", "refactor"), PosCategory::Verb);
        assert_eq!(category_of("they blorp", "blorp"), PosCategory::Verb);
    }

    #[test]
    fn test_capitalized_word_after_to_is_not_verb() {
        assert_eq!(category_of("went to Paris", "Paris"), PosCategory::Noun);
    }

    #[test]
    fn test_noun_after_determiner() {
        assert_eq!(category_of("the run was long", "run"), PosCategory::Noun);
        assert_eq!(category_of("a beautiful day", "beautiful"), PosCategory::Adj);
    }

    #[test]
    fn test_inflected_seed_verbs() {
        assert_eq!(category_of("it was making noise", "making"), PosCategory::Verb);
        assert_eq!(category_of("he stopped", "stopped"), PosCategory::Verb);
        assert_eq!(category_of("swimming pools", "swimming"), PosCategory::Verb);
        assert_eq!(category_of("he tries", "tries"), PosCategory::Verb);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(category_of("X documentation", "documentation"), PosCategory::Noun);
        assert_eq!(category_of("X dangerous", "dangerous"), PosCategory::Adj);
        assert_eq!(category_of("X optimize", "optimize"), PosCategory::Verb);
    }

    #[test]
    fn test_default_is_noun() {
        assert_eq!(category_of("X kubernetes", "kubernetes"), PosCategory::Noun);
    }

    #[test]
    fn test_curly_apostrophe_contraction() {
        assert_eq!(category_of("don\u{2019}t", "don\u{2019}t"), PosCategory::Other);
    }

    // ------------------------------------------------------------------------
    // User lexicon
    // ------------------------------------------------------------------------

    #[test]
    fn test_user_lexicon_overrides_rules() {
        let lexicon = Lexicon::from_toml_str("[words]\nthe = \"noun\"\nRust = \"adj\"\n").unwrap();
        let annotator = LexiconAnnotator::with_lexicon(lexicon);
        let tagged = annotator.tag("the rust");
        assert_eq!(tagged[0].category, PosCategory::Noun);
        assert_eq!(tagged[1].category, PosCategory::Adj);
    }

    #[test]
    fn test_lexicon_rejects_unknown_category() {
        let err = Lexicon::from_toml_str("[words]\nfoo = \"adverb\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_lexicon_rejects_bad_toml() {
        assert!(Lexicon::from_toml_str("[words\n").is_err());
    }

    #[test]
    fn test_empty_lexicon_file() {
        assert!(Lexicon::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[words]\nblogstat = \"noun\"").unwrap();
        let annotator = LexiconAnnotator::load(Some(file.path())).unwrap();
        assert_eq!(annotator.lexicon().get("BLOGSTAT"), Some(PosCategory::Noun));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LexiconAnnotator::load(Some(Path::new("/nonexistent/lexicon.toml"))).unwrap_err();
        assert!(matches!(err, Error::IoWithPath { .. }));
    }

    // ------------------------------------------------------------------------
    // Annotator impl
    // ------------------------------------------------------------------------

    #[test]
    fn test_ensure_ready() {
        assert!(LexiconAnnotator::new().ensure_ready().is_ok());
    }

    #[test]
    fn test_annotate_includes_stats() {
        let annotation = LexiconAnnotator::new().annotate("Dogs bark. Cats sleep.").unwrap();
        assert_eq!(annotation.stats.counts.sentences, 2);
        assert_eq!(annotation.stats.counts.tokens, 4);
        assert_eq!(annotation.tokens.len(), 6);
    }
}
