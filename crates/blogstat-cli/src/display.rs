//! Rendering of reports, listings and normalization traces.
//!
//! Rendering produces strings; the caller decides where they go.

use serde_json::json;
use std::fmt::{self, Write as _};

use blogstat_content::PassTrace;
use blogstat_core::{Error, Result};
use blogstat_lexical::{FrequencyRanking, PosCategory, ReadabilityScores, TokenCounts};

use crate::catalog::ListingEntry;
use crate::config::{BlogstatConfig, OutputFormat};
use crate::pipeline::PostReport;

/// How reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub show_text: bool,
    /// Ranking size, used in section headings.
    pub top_k: usize,
}

impl ReportOptions {
    /// Options from the `display` and `analysis` config sections.
    pub fn from_config(config: &BlogstatConfig) -> Self {
        Self {
            format: config.display.format,
            show_text: config.display.show_text,
            top_k: config.analysis.top_k,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_config(&BlogstatConfig::default())
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Render one report.
pub fn render_report(report: &PostReport, options: &ReportOptions) -> Result<String> {
    match options.format {
        OutputFormat::Text => render_report_text(report, options),
        OutputFormat::Json => {
            let mut value =
                serde_json::to_value(report).map_err(|e| Error::serialization(e.to_string()))?;
            if !options.show_text {
                if let Some(obj) = value.as_object_mut() {
                    obj.remove("cleaned_text");
                }
            }
            to_pretty_json(&value)
        }
    }
}

/// Render a per-selection failure in place of its report.
pub fn render_error(selection: &str, error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("[{selection}] could not be analyzed: {error}\n"),
        OutputFormat::Json => {
            let value = json!({ "selection": selection, "error": error.to_string() });
            // a json! object of two strings always serializes
            serde_json::to_string_pretty(&value).unwrap_or_default() + "\n"
        }
    }
}

fn to_pretty_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .map_err(|e| Error::serialization(e.to_string()))
}

fn render_report_text(report: &PostReport, options: &ReportOptions) -> Result<String> {
    let mut out = String::new();
    write_report_text(&mut out, report, options)
        .map_err(|e| Error::operation(format!("rendering report: {e}")))?;
    Ok(out)
}

fn write_report_text(out: &mut String, report: &PostReport, options: &ReportOptions) -> fmt::Result {
    writeln!(out, "{}", report.title)?;
    writeln!(out, "{}", "=".repeat(report.title.chars().count().max(3)))?;
    writeln!(out, "{}\n", report.path.display())?;

    writeln!(out, "Readability stats (take these with a grain of salt)")?;
    write_readability(out, &report.stats.readability)?;
    writeln!(out)?;

    writeln!(out, "Token count stats")?;
    write_counts(out, &report.stats.counts)?;

    for category in PosCategory::RANKED {
        let ranking = match category {
            PosCategory::Noun => &report.nouns,
            PosCategory::Verb => &report.verbs,
            _ => &report.adjectives,
        };
        writeln!(
            out,
            "\n{} most common {}",
            options.top_k,
            category.plural_label()
        )?;
        writeln!(out, "  {}", join_terms(ranking))?;
    }

    if options.show_text {
        writeln!(out, "\nPost text\n")?;
        writeln!(out, "{}", report.cleaned_text)?;
    }
    Ok(())
}

/// Comma-joined terms, or a placeholder for an empty ranking.
pub fn join_terms(ranking: &FrequencyRanking) -> String {
    if ranking.is_empty() {
        "(none)".to_string()
    } else {
        ranking.terms().collect::<Vec<_>>().join(", ")
    }
}

fn score(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn write_readability(out: &mut String, scores: &ReadabilityScores) -> fmt::Result {
    let rows = [
        ("Flesch reading ease", scores.flesch_reading_ease),
        ("Flesch-Kincaid grade", scores.flesch_kincaid_grade),
        ("Gunning fog", scores.gunning_fog),
        ("SMOG", scores.smog),
        ("Automated readability index", scores.automated_readability_index),
        ("Coleman-Liau index", scores.coleman_liau_index),
        ("LIX", scores.lix),
        ("RIX", scores.rix),
    ];
    for (label, value) in rows {
        writeln!(out, "  {label:<28} {:>8}", score(value))?;
    }
    Ok(())
}

fn write_counts(out: &mut String, counts: &TokenCounts) -> fmt::Result {
    let rows = [
        ("tokens", counts.tokens.to_string()),
        ("unique tokens", counts.unique_tokens.to_string()),
        ("proportion unique", score(counts.proportion_unique)),
        ("characters", counts.characters.to_string()),
        ("letters", counts.letters.to_string()),
        ("syllables", counts.syllables.to_string()),
        ("sentences", counts.sentences.to_string()),
        ("long words", counts.long_words.to_string()),
        ("polysyllabic words", counts.polysyllables.to_string()),
    ];
    for (label, value) in rows {
        writeln!(out, "  {label:<28} {value:>8}")?;
    }
    Ok(())
}

// ============================================================================
// Listings and traces
// ============================================================================

/// Numbered post list; unloadable posts show their error instead of a title.
pub fn render_listing(entries: &[ListingEntry]) -> String {
    if entries.is_empty() {
        return "No posts found.\n".to_string();
    }
    let width = entries.len().to_string().len();
    entries
        .iter()
        .map(|entry| {
            let label = match &entry.title {
                Ok(title) => title.clone(),
                Err(e) => format!("<{e}>"),
            };
            format!(
                "{:>width$}. {}  ({})\n",
                entry.number,
                label,
                entry.relative_path.display()
            )
        })
        .collect()
}

/// The text after each normalization pass.
pub fn render_trace(traces: &[PassTrace]) -> String {
    traces
        .iter()
        .enumerate()
        .map(|(i, trace)| format!("--- {}. {} ---\n{}\n", i + 1, trace.name, trace.output))
        .collect()
}
