//! Prose normalization for markdown post bodies.
//!
//! [`normalize`] turns a raw markdown body into plain text suitable for
//! linguistic annotation by running an ordered table of passes,
//! [`NORMALIZE_PASSES`]. The order matters: each pass relies on the markup
//! state left by the one before it.
//!
//! | # | pass                          | expects                                          |
//! |---|-------------------------------|--------------------------------------------------|
//! | 1 | `strip_fenced_code`           | raw body                                         |
//! | 2 | `strip_html_elements`         | no fenced code, so `<` in code is gone           |
//! | 3 | `strip_link_targets`          | no HTML, so attribute text cannot leak into `()` |
//! | 4 | `strip_urls`                  | link targets already gone, only bare URLs remain |
//! | 5 | `strip_markdown_punctuation`  | brackets still paired with their targets removed |
//!
//! Normalization is best effort and never fails. Newlines are preserved.
//!
//! # Example
//!
//! ```
//! use blogstat_content::normalize;
//!
//! let clean = normalize("Read [the docs](https://docs.rs) <em>now</em>!");
//! assert_eq!(clean, "Read the docs ");
//! ```

mod fences;
mod html;
mod inline;

pub use fences::strip_fenced_code;
pub use html::{decode_entities, strip_html_elements};
pub use inline::{strip_link_targets, strip_markdown_punctuation, strip_urls};

/// A single named text transformation in the normalization pipeline.
#[derive(Clone, Copy)]
pub struct Pass {
    /// Stable name, shown by tracing output.
    pub name: &'static str,
    /// The transformation.
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass").field("name", &self.name).finish()
    }
}

/// The normalization passes, in the order they must run.
pub const NORMALIZE_PASSES: &[Pass] = &[
    // Raw body in; fenced blocks out. Runs first so code cannot look like
    // HTML or links to later passes.
    Pass {
        name: "strip_fenced_code",
        apply: strip_fenced_code,
    },
    // Fences gone. Drops elements with their content.
    Pass {
        name: "strip_html_elements",
        apply: strip_html_elements,
    },
    // No HTML left. Removes `(...)`, collapsing `[text](url)` to `[text]`.
    Pass {
        name: "strip_link_targets",
        apply: strip_link_targets,
    },
    // Link targets gone. Removes the remaining bare URLs.
    Pass {
        name: "strip_urls",
        apply: strip_urls,
    },
    // Structured markup gone. Deletes the stray characters it left behind.
    Pass {
        name: "strip_markdown_punctuation",
        apply: strip_markdown_punctuation,
    },
];

/// Output of one pass, recorded by [`normalize_with_trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassTrace {
    /// Name of the pass.
    pub name: &'static str,
    /// Text after the pass ran.
    pub output: String,
}

/// Convert a raw markdown body into clean prose.
///
/// Total: any input, including malformed markup, yields a string.
pub fn normalize(raw_body: &str) -> String {
    NORMALIZE_PASSES
        .iter()
        .fold(raw_body.to_string(), |text, pass| run_pass(pass, &text))
}

/// Run the pipeline, keeping the intermediate text after every pass.
///
/// The last entry's output equals [`normalize`]'s result.
pub fn normalize_with_trace(raw_body: &str) -> Vec<PassTrace> {
    let mut traces = Vec::with_capacity(NORMALIZE_PASSES.len());
    let mut text = raw_body.to_string();
    for pass in NORMALIZE_PASSES {
        text = run_pass(pass, &text);
        traces.push(PassTrace {
            name: pass.name,
            output: text.clone(),
        });
    }
    traces
}

fn run_pass(pass: &Pass, text: &str) -> String {
    let out = (pass.apply)(text);
    log::trace!(
        "{}: {} -> {} bytes",
        pass.name,
        text.len(),
        out.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FORBIDDEN: &[char] = &['`', '[', ']', '!'];

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let input = "Just some prose.\nWith two lines, and commas.";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_newlines_not_converted() {
        let out = normalize("one\ntwo\n\nthree");
        assert_eq!(out, "one\ntwo\n\nthree");
    }

    #[test]
    fn test_reference_scenario() {
        let input = "See [docs](http://example.com) and `code` here. <b>bold</b> gone.";
        let out = normalize(input);

        for kept in ["See", "and", "here.", "gone."] {
            assert!(out.contains(kept), "missing {kept:?} in {out:?}");
        }
        assert!(!out.contains("http://example.com"));
        assert!(!out.contains("bold"));
        assert!(!out.contains(FORBIDDEN));
        // Deliberate: the passes delete `(...)` targets and the characters
        // `` ` [ ] ! ``, never the words between them. Link text ("docs") and
        // inline-code text ("code") are kept as prose.
        assert_eq!(out, "See docs and code here.  gone.");
    }

    #[test]
    fn test_named_entities_do_not_reach_annotation() {
        let out = normalize("Fast &mdash; really &hellip; &copy; 2021 &rsquo;s");
        assert_eq!(out, "Fast \u{2014} really \u{2026} \u{a9} 2021 \u{2019}s");
        assert!(!out.contains("mdash"));
    }

    #[test]
    fn test_fenced_block_content_removed() {
        let input = "Intro.\n```python\nsecret_identifier = 42\n```\nOutro.";
        let out = normalize(input);
        assert!(!out.contains("secret_identifier"));
        assert!(out.contains("Intro."));
        assert!(out.contains("Outro."));
    }

    #[test]
    fn test_html_inside_fence_does_not_open_element() {
        // If HTML ran first, the unclosed <div> would swallow the outro.
        let input = "Intro.\n```html\n<div class=\"x\">\n```\nOutro.";
        assert_eq!(normalize(input), "Intro.\n\nOutro.");
    }

    #[test]
    fn test_image_markup() {
        let out = normalize("Look: ![diagram](/img/arch.png) above.");
        assert_eq!(out, "Look: diagram above.");
    }

    #[test]
    fn test_exclamation_in_prose_is_removed() {
        assert_eq!(normalize("Ship it!"), "Ship it");
    }

    #[test]
    fn test_bare_url_removed() {
        let out = normalize("Docs live at https://docs.example.com/start for now.");
        assert_eq!(out, "Docs live at  for now.");
    }

    #[test]
    fn test_trace_matches_normalize() {
        let input = "A [b](http://c) `d` <i>e</i> f!";
        let traces = normalize_with_trace(input);
        let names: Vec<_> = traces.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "strip_fenced_code",
                "strip_html_elements",
                "strip_link_targets",
                "strip_urls",
                "strip_markdown_punctuation",
            ]
        );
        assert_eq!(traces.last().unwrap().output, normalize(input));
        assert_eq!(traces[1].output, "A [b](http://c) `d`  f!");
    }

    #[test]
    fn test_pass_debug_shows_name() {
        let dbg = format!("{:?}", NORMALIZE_PASSES[0]);
        assert!(dbg.contains("strip_fenced_code"));
    }

    fn markdown_fragment() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "the", "post", "Rust", "search", "fast.", "done,", "http://a.io/x",
            "https://b.dev/y?z=1", "[link]", "[docs](/docs)", "(aside)", "`code`", "wow!",
            "![img](/i.png)", "<b>bold</b>", "<br>", "&amp;", "a-b", "42",
        ])
        .prop_map(str::to_string)
    }

    fn markdown_doc() -> impl Strategy<Value = String> {
        prop::collection::vec(
            (markdown_fragment(), prop::sample::select(vec![" ", "\n"])),
            0..40,
        )
        .prop_map(|parts| {
            parts
                .into_iter()
                .map(|(word, sep)| format!("{word}{sep}"))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_output_has_no_markdown_punctuation(doc in markdown_doc()) {
            let out = normalize(&doc);
            prop_assert!(!out.contains(FORBIDDEN));
            prop_assert!(!out.contains("http"));
            prop_assert!(!out.contains("bold"));
        }

        #[test]
        fn prop_normalize_is_idempotent(doc in markdown_doc()) {
            let once = normalize(&doc);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_fenced_content_never_survives(
            before in "[a-z ]{0,20}",
            body in "[a-z_ =0-9]{1,30}",
            after in "[a-z ]{0,20}",
        ) {
            let doc = format!("{before}\n```rust\nFENCED{body}\n```\n{after}");
            let out = normalize(&doc);
            prop_assert!(!out.contains("FENCED"));
        }
    }
}
