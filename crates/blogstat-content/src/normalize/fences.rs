//! Fenced code block removal.
//!
//! Works line by line over the raw body. An opening fence is a line made of
//! three backticks, optional horizontal whitespace and an optional lowercase
//! language tag. The block closes at the first later line that is exactly
//! three backticks; failing that, at the last later line that starts with
//! three backticks. Anything after the closing backticks on that line stays.

const FENCE: &str = "```";

/// A line of the input as a byte range, excluding its `\n`.
#[derive(Clone, Copy)]
struct Line {
    start: usize,
    end: usize,
}

fn lines(text: &str) -> Vec<Line> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            out.push(Line { start, end: i });
            start = i + 1;
        }
    }
    out.push(Line {
        start,
        end: text.len(),
    });
    out
}

fn is_opening(line: &str) -> bool {
    let Some(rest) = line.strip_prefix(FENCE) else {
        return false;
    };
    let tag = rest.trim_start_matches(|c: char| c.is_whitespace() && c != '\r' && c != '\n');
    tag.bytes().all(|b| b.is_ascii_lowercase())
}

fn closing_for(text: &str, lines: &[Line], open: usize) -> Option<usize> {
    let after = open + 1..lines.len();
    let slice = |l: &Line| &text[l.start..l.end];

    after
        .clone()
        .find(|&j| slice(&lines[j]) == FENCE)
        .or_else(|| after.rev().find(|&j| slice(&lines[j]).starts_with(FENCE)))
}

/// Remove fenced code blocks, leaving unterminated fences untouched.
pub fn strip_fenced_code(text: &str) -> String {
    if !text.contains(FENCE) {
        return text.to_string();
    }

    let lines = lines(text);
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if is_opening(&text[line.start..line.end]) {
            if let Some(close) = closing_for(text, &lines, i) {
                out.push_str(&text[copied..line.start]);
                copied = lines[close].start + FENCE.len();
                i = close + 1;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&text[copied..]);
    out
}
