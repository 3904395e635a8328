// crates/testsmith-server/src/postprocess/normalizer.rs
// Isolate the test-code block from a free-text model completion
//
// Best-effort two-pointer line scan, not a parser. Assumes the completion holds
// at most one contiguous code region; interleaved prose/code degrades but never fails.

use regex::Regex;
use std::sync::LazyLock;
use testsmith_types::Framework;
use tracing::debug;

use super::profile::{END_MARKERS, FrameworkProfile, profile, profile_by_name};

/// Opening or closing fence, with an optional language tag (c++, c#, objective-c)
#[allow(clippy::expect_used)]
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\w+#.-]*[ \t]*\r?\n?").expect("valid regex"));

/// Normalize a completion for a known framework
pub fn normalize(raw: &str, framework: Framework) -> String {
    normalize_with(raw, profile(framework))
}

/// Normalize by framework wire name; unknown names use only the universal end marker
pub fn normalize_named(raw: &str, framework: &str) -> String {
    normalize_with(raw, profile_by_name(framework))
}

/// Remove fence delimiters, keeping their contents, and trim
pub fn strip_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw, "").trim().to_string()
}

fn normalize_with(raw: &str, profile: Option<&FrameworkProfile>) -> String {
    let stripped = strip_fences(raw);
    let lines: Vec<&str> = stripped.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let last = lines.len() - 1;
    let start = find_start(&lines, profile);
    let mut end = find_end(&lines, profile);

    if start.is_none() || end.is_none() {
        debug!(
            framework = profile.map(|p| p.framework.as_str()).unwrap_or("unknown"),
            start_found = start.is_some(),
            end_found = end.is_some(),
            "Completion did not match all code markers, keeping defaults"
        );
    }

    let start = start.unwrap_or(0);
    // End landed above start (stray brace in leading prose): keep everything from start
    if end.is_some_and(|e| e < start) {
        end = None;
    }
    let end = end.unwrap_or(last);

    join_trimmed(&lines[start..=end])
}

/// Index of the first line carrying a start marker
fn find_start(lines: &[&str], profile: Option<&FrameworkProfile>) -> Option<usize> {
    let profile = profile?;
    lines
        .iter()
        .position(|line| profile.is_start_line(line.trim()))
}

/// Index of the last line carrying an end marker (or any closing brace)
fn find_end(lines: &[&str], profile: Option<&FrameworkProfile>) -> Option<usize> {
    lines.iter().rposition(|line| {
        let line = line.trim();
        let marked = match profile {
            Some(p) => p.end_marker_in(line).is_some(),
            None => END_MARKERS.iter().any(|m| line.contains(m)),
        };
        marked || line.contains('}')
    })
}

/// Join lines, dropping leading and trailing whitespace-only lines
fn join_trimmed(lines: &[&str]) -> String {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n").trim_end().to_string(),
        _ => String::new(),
    }
}
