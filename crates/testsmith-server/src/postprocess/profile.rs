// crates/testsmith-server/src/postprocess/profile.rs
// Per-framework marker table: where test code starts, where it ends, how tests are declared

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use testsmith_types::Framework;

/// End-of-block markers, in preference order.
/// Statement terminator, closing brace, docstring quote, block comment closer.
pub const END_MARKERS: &[&str] = &["});", "}", "\"\"\"", "*/"];

/// Marker patterns for one framework
#[derive(Debug)]
pub struct FrameworkProfile {
    pub framework: Framework,
    /// First line matching this begins the retained block
    pub start: Regex,
    /// Last line containing one of these ends the retained block
    pub end_markers: &'static [&'static str],
    /// Each non-overlapping match is one declared test case
    pub count: Regex,
}

impl FrameworkProfile {
    #[allow(clippy::expect_used)]
    fn new(framework: Framework, start: &str, count: &str) -> Self {
        Self {
            framework,
            start: Regex::new(start).expect("valid regex"),
            end_markers: END_MARKERS,
            count: Regex::new(count).expect("valid regex"),
        }
    }

    pub fn is_start_line(&self, line: &str) -> bool {
        self.start.is_match(line)
    }

    /// The first end marker (in preference order) present on the line
    pub fn end_marker_in(&self, line: &str) -> Option<&'static str> {
        self.end_markers.iter().copied().find(|m| line.contains(m))
    }
}

static PROFILES: LazyLock<HashMap<Framework, FrameworkProfile>> = LazyLock::new(|| {
    // JS-like: describe/test/it calls (incl. .only/.each), or a module-level keyword
    const JS_START: &str =
        r"\b(?:describe|test|it)(?:\.\w+)*\s*\(|\b(?:import|const|function)\b";
    const MOCHA_START: &str = r"\b(?:describe|it)(?:\.\w+)*\s*\(|\b(?:import|const|function)\b";

    [
        FrameworkProfile::new(Framework::Jest, JS_START, r"\b(?:test|it)\s*\("),
        FrameworkProfile::new(Framework::Mocha, MOCHA_START, r"\bit\s*\("),
        FrameworkProfile::new(Framework::Vitest, JS_START, r"\b(?:test|it)\s*\("),
        FrameworkProfile::new(
            Framework::Pytest,
            r"\bdef test_|\bimport\b|\bclass Test",
            r"def test_\w+",
        ),
        FrameworkProfile::new(
            Framework::Junit,
            r"@Test|\bclass\b|\bimport\b|\bpublic\b",
            r"@Test",
        ),
        FrameworkProfile::new(
            Framework::Nunit,
            r"\[Test\]|\bclass\b|\busing\b|\bpublic\b",
            r"\[Test\]",
        ),
        FrameworkProfile::new(Framework::Gtest, r"\bTEST\(|#include|\bclass\b", r"TEST\("),
        FrameworkProfile::new(
            Framework::GoTest,
            r"\bfunc Test|\bpackage\b|\bimport\b",
            r"func Test\w+",
        ),
        FrameworkProfile::new(
            Framework::RustTest,
            r"#\[test\]|\bfn test_|\buse\b|\bmod\b",
            r"#\[test\]",
        ),
    ]
    .into_iter()
    .map(|p| (p.framework, p))
    .collect()
});

/// Marker profile for a framework
pub fn profile(framework: Framework) -> Option<&'static FrameworkProfile> {
    PROFILES.get(&framework)
}

/// Marker profile by wire name; `None` for unrecognized names
pub fn profile_by_name(name: &str) -> Option<&'static FrameworkProfile> {
    name.trim().parse::<Framework>().ok().and_then(profile)
}
