// crates/testsmith-server/src/postprocess/counter.rs
// Heuristic test-case count: a proxy, not a guarantee

use testsmith_types::Framework;

use super::profile::{profile, profile_by_name};

/// Number of non-overlapping test-case markers for the framework
pub fn count_tests(code: &str, framework: Framework) -> usize {
    profile(framework).map_or(0, |p| p.count.find_iter(code).count())
}

/// Count by framework wire name; 0 for unrecognized names
pub fn count_tests_named(code: &str, framework: &str) -> usize {
    profile_by_name(framework).map_or(0, |p| p.count.find_iter(code).count())
}
