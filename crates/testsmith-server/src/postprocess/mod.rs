// crates/testsmith-server/src/postprocess/mod.rs
// Completion post-processing: normalization and test counting

mod counter;
mod normalizer;
mod profile;

pub use counter::{count_tests, count_tests_named};
pub use normalizer::{normalize, normalize_named, strip_fences};
pub use profile::{END_MARKERS, FrameworkProfile, profile, profile_by_name};
