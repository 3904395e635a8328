// crates/testsmith-server/src/templates/mod.rs
// Prompt template registry and built-in templates

mod builtin;
mod registry;

pub use registry::{TemplateRegistry, generic_template};
