// crates/testsmith-server/src/lib.rs
// testsmith - unit test generation from code snippets with a local model

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod generator;
pub mod http;
pub mod llm;
pub mod postprocess;
pub mod prompt;
pub mod templates;
pub mod validation;
pub mod web;

pub use error::{Result, TestsmithError};
