//! Project materialization
//!
//! Turns a parsed source file into a buildable project in its workspace
//! and drives the toolchain over it.

pub mod manifest;
mod materializer;
mod pipeline;

pub use materializer::{Materialized, Materializer, DEFAULT_SAMPLE_LIMIT};
pub use pipeline::Pipeline;
