//! Terminal UI helpers
//!
//! Spinners are only drawn on an interactive stderr; otherwise every
//! helper degrades to nothing so piped output stays clean.

mod context;
mod progress;

pub use context::UiContext;
pub use progress::TaskSpinner;
