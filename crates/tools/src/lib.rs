//! Shared plumbing for the generator command-line tools.

pub mod inputs;
pub mod logging;
pub mod report;
