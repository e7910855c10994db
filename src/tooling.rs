//! Tooling Layer
//!
//! CLI surface over the viewer session: ingestion, tree display, caption
//! probing, and interactive selection.

pub mod cli;
pub mod render;

pub use cli::{Cli, CliContext, Commands};
