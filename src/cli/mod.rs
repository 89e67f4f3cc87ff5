//! Command-line interface for forkjoin
//!
//! Thin front end over the library: every command loads the layered
//! configuration, builds a worker pool and runs one of the reductions.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
