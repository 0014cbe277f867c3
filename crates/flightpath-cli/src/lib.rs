//! Flightpath CLI library.
//!
//! Subcommand handlers and output formatting for the `flightpath` binary.

pub mod commands;
pub mod output;
