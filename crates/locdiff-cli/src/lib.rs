//! Locdiff CLI library
//!
//! Argument parsing, logging setup and the `diff`, `clean` and `blocks`
//! subcommands behind the `locdiff` binary.

pub mod cli;
pub mod commands;
pub mod output;
