//! Host tooling: the command-line surface over the resolver and matcher.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
