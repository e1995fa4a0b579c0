//! Integration tests for advisory subscription resolution

mod cli_contracts;
mod properties;
mod scenarios;
mod support;
