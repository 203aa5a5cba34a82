//! Cyno map CLI library.
//!
//! Command handlers and output formatting for the `cynomap-cli` binary.

pub mod commands;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
