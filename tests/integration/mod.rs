//! Integration tests for the Lavender manifest generator

mod cli_commands;
mod filter_semantics;
mod manifest_determinism;
mod manifest_generation;
mod revision_failures;
mod test_utils;
