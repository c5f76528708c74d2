//! Lavender: resource manifest generation
//!
//! Scans a module's resource tree, fingerprints every selected file, resolves
//! the module's SCM revision and writes a `.properties` manifest that maps
//! resource paths to content fingerprints for cache-busting delivery.

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod module;
pub mod scm;
pub mod tree;
