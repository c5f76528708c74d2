//! Resource tree: filtering, traversal and content fingerprints
//!
//! Everything here reads through an explicit [`crate::fs::ResourceFs`] so the
//! same code runs against the disk and against in-memory trees.

pub mod filter;
pub mod hasher;
pub mod path;
pub mod walker;
