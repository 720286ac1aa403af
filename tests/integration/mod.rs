//! Integration tests for git2md
//!
//! These tests drive the full resolve → enumerate → render → write pipeline against
//! temporary folders and repositories, both through the library and the CLI binary.

pub mod cli;
pub mod common;
pub mod local;
pub mod remote;
