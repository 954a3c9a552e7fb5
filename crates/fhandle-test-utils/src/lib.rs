//! Shared test utilities for the fhandle workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::TestTree`], a temporary directory with setup and
//!   assertion helpers

pub mod tree;

pub use tree::TestTree;
