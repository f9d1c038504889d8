//! Integration test suite for stack-filters
//!
//! End-to-end tests that drive the `stack-filters` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **apply**: Applying single filters to documents
//! - **config**: Configuration discovery and effect on filters
//! - **errors**: Error reporting and exit codes
//! - **render**: Rendering template files with variables documents

#[path = "../common/mod.rs"]
mod common;

mod apply;
mod config;
mod errors;
mod render;
