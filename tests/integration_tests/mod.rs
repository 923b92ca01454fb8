//! Integration tests module
//!
//! End-to-end tests for a single roster update run:
//! - Fetch both snapshots, plan and dispatch against a mock API
//! - Offline planning over saved snapshots
//! - Failure handling and abort ordering

pub mod fixtures;
pub mod pipeline_test;
