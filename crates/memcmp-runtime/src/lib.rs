//! Runtime layer for the memory size comparison tool.
//!
//! Runs the source readers once, in order, and reconciles their readings
//! against the page-counter ground truth.

pub mod orchestrator;
pub mod reconciler;

pub use memcmp_core as core;
pub use memcmp_data as data;
