//! Core types for the memory size comparison tool.
//!
//! Holds the canonical byte-count model, the size-token parsers, number
//! formatting helpers, command-line settings and the shared error type.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod units;

pub use error::{CompareError, Result};
pub use models::{ByteCount, ComparisonReport, MemoryReading, SourceDelta, NOT_FOUND};
pub use units::{MegabyteParser, SizeParser, UnitParser};
