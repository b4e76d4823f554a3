//! Source readers for the memory size comparison tool.
//!
//! Each reader samples one independent view of the installed memory size and
//! reduces it to a [`MemoryReading`](memcmp_core::MemoryReading): the root
//! locality group from `lgrpinfo`, the device tree from `prtconf`, and the
//! page counters from `sysconf`. External I/O sits behind the
//! [`SourceOpener`](source::SourceOpener) and
//! [`PageCounters`](counters::PageCounters) capabilities.

pub mod counters;
pub mod lgroup;
pub mod prtconf;
pub mod source;

pub use memcmp_core as core;
