//! OS page counters, the ground-truth source.

use memcmp_core::error::Result;
use memcmp_core::models::MemoryReading;
use tracing::{debug, warn};

/// Source name used in readings and reports.
pub const SOURCE_NAME: &str = "sysconf";

/// Physical page count and page size as reported by the operating system.
#[cfg_attr(test, mockall::automock)]
pub trait PageCounters {
    /// Number of physical memory pages.
    fn physical_pages(&self) -> Result<i64>;

    /// Bytes per page.
    fn page_size(&self) -> Result<i64>;
}

/// [`PageCounters`] backed by `sysconf(3)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysconfCounters;

#[cfg(unix)]
impl PageCounters for SysconfCounters {
    fn physical_pages(&self) -> Result<i64> {
        sysconf_value(libc::_SC_PHYS_PAGES, "_SC_PHYS_PAGES")
    }

    fn page_size(&self) -> Result<i64> {
        sysconf_value(libc::_SC_PAGESIZE, "_SC_PAGESIZE")
    }
}

#[cfg(not(unix))]
impl PageCounters for SysconfCounters {
    fn physical_pages(&self) -> Result<i64> {
        Err(memcmp_core::CompareError::Sysconf {
            name: "_SC_PHYS_PAGES",
            errno: 0,
        })
    }

    fn page_size(&self) -> Result<i64> {
        Err(memcmp_core::CompareError::Sysconf {
            name: "_SC_PAGESIZE",
            errno: 0,
        })
    }
}

#[cfg(unix)]
fn sysconf_value(key: libc::c_int, name: &'static str) -> Result<i64> {
    // SAFETY: sysconf only reads a configuration value for a valid key.
    let value = unsafe { libc::sysconf(key) };
    if value < 0 {
        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        return Err(memcmp_core::CompareError::Sysconf { name, errno });
    }
    Ok(i64::from(value))
}

/// Compute `pages × page_size`.
///
/// This reading is the comparison baseline. If either query fails the reading
/// degrades to not-found like any other source.
pub fn read_page_counters<C: PageCounters + ?Sized>(counters: &C) -> MemoryReading {
    let pages = counters.physical_pages();
    let page_size = counters.page_size();
    match (pages, page_size) {
        (Ok(pages), Ok(page_size)) => {
            let bytes = pages.saturating_mul(page_size);
            debug!(pages, page_size, bytes, "sysconf memory size");
            MemoryReading::found(SOURCE_NAME, bytes)
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "page counters unavailable");
            MemoryReading::not_found(SOURCE_NAME)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
