use crate::models::ByteCount;

const BINARY_UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Format a byte count in the largest binary unit that keeps the value at or
/// above one, with two decimals.
///
/// # Examples
///
/// ```
/// use memcmp_core::formatting::format_binary_size;
///
/// assert_eq!(format_binary_size(17_179_869_184), "16.00 GiB");
/// assert_eq!(format_binary_size(1536), "1.50 KiB");
/// assert_eq!(format_binary_size(512), "512 B");
/// assert_eq!(format_binary_size(-1_048_576), "-1.00 MiB");
/// ```
pub fn format_binary_size(bytes: ByteCount) -> String {
    let negative = bytes < 0;
    let mut value = bytes.unsigned_abs() as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BINARY_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let body = if unit == 0 {
        format!("{} {}", bytes.unsigned_abs(), BINARY_UNITS[0])
    } else {
        format!("{:.2} {}", value, BINARY_UNITS[unit])
    };

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_binary_size ───────────────────────────────────────────────────

    #[test]
    fn test_format_binary_size_zero() {
        assert_eq!(format_binary_size(0), "0 B");
    }

    #[test]
    fn test_format_binary_size_fractional_gib() {
        assert_eq!(format_binary_size(17_072_495_001), "15.90 GiB");
    }

    #[test]
    fn test_format_binary_size_caps_at_tib() {
        let four_pib = 4 * 1024_i64.pow(5);
        assert_eq!(format_binary_size(four_pib), "4096.00 TiB");
    }

    #[test]
    fn test_format_binary_size_negative_delta() {
        assert_eq!(format_binary_size(-107_374_183), "-102.40 MiB");
    }
}
