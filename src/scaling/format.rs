//! Human-readable magnitudes for parameter and token counts.

/// Format a count with a T/B/M suffix, or in scientific notation below a million.
pub fn format_count(value: f64) -> String {
    if value > 1e12 {
        format!("{:.1} T", value / 1e12)
    } else if value > 1e9 {
        format!("{:.1} B", value / 1e9)
    } else if value > 1e6 {
        format!("{:.1} M", value / 1e6)
    } else {
        format!("{value:.2e}")
    }
}

/// Format a FLOP count as `10^x`.
pub fn format_flops(flops: f64) -> String {
    format!("10^{:.1} FLOPs", flops.log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_suffixes() {
        assert_eq!(format_count(1.5e12 + 1.0), "1.5 T");
        assert_eq!(format_count(2.88e10), "28.8 B");
        assert_eq!(format_count(3.4e6), "3.4 M");
    }

    #[test]
    fn test_format_count_small_values_use_scientific() {
        assert_eq!(format_count(1234.0), "1.23e3");
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(format_count(1e9), "1000.0 M");
    }

    #[test]
    fn test_format_flops() {
        assert_eq!(format_flops(1e23), "10^23.0 FLOPs");
    }
}
