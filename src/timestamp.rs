/// Format seconds into an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Rounding policy:
/// - We round to the nearest millisecond first and only then split into fields, so a value
///   like `59.9996` carries into the next minute (`00:01:00,000`) instead of printing a
///   seconds field of `60`.
/// - Negative and non-finite inputs clamp to zero.
/// - Hours are zero-padded to two digits and simply widen past `99`.
pub fn format_time(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_time(0.0), "00:00:00,000");
    }

    #[test]
    fn formats_hours_minutes_seconds_and_millis() {
        assert_eq!(format_time(3661.5), "01:01:01,500");
        assert_eq!(format_time(1.234), "00:00:01,234");
        assert_eq!(format_time(61.2), "00:01:01,200");
    }

    #[test]
    fn rounding_carries_instead_of_printing_sixty_seconds() {
        assert_eq!(format_time(59.9996), "00:01:00,000");
        assert_eq!(format_time(3599.9999), "01:00:00,000");
        assert_ne!(format_time(59.9995), "00:00:60,000");
        assert!(!format_time(59.9995).contains(":60,"));
    }

    #[test]
    fn rounds_to_nearest_millisecond() {
        assert_eq!(format_time(0.0004), "00:00:00,000");
        assert_eq!(format_time(0.0006), "00:00:00,001");
    }

    #[test]
    fn hours_widen_past_two_digits() {
        assert_eq!(format_time(100.0 * 3600.0), "100:00:00,000");
    }

    #[test]
    fn negative_and_non_finite_clamp_to_zero() {
        assert_eq!(format_time(-3.0), "00:00:00,000");
        assert_eq!(format_time(f64::NAN), "00:00:00,000");
    }
}
