/// Formats seconds as an SRT timecode `HH:MM:SS,mmm`.
///
/// Every field is floored, so `1.9999` renders as `00:00:01,999`. Hours are
/// at least two digits and grow as needed. Negative input renders as zero.
pub fn format_timecode(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let millis = ((seconds % 1.0) * 1000.0).floor() as u64;
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, "00:00:00,000")]
    #[case::hour_minute_second(3725.125, "01:02:05,125")]
    #[case::sub_second(0.5, "00:00:00,500")]
    #[case::minute_boundary(60.0, "00:01:00,000")]
    #[case::just_under_hour(3599.75, "00:59:59,750")]
    #[case::wide_hours(360_000.0, "100:00:00,000")]
    fn test_format_timecode(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_timecode(seconds), expected);
    }

    #[test]
    fn test_millis_are_floored() {
        // 1.9999 % 1 * 1000 = 999.9 -> 999
        assert_eq!(format_timecode(1.9999), "00:00:01,999");
    }

    #[test]
    fn test_negative_clamped() {
        assert_eq!(format_timecode(-2.0), "00:00:00,000");
    }

    #[test]
    fn test_nan_clamped() {
        assert_eq!(format_timecode(f64::NAN), "00:00:00,000");
    }
}
