/// Render a duration as `minutes:seconds`.
///
/// Minutes are not rolled over into hours and seconds are not zero-padded:
/// `125 → "2:5"`, `3661 → "61:1"`. Chat replies depend on this exact shape.
pub fn format_duration(total_secs: u64) -> String {
    format!("{}:{}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_and_unpadded_seconds() {
        assert_eq!(format_duration(125), "2:5");
    }

    #[test]
    fn under_a_minute() {
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(0), "0:0");
    }

    #[test]
    fn no_hour_rollover() {
        assert_eq!(format_duration(3661), "61:1");
    }
}
