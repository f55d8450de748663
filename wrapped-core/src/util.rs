//! Small display helpers.

use std::time::Duration;

/// Format a playback position as `m:ss`.
pub fn duration_to_mmss(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_to_mmss() {
        assert_eq!(duration_to_mmss(Duration::from_secs(0)), "0:00");
        assert_eq!(duration_to_mmss(Duration::from_secs(9)), "0:09");
        assert_eq!(duration_to_mmss(Duration::from_secs(61)), "1:01");
        assert_eq!(duration_to_mmss(Duration::from_secs(600)), "10:00");
    }
}
