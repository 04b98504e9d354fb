//! Countdown label formatting

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Remaining time under which the hero countdown switches to warning style
pub const WARNING_THRESHOLD_SECS: f64 = 1_800.0;

/// Terminal label once a countdown reaches zero
pub const RELEASING_NOW: &str = "Releasing now!";

/// Label for a featured event that was already past when rendered
pub const RELEASED: &str = "Released";

fn whole_seconds(remaining: f64) -> u64 {
    if remaining.is_finite() && remaining > 0.0 {
        remaining.floor() as u64
    } else {
        0
    }
}

/// `T-HH:MM:SS`; hours are not wrapped at 24
pub fn format_clock(remaining: f64) -> String {
    let total = whole_seconds(remaining);
    format!(
        "T-{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// `N days, HH hours` while at least one whole day remains, else the clock
pub fn format_earnings(remaining: f64) -> String {
    let total = whole_seconds(remaining);
    let days = total / 86_400;
    if days > 0 {
        format!("{} days, {:02} hours", days, (total % 86_400) / 3600)
    } else {
        format_clock(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "T-00:00:00");
        assert_eq!(format_clock(59.9), "T-00:00:59");
        assert_eq!(format_clock(3_723.0), "T-01:02:03");
        assert_eq!(format_clock(100.0 * 3600.0), "T-100:00:00");
        assert_eq!(format_clock(-5.0), "T-00:00:00");
    }

    #[test]
    fn test_format_earnings() {
        assert_eq!(format_earnings(2.0 * SECONDS_PER_DAY + 5.0 * 3600.0 + 30.0), "2 days, 05 hours");
        assert_eq!(format_earnings(SECONDS_PER_DAY), "1 days, 00 hours");
        assert_eq!(format_earnings(SECONDS_PER_DAY - 1.0), "T-23:59:59");
    }
}
