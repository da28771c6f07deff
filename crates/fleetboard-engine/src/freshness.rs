/// Human-readable age of the last snapshot.
///
/// Elapsed time clamps at zero under clock skew; a negative duration is
/// never rendered. Zero-valued leading units are omitted (days, then
/// hours) while minutes and seconds always appear.
#[must_use]
pub fn elapsed_description(last_updated: u64, now: u64) -> String {
    let elapsed = now.saturating_sub(last_updated);
    let days = elapsed / 86_400;
    let hours = (elapsed % 86_400) / 3_600;
    let minutes = (elapsed % 3_600) / 60;
    let seconds = elapsed % 60;
    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{days} days "));
    }
    if hours > 0 {
        out.push_str(&format!("{hours} hours "));
    }
    out.push_str(&format!("{minutes} minutes {seconds} seconds ago"));
    out
}

#[must_use]
pub fn refreshed_banner(last_updated: u64, now: u64) -> String {
    format!("Data Last Refreshed: {}", elapsed_description(last_updated, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hour_one_minute_one_second_omits_days() {
        let now = 1_700_003_661;
        assert_eq!(
            elapsed_description(now - 3_661, now),
            "1 hours 1 minutes 1 seconds ago"
        );
    }

    #[test]
    fn fresh_snapshot_still_reports_minutes_and_seconds() {
        let now = 1_700_000_000;
        assert_eq!(elapsed_description(now, now), "0 minutes 0 seconds ago");
    }

    #[test]
    fn multi_day_age_includes_every_unit() {
        let now = 2_000_000_000;
        let elapsed = 2 * 86_400 + 3 * 3_600 + 4 * 60 + 5;
        assert_eq!(
            elapsed_description(now - elapsed, now),
            "2 days 3 hours 4 minutes 5 seconds ago"
        );
    }

    #[test]
    fn clock_skew_clamps_to_zero() {
        assert_eq!(
            elapsed_description(1_700_000_100, 1_700_000_000),
            "0 minutes 0 seconds ago"
        );
    }

    #[test]
    fn banner_carries_the_refresh_prefix() {
        let now = 1_700_000_090;
        assert_eq!(
            refreshed_banner(now - 90, now),
            "Data Last Refreshed: 1 minutes 30 seconds ago"
        );
    }
}
