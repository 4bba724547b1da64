use chrono::TimeZone;

use crate::core::utilization::{NodeUtilization, Utilization};

/// Placeholder for values that do not exist for a job.
pub const MISSING: &str = "-";

const SECS_PER_DAY: u64 = 86_400;

/// Renders signed seconds as `[-]HH:MM:SS`, or `[-]D:HH:MM:SS` from one day up.
pub fn format_duration(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let total_secs = secs.unsigned_abs();
    let days = total_secs / SECS_PER_DAY;
    let hours = (total_secs % SECS_PER_DAY) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if days > 0 {
        format!("{sign}{days}:{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

pub fn format_optional_duration(secs: Option<i64>) -> String {
    secs.map(format_duration)
        .unwrap_or_else(|| MISSING.to_string())
}

/// ctime-style timestamp without the year, e.g. `Sat Oct 17 15:56:01`.
pub fn format_timestamp_in<Tz: TimeZone>(tz: &Tz, epoch: Option<i64>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    epoch
        .and_then(|secs| tz.timestamp_opt(secs, 0).single())
        .map(|time| time.format("%a %b %e %H:%M:%S").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn format_xfactor(xfactor: Option<f64>) -> String {
    xfactor
        .map(|value| format!("{value:.1}"))
        .unwrap_or_else(|| MISSING.to_string())
}

/// First `width` characters of a column value.
pub fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

pub fn format_utilization(utilization: Utilization) -> String {
    match utilization {
        Utilization::Percent(percent) => format!("{percent:.1}%"),
        Utilization::Undefined => "N/A".to_string(),
    }
}

pub fn format_node_usage(usage: &NodeUtilization) -> String {
    format!(
        "{} of {} nodes active      ({})",
        usage.active_nodes,
        usage.partition_nodes,
        format_utilization(usage.utilization)
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn durations_under_a_day() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(90), "00:01:30");
        assert_eq!(format_duration(86_399), "23:59:59");
    }

    #[test]
    fn durations_of_a_day_or_more_show_days() {
        assert_eq!(format_duration(90_000), "1:01:00:00");
        assert_eq!(format_duration(86_400), "1:00:00:00");
        assert_eq!(format_duration(12 * 86_400 + 61), "12:00:01:01");
    }

    #[test]
    fn negative_durations_carry_a_leading_minus() {
        assert_eq!(format_duration(-90), "-00:01:30");
        assert_eq!(format_duration(-90_000), "-1:01:00:00");
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(format_optional_duration(None), "-");
        assert_eq!(format_xfactor(None), "-");
        assert_eq!(format_timestamp_in(&Utc, None), "-");
    }

    #[test]
    fn timestamps_use_ctime_layout_without_year() {
        // 2026-10-17T15:56:01Z
        assert_eq!(
            format_timestamp_in(&Utc, Some(1_792_252_561)),
            "Sat Oct 17 15:56:01"
        );
        // 2026-03-05T08:00:00Z
        assert_eq!(
            format_timestamp_in(&Utc, Some(1_772_697_600)),
            "Thu Mar  5 08:00:00"
        );
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("gpu-long", 3), "gpu");
        assert_eq!(truncate("q", 2), "q");
        assert_eq!(truncate("", 2), "");
    }

    #[test]
    fn utilization_uses_one_decimal_or_sentinel() {
        assert_eq!(format_utilization(Utilization::Percent(30.0)), "30.0%");
        assert_eq!(format_utilization(Utilization::Percent(200.0 / 3.0)), "66.7%");
        assert_eq!(format_utilization(Utilization::Undefined), "N/A");
        assert_eq!(
            format_node_usage(&NodeUtilization::from_counts(3, 10)),
            "3 of 10 nodes active      (30.0%)"
        );
    }
}
