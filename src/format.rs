//! Human-readable labels for tooltips and the color legend.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::QuantizeScale;
use crate::data::DayRecord;
use crate::render::Color;

/// Apps listed in a day's detail before the rest collapse into `has_more`.
pub const DEFAULT_DETAIL_APP_LIMIT: usize = 10;

/// Formats seconds as `"2 hours 5 minutes"`.
///
/// Seconds are only shown when there are no whole minutes. Units are plural
/// for values above one.
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(unit(minutes, "minute"));
    }
    if parts.is_empty() {
        parts.push(unit(seconds, "second"));
    }
    parts.join(" ")
}

fn unit(value: u64, name: &str) -> String {
    if value > 1 {
        format!("{value} {name}s")
    } else {
        format!("{value} {name}")
    }
}

/// Formats a date as `"2025-09-29, Monday"`.
#[must_use]
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d, %A").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppUsageLine {
    pub name: String,
    pub usage: String,
}

/// Tooltip content for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub day_index: usize,
    pub date_label: String,
    pub total_usage: String,
    pub unlocks: String,
    pub apps: Vec<AppUsageLine>,
    /// More apps were used than are listed in `apps`.
    pub has_more: bool,
}

impl DayDetail {
    #[must_use]
    pub fn from_record(day: &DayRecord, app_limit: usize) -> Self {
        let apps = day
            .apps()
            .iter()
            .take(app_limit)
            .map(|app| AppUsageLine {
                name: app.name.clone(),
                usage: format_duration(app.usage_seconds),
            })
            .collect();

        Self {
            day_index: day.day_index(),
            date_label: format_day_label(day.date()),
            total_usage: format_duration(day.total_usage_seconds()),
            unlocks: format!("{}", day.unlock_count()),
            apps,
            has_more: day.apps().len() > app_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: Color,
    pub lower_seconds: f64,
    pub upper_seconds: f64,
    pub label: String,
}

/// One entry per color bucket, low usage first.
#[must_use]
pub fn legend_entries(scale: &QuantizeScale<Color>) -> Vec<LegendEntry> {
    scale
        .outputs()
        .iter()
        .enumerate()
        .filter_map(|(index, color)| {
            let (lower, upper) = scale.invert_extent(index)?;
            let label = format!(
                "{} - {}",
                format_duration(round_seconds(lower)),
                format_duration(round_seconds(upper))
            );
            Some(LegendEntry {
                color: *color,
                lower_seconds: lower,
                upper_seconds: upper,
                label,
            })
        })
        .collect()
}

fn round_seconds(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_tooltip_wording() {
        assert_eq!(format_duration(0), "0 second");
        assert_eq!(format_duration(1), "1 second");
        assert_eq!(format_duration(45), "45 seconds");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(3_725), "1 hour 2 minutes");
        assert_eq!(format_duration(7_200), "2 hours");
    }

    #[test]
    fn day_label_includes_weekday() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 29).expect("date");
        assert_eq!(format_day_label(date), "2025-09-29, Monday");
    }
}
