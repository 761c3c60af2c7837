use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::aggregate::DayAggregate;
use crate::data::date_key::day_of_week;
use crate::data::record::{AppUsage, DayRecord};
use crate::error::{SpiralError, SpiralResult};

/// Optional inclusive bounds applied after sorting and before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateWindow {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date_cutoff: Option<NaiveDate>,
}

impl DateWindow {
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date_cutoff.is_none_or(|end| date <= end)
    }
}

/// Orders aggregates chronologically and assigns positional indices.
///
/// The steps run in a fixed order: sort, window, empty check, then
/// `day_index` and `week_number`. Indices are only assigned to records that
/// survive the window, so they stay contiguous.
pub fn index_days(
    aggregates: impl IntoIterator<Item = DayAggregate>,
    window: DateWindow,
) -> SpiralResult<Vec<DayRecord>> {
    let mut days: Vec<DayAggregate> = aggregates.into_iter().collect();
    let aggregated = days.len();

    days.sort_by_key(|day| day.date);
    days.retain(|day| window.contains(day.date));

    let Some(first_date) = days.first().map(|day| day.date) else {
        warn!(aggregated, "no usable days remain after filtering");
        return Err(SpiralError::EmptyDataset);
    };

    let records: Vec<DayRecord> = days
        .into_iter()
        .enumerate()
        .map(|(day_index, day)| {
            let days_since_start = (day.date - first_date).num_days();
            let week_number = u32::try_from(days_since_start / 7).unwrap_or(u32::MAX);
            let apps = sorted_apps(day.apps.into_values());
            DayRecord::new(
                day.date_key,
                day.date,
                day.total_usage_seconds,
                apps,
                day.unlock_count,
                day_of_week(day.date),
                day_index,
                week_number,
            )
        })
        .collect();

    debug!(
        aggregated,
        indexed = records.len(),
        first = %first_date,
        "indexed days"
    );
    Ok(records)
}

/// Most used first; ties keep row encounter order.
fn sorted_apps(apps: impl IntoIterator<Item = AppUsage>) -> Vec<AppUsage> {
    let mut apps: Vec<AppUsage> = apps
        .into_iter()
        .filter(|app| app.usage_seconds > 0)
        .collect();
    apps.sort_by(|a, b| b.usage_seconds.cmp(&a.usage_seconds));
    apps
}
