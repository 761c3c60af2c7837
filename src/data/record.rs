use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{SpiralError, SpiralResult};

/// Seconds one source row (app on a device) contributed to a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppUsage {
    pub name: String,
    pub usage_seconds: u64,
}

impl AppUsage {
    #[must_use]
    pub fn new(name: impl Into<String>, usage_seconds: u64) -> Self {
        Self {
            name: name.into(),
            usage_seconds,
        }
    }
}

/// One calendar day of aggregated usage, positioned in the dataset.
///
/// Records are only built by the pipeline and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    date_key: String,
    date: NaiveDate,
    total_usage_seconds: u64,
    apps: Vec<AppUsage>,
    unlock_count: f64,
    day_of_week: u8,
    day_index: usize,
    week_number: u32,
}

impl DayRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        date_key: String,
        date: NaiveDate,
        total_usage_seconds: u64,
        apps: Vec<AppUsage>,
        unlock_count: f64,
        day_of_week: u8,
        day_index: usize,
        week_number: u32,
    ) -> Self {
        Self {
            date_key,
            date,
            total_usage_seconds,
            apps,
            unlock_count,
            day_of_week,
            day_index,
            week_number,
        }
    }

    #[must_use]
    pub fn date_key(&self) -> &str {
        &self.date_key
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn total_usage_seconds(&self) -> u64 {
        self.total_usage_seconds
    }

    /// Contributing apps, most used first. Never contains zero-usage entries.
    #[must_use]
    pub fn apps(&self) -> &[AppUsage] {
        &self.apps
    }

    #[must_use]
    pub fn unlock_count(&self) -> f64 {
        self.unlock_count
    }

    /// 0 = Monday ... 6 = Sunday.
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    #[must_use]
    pub fn day_index(&self) -> usize {
        self.day_index
    }

    #[must_use]
    pub fn week_number(&self) -> u32 {
        self.week_number
    }
}

/// Chronologically ordered, non-empty sequence of day records.
///
/// `records()[i].day_index() == i` for every record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageDataset {
    records: Vec<DayRecord>,
}

impl UsageDataset {
    pub(crate) fn from_records(records: Vec<DayRecord>) -> SpiralResult<Self> {
        if records.is_empty() {
            return Err(SpiralError::EmptyDataset);
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; an empty pipeline result is reported as an error instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, day_index: usize) -> Option<&DayRecord> {
        self.records.get(day_index)
    }

    #[must_use]
    pub fn first(&self) -> &DayRecord {
        &self.records[0]
    }

    #[must_use]
    pub fn last(&self) -> &DayRecord {
        &self.records[self.records.len() - 1]
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.records.len() - 1
    }

    #[must_use]
    pub fn date_extent(&self) -> (NaiveDate, NaiveDate) {
        (self.first().date(), self.last().date())
    }

    #[must_use]
    pub fn max_total_usage_seconds(&self) -> u64 {
        self.records
            .iter()
            .map(DayRecord::total_usage_seconds)
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn find_by_date(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.records
            .binary_search_by_key(&date, DayRecord::date)
            .ok()
            .map(|index| &self.records[index])
    }

    pub fn to_json_pretty(&self) -> SpiralResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            SpiralError::InvalidData(format!("failed to serialize dataset: {err}"))
        })
    }
}

impl<'a> IntoIterator for &'a UsageDataset {
    type Item = &'a DayRecord;
    type IntoIter = std::slice::Iter<'a, DayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
