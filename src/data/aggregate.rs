use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::data::RawTable;
use crate::data::date_key::resolve_date_columns;
use crate::data::record::AppUsage;

/// Column names of the wide usage export that never hold dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSchema {
    pub app_name_column: String,
    pub device_column: String,
    pub total_column: String,
}

impl Default for UsageSchema {
    fn default() -> Self {
        Self {
            app_name_column: "App name".to_owned(),
            device_column: "Device".to_owned(),
            total_column: "Total Usage (seconds)".to_owned(),
        }
    }
}

impl UsageSchema {
    #[must_use]
    pub fn excluded_columns(&self) -> Vec<String> {
        vec![
            self.app_name_column.clone(),
            self.device_column.clone(),
            self.total_column.clone(),
        ]
    }
}

/// Metadata columns of the unlock export; every other column is a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockSchema {
    pub metadata_columns: Vec<String>,
}

impl Default for UnlockSchema {
    fn default() -> Self {
        Self {
            metadata_columns: [
                "Device",
                "App name",
                "Total Usage (seconds)",
                "Total Unlocks",
                "Total",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

/// Per-date totals before chronological indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate {
    pub date_key: String,
    pub date: NaiveDate,
    pub total_usage_seconds: u64,
    /// Keyed by source row so duplicate-suffixed columns fold into one entry.
    pub apps: IndexMap<usize, AppUsage>,
    pub unlock_count: f64,
}

impl DayAggregate {
    #[must_use]
    pub fn new(date_key: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            date_key: date_key.into(),
            date,
            total_usage_seconds: 0,
            apps: IndexMap::new(),
            unlock_count: 0.0,
        }
    }

    /// Sums saturate at `u64::MAX` instead of overflowing.
    fn add_usage(&mut self, row: usize, app_name: &str, usage_seconds: u64) {
        self.total_usage_seconds = self.total_usage_seconds.saturating_add(usage_seconds);
        if usage_seconds == 0 {
            return;
        }
        self.apps
            .entry(row)
            .and_modify(|app| app.usage_seconds = app.usage_seconds.saturating_add(usage_seconds))
            .or_insert_with(|| AppUsage::new(app_name, usage_seconds));
    }
}

/// Folds the wide usage table into per-date aggregates keyed by normalized date.
///
/// Keys appear in first-encounter order (rows outer, columns inner).
#[must_use]
pub fn aggregate_usage(table: &RawTable, schema: &UsageSchema) -> IndexMap<String, DayAggregate> {
    let date_columns = resolve_date_columns(table.columns(), &schema.excluded_columns(), "usage");
    let app_column = table.column_index(&schema.app_name_column);
    let mut days: IndexMap<String, DayAggregate> = IndexMap::new();

    for row in 0..table.row_count() {
        let app_name = app_column.map_or("", |column| table.cell(row, column));
        for column in &date_columns {
            let usage_seconds = parse_usage_seconds(table.cell(row, column.index));
            days.entry(column.key.clone())
                .or_insert_with(|| DayAggregate::new(column.key.clone(), column.date))
                .add_usage(row, app_name, usage_seconds);
        }
    }

    debug!(
        rows = table.row_count(),
        date_columns = date_columns.len(),
        days = days.len(),
        "aggregated usage table"
    );
    days
}

/// Sums the unlock table per normalized date key.
#[must_use]
pub fn aggregate_unlocks(table: &RawTable, schema: &UnlockSchema) -> IndexMap<String, f64> {
    let date_columns = resolve_date_columns(table.columns(), &schema.metadata_columns, "unlocks");
    let mut unlocks: IndexMap<String, f64> = IndexMap::new();

    for row in 0..table.row_count() {
        for column in &date_columns {
            let count = parse_unlock_count(table.cell(row, column.index));
            *unlocks.entry(column.key.clone()).or_insert(0.0) += count;
        }
    }

    debug!(
        rows = table.row_count(),
        date_columns = date_columns.len(),
        days = unlocks.len(),
        "aggregated unlock table"
    );
    unlocks
}

/// Attaches unlock sums to each day; days without unlock data keep 0.
pub fn merge_unlocks(days: &mut IndexMap<String, DayAggregate>, unlocks: &IndexMap<String, f64>) {
    for (key, day) in days.iter_mut() {
        day.unlock_count = unlocks.get(key).copied().unwrap_or(0.0);
    }
}

/// Whole seconds from a usage cell. Empty or malformed cells count as 0.
#[must_use]
pub fn parse_usage_seconds(cell: &str) -> u64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(seconds) = trimmed.parse::<u64>() {
        return seconds;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.trunc() as u64,
        _ => {
            trace!(cell, "usage cell is not a non-negative number; counting as 0");
            0
        }
    }
}

/// Unlock count from a cell. Empty, malformed, negative or non-finite cells count as 0.
#[must_use]
pub fn parse_unlock_count(cell: &str) -> f64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            trace!(cell, "unlock cell is not a non-negative number; counting as 0");
            0.0
        }
    }
}
