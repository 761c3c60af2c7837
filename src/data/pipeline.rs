use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::aggregate::{
    UnlockSchema, UsageSchema, aggregate_unlocks, aggregate_usage, merge_unlocks,
};
use crate::data::indexer::{DateWindow, index_days};
use crate::data::record::UsageDataset;
use crate::data::table::RawTable;
use crate::error::SpiralResult;

/// Schema names and the optional date window used when building a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub usage_schema: UsageSchema,
    #[serde(default)]
    pub unlock_schema: UnlockSchema,
    #[serde(default)]
    pub window: DateWindow,
}

impl PipelineConfig {
    #[must_use]
    pub fn with_end_date_cutoff(mut self, cutoff: chrono::NaiveDate) -> Self {
        self.window.end_date_cutoff = Some(cutoff);
        self
    }

    #[must_use]
    pub fn with_start_date(mut self, start: chrono::NaiveDate) -> Self {
        self.window.start_date = Some(start);
        self
    }
}

/// Runs aggregation, unlock merge and chronological indexing.
///
/// The unlock table is optional; without it every day reports 0 unlocks.
pub fn build_dataset(
    usage: &RawTable,
    unlocks: Option<&RawTable>,
    config: &PipelineConfig,
) -> SpiralResult<UsageDataset> {
    let mut days = aggregate_usage(usage, &config.usage_schema);
    if let Some(unlock_table) = unlocks {
        let unlock_sums = aggregate_unlocks(unlock_table, &config.unlock_schema);
        merge_unlocks(&mut days, &unlock_sums);
    }

    let records = index_days(days.into_values(), config.window)?;
    let dataset = UsageDataset::from_records(records)?;
    debug!(
        days = dataset.len(),
        max_total_usage_seconds = dataset.max_total_usage_seconds(),
        "built usage dataset"
    );
    Ok(dataset)
}

/// Reads both CSV exports completely, then builds the dataset.
///
/// A failure reading either file is reported before any aggregation runs.
pub fn load_dataset(
    usage_path: impl AsRef<Path>,
    unlock_path: Option<&Path>,
    config: &PipelineConfig,
) -> SpiralResult<UsageDataset> {
    let usage = RawTable::from_csv_path(usage_path)?;
    let unlocks = unlock_path.map(RawTable::from_csv_path).transpose()?;
    build_dataset(&usage, unlocks.as_ref(), config)
}
