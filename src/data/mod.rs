//! Ingestion pipeline: raw export tables to an indexed, per-day dataset.

pub mod aggregate;
pub mod date_key;
pub mod indexer;
pub mod pipeline;
pub mod record;
pub mod table;

pub use aggregate::{DayAggregate, UnlockSchema, UsageSchema};
pub use date_key::{day_of_week, normalize_date_key, parse_date_key};
pub use indexer::DateWindow;
pub use pipeline::{PipelineConfig, build_dataset, load_dataset};
pub use record::{AppUsage, DayRecord, UsageDataset};
pub use table::RawTable;
