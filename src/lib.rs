//! usage-spiral: daily device usage as a spiral chart and a draggable timeline.
//!
//! The crate turns a wide per-app/per-date usage export (plus an optional
//! per-date unlock export) into an ordered per-day dataset, and derives the
//! polar and vertical geometry both views draw from.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod format;
pub mod interaction;
pub mod render;
pub mod spiral;
pub mod telemetry;
pub mod timeline;

pub use api::{EngineConfig, UsageSpiralEngine};
pub use data::{DayRecord, UsageDataset};
pub use error::{SpiralError, SpiralResult};
