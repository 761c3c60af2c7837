use serde::{Deserialize, Serialize};

use crate::core::Margins;
use crate::error::{SpiralError, SpiralResult};
use crate::render::Color;

/// Five usage buckets, lightest for the least used days.
pub const DEFAULT_PALETTE: [&str; 5] = ["#cce5df", "#aee1d4", "#86d1c0", "#5cbea9", "#00a688"];

/// Layout and scatter tuning for the spiral view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralConfig {
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_inner_radius_start")]
    pub inner_radius_start: f64,
    /// Radial thickness of one day's segment.
    #[serde(default = "default_segment_thickness")]
    pub segment_thickness: f64,
    #[serde(default = "default_dots_per_day")]
    pub dots_per_day: usize,
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f64,
    #[serde(default = "default_reveal_delay_per_day_ms")]
    pub reveal_delay_per_day_ms: u64,
    #[serde(default = "default_reveal_duration_ms")]
    pub reveal_duration_ms: u64,
    /// `#rrggbb` colors from low to high usage; one bucket per entry.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Fixed seed for the scatter layer. `None` draws a fresh cloud per render.
    #[serde(default)]
    pub scatter_seed: Option<u64>,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            inner_radius_start: default_inner_radius_start(),
            segment_thickness: default_segment_thickness(),
            dots_per_day: default_dots_per_day(),
            dot_radius: default_dot_radius(),
            reveal_delay_per_day_ms: default_reveal_delay_per_day_ms(),
            reveal_duration_ms: default_reveal_duration_ms(),
            palette: default_palette(),
            scatter_seed: None,
        }
    }
}

impl SpiralConfig {
    #[must_use]
    pub fn with_scatter_seed(mut self, seed: u64) -> Self {
        self.scatter_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_dots_per_day(mut self, dots_per_day: usize) -> Self {
        self.dots_per_day = dots_per_day;
        self
    }

    #[must_use]
    pub fn with_reveal_duration_ms(mut self, reveal_duration_ms: u64) -> Self {
        self.reveal_duration_ms = reveal_duration_ms;
        self
    }

    pub fn validate(&self) -> SpiralResult<()> {
        self.margins.validate()?;
        if !self.inner_radius_start.is_finite() || self.inner_radius_start < 0.0 {
            return Err(SpiralError::InvalidConfig(
                "spiral inner radius must be finite and >= 0".to_owned(),
            ));
        }
        if !self.segment_thickness.is_finite() || self.segment_thickness <= 0.0 {
            return Err(SpiralError::InvalidConfig(
                "spiral segment thickness must be finite and > 0".to_owned(),
            ));
        }
        if !self.dot_radius.is_finite() || self.dot_radius <= 0.0 {
            return Err(SpiralError::InvalidConfig(
                "spiral dot radius must be finite and > 0".to_owned(),
            ));
        }
        self.palette_colors().map(|_| ())
    }

    /// Parsed palette, validated to be non-empty.
    pub fn palette_colors(&self) -> SpiralResult<Vec<Color>> {
        if self.palette.is_empty() {
            return Err(SpiralError::InvalidConfig(
                "spiral palette must have at least one color".to_owned(),
            ));
        }
        self.palette
            .iter()
            .map(|hex| Color::from_hex(hex))
            .collect()
    }
}

fn default_inner_radius_start() -> f64 {
    40.0
}

fn default_segment_thickness() -> f64 {
    25.0
}

fn default_dots_per_day() -> usize {
    100
}

fn default_dot_radius() -> f64 {
    3.0
}

fn default_reveal_delay_per_day_ms() -> u64 {
    50
}

fn default_reveal_duration_ms() -> u64 {
    500
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|hex| (*hex).to_owned()).collect()
}
