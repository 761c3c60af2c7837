use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::data::PipelineConfig;
use crate::error::{SpiralError, SpiralResult};
use crate::render::Color;
use crate::spiral::SpiralConfig;
use crate::timeline::TimelineConfig;

/// Colors the frame builders use on top of the usage palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewStyle {
    pub highlight_stroke_color: Color,
    pub highlight_stroke_width: f64,
    /// Alpha applied to the dots of days other than the hovered one.
    pub dimmed_dot_alpha: f64,
    pub timeline_axis_color: Color,
    pub timeline_dot_color: Color,
    pub timeline_highlight_color: Color,
    pub pan_arrow_color: Color,
}

impl Default for ViewStyle {
    fn default() -> Self {
        Self {
            highlight_stroke_color: Color::rgb(0.2, 0.2, 0.2),
            highlight_stroke_width: 2.0,
            dimmed_dot_alpha: 0.25,
            timeline_axis_color: Color::rgb(0.8, 0.8, 0.8),
            timeline_dot_color: Color::rgb(0.0, 0.651, 0.533),
            timeline_highlight_color: Color::rgb(0.2, 0.2, 0.2),
            pan_arrow_color: Color::rgb(0.2, 0.2, 0.2),
        }
    }
}

impl ViewStyle {
    pub fn validate(self) -> SpiralResult<Self> {
        for color in [
            self.highlight_stroke_color,
            self.timeline_axis_color,
            self.timeline_dot_color,
            self.timeline_highlight_color,
            self.pan_arrow_color,
        ] {
            color.validate()?;
        }
        if !self.highlight_stroke_width.is_finite() || self.highlight_stroke_width <= 0.0 {
            return Err(SpiralError::InvalidConfig(
                "highlight stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dimmed_dot_alpha) {
            return Err(SpiralError::InvalidConfig(
                "dimmed dot alpha must be in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub spiral_viewport: Viewport,
    pub timeline_viewport: Viewport,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub spiral: SpiralConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub style: ViewStyle,
}

impl EngineConfig {
    #[must_use]
    pub fn new(spiral_viewport: Viewport, timeline_viewport: Viewport) -> Self {
        Self {
            spiral_viewport,
            timeline_viewport,
            pipeline: PipelineConfig::default(),
            spiral: SpiralConfig::default(),
            timeline: TimelineConfig::default(),
            style: ViewStyle::default(),
        }
    }

    #[must_use]
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }

    #[must_use]
    pub fn with_spiral(mut self, spiral: SpiralConfig) -> Self {
        self.spiral = spiral;
        self
    }

    #[must_use]
    pub fn with_timeline(mut self, timeline: TimelineConfig) -> Self {
        self.timeline = timeline;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ViewStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> SpiralResult<()> {
        self.spiral_viewport.validate()?;
        self.timeline_viewport.validate()?;
        self.spiral.validate()?;
        self.timeline.validate()?;
        self.style.validate()?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> SpiralResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SpiralError::InvalidConfig(format!("failed to serialize engine config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> SpiralResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            SpiralError::InvalidConfig(format!("failed to parse engine config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}
