//! Vertical timeline geometry and its pan state.
//!
//! Days are laid out on one axis, oldest at the bottom. When the content is
//! taller than the viewport it can be dragged; otherwise it is centered and
//! fixed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::DateScale;
use crate::data::UsageDataset;
use crate::error::{SpiralError, SpiralResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Space above the newest and below the oldest day.
    pub padding: f64,
    pub day_height: f64,
    pub dot_radius: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            padding: 30.0,
            day_height: 25.0,
            dot_radius: 5.0,
        }
    }
}

impl TimelineConfig {
    pub fn validate(self) -> SpiralResult<Self> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(SpiralError::InvalidConfig(
                "timeline padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.day_height.is_finite() || self.day_height <= 0.0 {
            return Err(SpiralError::InvalidConfig(
                "timeline day height must be finite and > 0".to_owned(),
            ));
        }
        if !self.dot_radius.is_finite() || self.dot_radius <= 0.0 {
            return Err(SpiralError::InvalidConfig(
                "timeline dot radius must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Allowed range of the content's vertical offset.
///
/// `min == max` means the content fits and panning is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanBounds {
    pub min: f64,
    pub max: f64,
}

impl PanBounds {
    #[must_use]
    pub fn is_pannable(self) -> bool {
        self.min < self.max
    }

    #[must_use]
    pub fn clamp(self, offset: f64) -> f64 {
        if offset.is_nan() {
            return self.max;
        }
        // `f64::clamp` panics on NaN or crossed bounds.
        offset.max(self.min).min(self.max)
    }
}

/// Pan bounds for content of `content_height` inside a `viewport_height` window.
///
/// Content that fits collapses to one offset that centers it. Taller content
/// may move between `-(content - viewport)` and `0`. A non-finite height on
/// either side is treated as fitting content at offset `0`.
#[must_use]
pub fn pan_bounds(viewport_height: f64, content_height: f64) -> PanBounds {
    if !viewport_height.is_finite() || !content_height.is_finite() {
        return PanBounds { min: 0.0, max: 0.0 };
    }
    if content_height <= viewport_height {
        let centered = (viewport_height - content_height) / 2.0;
        PanBounds {
            min: centered,
            max: centered,
        }
    } else {
        PanBounds {
            min: -(content_height - viewport_height),
            max: 0.0,
        }
    }
}

/// Which directions still have hidden content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanAffordance {
    pub can_pan_up: bool,
    pub can_pan_down: bool,
}

impl PanAffordance {
    #[must_use]
    pub fn from_offset(offset: f64, bounds: PanBounds) -> Self {
        Self {
            can_pan_up: offset < bounds.max,
            can_pan_down: offset > bounds.min,
        }
    }
}

/// Timeline positions for one dataset; independent of viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    config: TimelineConfig,
    content_height: f64,
    date_scale: DateScale,
    dots: Vec<TimelineDot>,
}

/// One day's dot on the timeline axis, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineDot {
    pub day_index: usize,
    pub date: NaiveDate,
    pub y: f64,
}

impl TimelineLayout {
    pub fn new(dataset: &UsageDataset, config: TimelineConfig) -> SpiralResult<Self> {
        let config = config.validate()?;
        let content_height = dataset.len() as f64 * config.day_height + 2.0 * config.padding;
        let (earliest, latest) = dataset.date_extent();
        let date_scale = DateScale::new(
            earliest,
            latest,
            content_height - config.padding,
            config.padding,
        )?;
        let dots = dataset
            .iter()
            .map(|day| TimelineDot {
                day_index: day.day_index(),
                date: day.date(),
                y: date_scale.position_for(day.date()),
            })
            .collect();

        Ok(Self {
            config,
            content_height,
            date_scale,
            dots,
        })
    }

    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Vertical position of `date` in content coordinates.
    #[must_use]
    pub fn timeline_position_for(&self, date: NaiveDate) -> f64 {
        self.date_scale.position_for(date)
    }

    /// Nearest date at a content-space position.
    #[must_use]
    pub fn date_at(&self, y: f64) -> Option<NaiveDate> {
        self.date_scale.date_for(y)
    }

    /// Top and bottom of the axis line, in content coordinates.
    #[must_use]
    pub fn axis_extent(&self) -> (f64, f64) {
        (self.config.padding, self.content_height - self.config.padding)
    }

    #[must_use]
    pub fn dots(&self) -> &[TimelineDot] {
        &self.dots
    }

    #[must_use]
    pub fn pan_bounds(&self, viewport_height: f64) -> PanBounds {
        pan_bounds(viewport_height, self.content_height)
    }

    /// Day whose dot is under a viewport-space point, given the current pan offset.
    #[must_use]
    pub fn hit_test(&self, viewport_y: f64, pan_offset: f64) -> Option<usize> {
        let content_y = viewport_y - pan_offset;
        self.dots
            .iter()
            .find(|dot| (dot.y - content_y).abs() <= self.config.dot_radius)
            .map(|dot| dot.day_index)
    }
}

/// Result of recomputing the timeline for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineGeometry {
    pub viewport_height: f64,
    pub bounds: PanBounds,
    pub pan_offset: f64,
    pub affordance: PanAffordance,
}

/// Pan offset of the timeline content, owned by whoever composes the views.
///
/// Every bound computation also clamps the offset, so the stored value
/// always lies inside the bounds of the last recompute.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineViewState {
    pan_offset: f64,
    #[serde(skip)]
    bounds: Option<PanBounds>,
}

impl TimelineViewState {
    #[must_use]
    pub fn pan_offset(self) -> f64 {
        self.pan_offset
    }

    /// Recomputes bounds for `viewport_height` and clamps the offset into them.
    pub fn recompute(
        &mut self,
        layout: &TimelineLayout,
        viewport_height: f64,
    ) -> SpiralResult<TimelineGeometry> {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return Err(SpiralError::InvalidData(
                "timeline viewport height must be finite and > 0".to_owned(),
            ));
        }

        let bounds = layout.pan_bounds(viewport_height);
        let before = self.pan_offset;
        self.pan_offset = bounds.clamp(self.pan_offset);
        self.bounds = Some(bounds);
        if before != self.pan_offset {
            trace!(before, after = self.pan_offset, "clamped timeline pan offset");
        }

        Ok(self.geometry(viewport_height, bounds))
    }

    /// Moves the content by `dy`, clamped to the last computed bounds.
    ///
    /// Has no effect before the first `recompute`.
    pub fn drag_by(&mut self, dy: f64) -> Option<PanAffordance> {
        let bounds = self.bounds?;
        if dy.is_finite() {
            self.pan_offset = bounds.clamp(self.pan_offset + dy);
        }
        Some(PanAffordance::from_offset(self.pan_offset, bounds))
    }

    #[must_use]
    pub fn affordance(self) -> PanAffordance {
        self.bounds
            .map(|bounds| PanAffordance::from_offset(self.pan_offset, bounds))
            .unwrap_or_default()
    }

    fn geometry(self, viewport_height: f64, bounds: PanBounds) -> TimelineGeometry {
        TimelineGeometry {
            viewport_height,
            bounds,
            pan_offset: self.pan_offset,
            affordance: PanAffordance::from_offset(self.pan_offset, bounds),
        }
    }
}
