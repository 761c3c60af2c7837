//! Spiral view geometry.
//!
//! Each day is an annular sector: its weekday picks one seventh of the
//! circle (Monday at twelve o'clock, clockwise) and its `day_index` picks a
//! radius that grows linearly from the first day to the last, giving one
//! continuous outward spiral.

mod config;
mod scatter;

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::Rng;
use serde::Serialize;
use tracing::trace;

use crate::core::{LinearScale, Point, QuantizeScale, Viewport};
use crate::data::{DayRecord, UsageDataset};
use crate::error::{SpiralError, SpiralResult};
use crate::render::Color;

pub use config::{DEFAULT_PALETTE, SpiralConfig};
pub use scatter::{ScatterPoint, sample_annular_sector, scatter_rng};

pub const DAYS_PER_WEEK: u8 = 7;
/// Angular width of one weekday sector.
pub const DAY_ANGLE: f64 = TAU / DAYS_PER_WEEK as f64;
/// Rotation that puts Monday's sector start at the top.
pub const MONDAY_OFFSET: f64 = -FRAC_PI_2;

/// Half-open angular interval `[start_angle, end_angle)` in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngularSector {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl AngularSector {
    #[must_use]
    pub fn span(self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn mid_angle(self) -> f64 {
        self.start_angle + self.span() / 2.0
    }

    /// Whether `angle` (any winding) falls inside the sector.
    #[must_use]
    pub fn contains(self, angle: f64) -> bool {
        let offset = (angle - self.start_angle).rem_euclid(TAU);
        offset < self.span()
    }
}

/// Sector of the weekday `day_of_week` (0 = Monday). Values past 6 wrap.
#[must_use]
pub fn angular_sector_for_day_of_week(day_of_week: u8) -> AngularSector {
    let slot = f64::from(day_of_week % DAYS_PER_WEEK);
    AngularSector {
        start_angle: slot * DAY_ANGLE + MONDAY_OFFSET,
        end_angle: (slot + 1.0) * DAY_ANGLE + MONDAY_OFFSET,
    }
}

/// Hit region and nominal color of one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySegment {
    pub day_index: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub sector: AngularSector,
    pub color: Color,
}

impl DaySegment {
    /// Whether `point` (relative to the spiral center) lies inside this segment.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let radius = point.radius();
        radius >= self.inner_radius
            && radius < self.outer_radius
            && self.sector.contains(point.angle())
    }
}

/// Spiral geometry for one dataset in one viewport.
///
/// Rebuilt on every resize; the dataset itself is only read.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralLayout {
    viewport: Viewport,
    center: Point,
    outer_bound: f64,
    inner_radius_start: f64,
    segment_thickness: f64,
    dots_per_day: usize,
    reveal_delay_per_day_ms: u64,
    reveal_duration_ms: u64,
    radius_scale: Option<LinearScale>,
    color_scale: QuantizeScale<Color>,
    segments: Vec<DaySegment>,
}

impl SpiralLayout {
    pub fn new(
        dataset: &UsageDataset,
        viewport: Viewport,
        config: &SpiralConfig,
    ) -> SpiralResult<Self> {
        let viewport = viewport.validate()?;
        config.validate()?;

        let (inner_width, inner_height) = config.margins.inner_size(viewport);
        let outer_bound = inner_width.min(inner_height) / 2.0;
        let radius_end = outer_bound - config.segment_thickness;
        if radius_end < config.inner_radius_start {
            return Err(SpiralError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let last_index = dataset.last_index();
        let radius_scale = if last_index == 0 {
            None
        } else {
            Some(LinearScale::new(
                0.0,
                last_index as f64,
                config.inner_radius_start,
                radius_end,
            )?)
        };

        let color_scale = QuantizeScale::new(
            0.0,
            dataset.max_total_usage_seconds() as f64,
            config.palette_colors()?,
        )?;

        let mut layout = Self {
            viewport,
            center: viewport.center(),
            outer_bound,
            inner_radius_start: config.inner_radius_start,
            segment_thickness: config.segment_thickness,
            dots_per_day: config.dots_per_day,
            reveal_delay_per_day_ms: config.reveal_delay_per_day_ms,
            reveal_duration_ms: config.reveal_duration_ms,
            radius_scale,
            color_scale,
            segments: Vec::with_capacity(dataset.len()),
        };
        layout.segments = dataset.iter().map(|day| layout.day_segment(day)).collect();

        trace!(
            days = dataset.len(),
            outer_bound,
            radius_end,
            "built spiral layout"
        );
        Ok(layout)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Spiral origin in viewport pixels.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Half the smaller inner viewport dimension; no segment reaches past it.
    #[must_use]
    pub fn outer_bound(&self) -> f64 {
        self.outer_bound
    }

    #[must_use]
    pub fn segment_thickness(&self) -> f64 {
        self.segment_thickness
    }

    #[must_use]
    pub fn color_scale(&self) -> &QuantizeScale<Color> {
        &self.color_scale
    }

    #[must_use]
    pub fn segments(&self) -> &[DaySegment] {
        &self.segments
    }

    /// Inner radius of the segment for `day_index`.
    #[must_use]
    pub fn radius_for_day_index(&self, day_index: usize) -> f64 {
        self.radius_scale
            .map_or(self.inner_radius_start, |scale| scale.map(day_index as f64))
    }

    #[must_use]
    pub fn angular_sector_for_day_of_week(&self, day_of_week: u8) -> AngularSector {
        angular_sector_for_day_of_week(day_of_week)
    }

    #[must_use]
    pub fn color_for_usage(&self, total_usage_seconds: u64) -> Color {
        *self.color_scale.map(total_usage_seconds as f64)
    }

    #[must_use]
    pub fn day_segment(&self, day: &DayRecord) -> DaySegment {
        let inner_radius = self.radius_for_day_index(day.day_index());
        DaySegment {
            day_index: day.day_index(),
            inner_radius,
            outer_radius: inner_radius + self.segment_thickness,
            sector: angular_sector_for_day_of_week(day.day_of_week()),
            color: self.color_for_usage(day.total_usage_seconds()),
        }
    }

    /// Fill-layer dots for one day, uniformly distributed by area.
    pub fn scatter_points_for<R: Rng + ?Sized>(
        &self,
        day: &DayRecord,
        rng: &mut R,
    ) -> Vec<ScatterPoint> {
        let segment = self.day_segment(day);
        (0..self.dots_per_day)
            .map(|_| {
                let point = sample_annular_sector(
                    rng,
                    segment.inner_radius,
                    segment.outer_radius,
                    segment.sector,
                );
                ScatterPoint {
                    x: point.x,
                    y: point.y,
                    color: segment.color,
                    day_index: segment.day_index,
                }
            })
            .collect()
    }

    /// Fill-layer dots for every day, in day order.
    pub fn scatter_points<R: Rng + ?Sized>(
        &self,
        dataset: &UsageDataset,
        rng: &mut R,
    ) -> Vec<ScatterPoint> {
        dataset
            .iter()
            .flat_map(|day| self.scatter_points_for(day, rng))
            .collect()
    }

    /// Milliseconds before a day's dots start to fade in.
    #[must_use]
    pub fn reveal_delay_ms(&self, day_index: usize) -> u64 {
        (day_index as u64).saturating_mul(self.reveal_delay_per_day_ms)
    }

    #[must_use]
    pub fn reveal_duration_ms(&self) -> u64 {
        self.reveal_duration_ms
    }

    /// Opacity of a day's dots `elapsed_ms` after the reveal started.
    ///
    /// Stays at 0 until the day's delay has passed, then ramps linearly to 1
    /// over the reveal duration. A zero duration switches straight to 1.
    #[must_use]
    pub fn reveal_opacity(&self, day_index: usize, elapsed_ms: u64) -> f64 {
        let delay = self.reveal_delay_ms(day_index);
        if elapsed_ms < delay {
            return 0.0;
        }
        if self.reveal_duration_ms == 0 {
            return 1.0;
        }
        let progress = (elapsed_ms - delay) as f64 / self.reveal_duration_ms as f64;
        progress.min(1.0)
    }

    /// Day under a viewport pixel, if any.
    ///
    /// Where segments overlap the later day wins, matching draw order.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        let local = Point::new(x - self.center.x, y - self.center.y);
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.contains(local))
            .map(|segment| segment.day_index)
    }
}
