use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{SpiralError, SpiralResult};

/// Calendar-day axis mapping dates linearly onto an output range.
///
/// Positions are computed from whole-day offsets, so every date lands on the
/// same position regardless of time-of-day concerns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateScale {
    start: NaiveDate,
    end: NaiveDate,
    linear: LinearScale,
}

impl DateScale {
    /// Creates a scale from `[start, end]` onto `[range_start, range_end]`.
    ///
    /// A single-day domain is widened by half a day on each side, which puts
    /// that day at the middle of the range.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        range_start: f64,
        range_end: f64,
    ) -> SpiralResult<Self> {
        if end < start {
            return Err(SpiralError::InvalidData(
                "date scale end must not precede start".to_owned(),
            ));
        }

        let span_days = (end - start).num_days() as f64;
        let (domain_start, domain_end) = if span_days == 0.0 {
            (-0.5, 0.5)
        } else {
            (0.0, span_days)
        };
        let linear = LinearScale::new(domain_start, domain_end, range_start, range_end)?;
        Ok(Self { start, end, linear })
    }

    #[must_use]
    pub fn domain(self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn position_for(self, date: NaiveDate) -> f64 {
        self.linear.map((date - self.start).num_days() as f64)
    }

    /// Nearest calendar date for an output position.
    #[must_use]
    pub fn date_for(self, position: f64) -> Option<NaiveDate> {
        let offset = self.linear.invert(position).round();
        if !offset.is_finite() {
            return None;
        }
        self.start
            .checked_add_signed(chrono::Duration::days(offset as i64))
    }
}
