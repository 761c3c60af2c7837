use serde::{Deserialize, Serialize};

use crate::error::{SpiralError, SpiralResult};

/// Continuous mapping from a numeric domain onto an output range.
///
/// The range may be inverted (`range_start > range_end`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> SpiralResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(SpiralError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(SpiralError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to the range. Values outside the domain extrapolate.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, output: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (output - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Discrete scale that splits `[domain_start, domain_end]` into equal-width
/// buckets, one per output value.
///
/// A value exactly on a bucket threshold belongs to the upper bucket; values
/// outside the domain clamp to the first or last bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizeScale<T> {
    domain_start: f64,
    domain_end: f64,
    outputs: Vec<T>,
}

impl<T> QuantizeScale<T> {
    pub fn new(domain_start: f64, domain_end: f64, outputs: Vec<T>) -> SpiralResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_end < domain_start {
            return Err(SpiralError::InvalidData(
                "quantize domain must be finite and ordered".to_owned(),
            ));
        }
        if outputs.is_empty() {
            return Err(SpiralError::InvalidData(
                "quantize scale needs at least one output".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            outputs,
        })
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.outputs.len()
    }

    /// Interior thresholds separating adjacent buckets, ascending.
    #[must_use]
    pub fn thresholds(&self) -> Vec<f64> {
        let buckets = self.outputs.len() as f64;
        (1..self.outputs.len())
            .map(|i| {
                self.domain_start + (self.domain_end - self.domain_start) * (i as f64) / buckets
            })
            .collect()
    }

    #[must_use]
    pub fn bucket_index(&self, value: f64) -> usize {
        if value.is_nan() {
            return 0;
        }
        self.thresholds()
            .iter()
            .take_while(|threshold| **threshold <= value)
            .count()
    }

    #[must_use]
    pub fn map(&self, value: f64) -> &T {
        &self.outputs[self.bucket_index(value)]
    }

    /// Domain extent covered by the bucket at `index`.
    #[must_use]
    pub fn invert_extent(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.outputs.len() {
            return None;
        }
        let thresholds = self.thresholds();
        let lower = if index == 0 {
            self.domain_start
        } else {
            thresholds[index - 1]
        };
        let upper = thresholds.get(index).copied().unwrap_or(self.domain_end);
        Some((lower, upper))
    }
}
