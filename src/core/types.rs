use serde::{Deserialize, Serialize};

use crate::error::{SpiralError, SpiralResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> SpiralResult<Self> {
        if !self.is_valid() {
            return Err(SpiralError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Space reserved on each side of a viewport before laying out content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn validate(self) -> SpiralResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SpiralError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    /// Width and height left inside `viewport` after removing the margins.
    #[must_use]
    pub fn inner_size(self, viewport: Viewport) -> (f64, f64) {
        (
            f64::from(viewport.width) - self.left - self.right,
            f64::from(viewport.height) - self.top - self.bottom,
        )
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(40.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Cartesian point for a polar coordinate around the origin.
    ///
    /// Angles are in radians and follow screen orientation (y grows down),
    /// so increasing angles sweep clockwise.
    #[must_use]
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    #[must_use]
    pub fn radius(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}
