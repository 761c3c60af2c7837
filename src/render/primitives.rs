use serde::{Deserialize, Serialize};

use crate::error::{SpiralError, SpiralResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> SpiralResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SpiralError::InvalidData(format!(
                "color `{hex}` must be in #rrggbb form"
            )));
        }
        let channel = |offset: usize| -> SpiralResult<f64> {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|err| SpiralError::InvalidData(format!("color `{hex}`: {err}")))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> SpiralResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SpiralError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> SpiralResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(SpiralError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(SpiralError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Annular sector centered on (`cx`, `cy`).
///
/// Angles are in radians, screen orientation. `fill` is optional so hit
/// regions can be drawn as outlines only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPrimitive {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Option<Color>,
    pub stroke: Option<(Color, f64)>,
}

impl ArcPrimitive {
    pub fn validate(self) -> SpiralResult<()> {
        for value in [
            self.cx,
            self.cy,
            self.inner_radius,
            self.outer_radius,
            self.start_angle,
            self.end_angle,
        ] {
            if !value.is_finite() {
                return Err(SpiralError::InvalidData(
                    "arc geometry must be finite".to_owned(),
                ));
            }
        }
        if self.inner_radius < 0.0 || self.outer_radius < self.inner_radius {
            return Err(SpiralError::InvalidData(
                "arc radii must satisfy 0 <= inner <= outer".to_owned(),
            ));
        }
        if self.end_angle < self.start_angle {
            return Err(SpiralError::InvalidData(
                "arc end angle must not precede start angle".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some((color, width)) = self.stroke {
            if !width.is_finite() || width <= 0.0 {
                return Err(SpiralError::InvalidData(
                    "arc stroke width must be finite and > 0".to_owned(),
                ));
            }
            color.validate()?;
        }
        Ok(())
    }
}

/// Filled circle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            color,
        }
    }

    pub fn validate(self) -> SpiralResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(SpiralError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SpiralError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
