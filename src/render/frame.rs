use crate::core::Viewport;
use crate::error::{SpiralError, SpiralResult};
use crate::render::{ArcPrimitive, CirclePrimitive, LinePrimitive};

/// Backend-agnostic scene for one draw pass of either view.
///
/// Primitives are drawn in field order: arcs, then lines, then circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub arcs: Vec<ArcPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            arcs: Vec::new(),
            lines: Vec::new(),
            circles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arc(mut self, arc: ArcPrimitive) -> Self {
        self.arcs.push(arc);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.circles.push(circle);
        self
    }

    pub fn validate(&self) -> SpiralResult<()> {
        if !self.viewport.is_valid() {
            return Err(SpiralError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for arc in &self.arcs {
            arc.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty() && self.lines.is_empty() && self.circles.is_empty()
    }
}
