use crate::error::SpiralResult;
use crate::interaction::SegmentEmphasis;
use crate::render::{CirclePrimitive, Color, LinePrimitive, RenderFrame, Renderer};

use super::UsageSpiralEngine;

const ARROW_HALF_WIDTH: f64 = 8.0;
const ARROW_HEIGHT: f64 = 8.0;
const ARROW_EDGE_INSET: f64 = 9.0;
const ARROW_STROKE_WIDTH: f64 = 2.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;

impl<R: Renderer> UsageSpiralEngine<R> {
    /// Builds the timeline scene at the current pan offset.
    ///
    /// Content is shifted by the pan offset; the pan arrows stay fixed at the
    /// viewport edges and only appear while that direction has hidden content.
    pub fn build_timeline_frame(&self) -> SpiralResult<RenderFrame> {
        let viewport = self.config.timeline_viewport;
        let mut frame = RenderFrame::new(viewport);
        let style = self.config.style;
        let offset = self.timeline_geometry.pan_offset;
        let axis_x = f64::from(viewport.width) / 2.0;
        let dot_radius = self.timeline.config().dot_radius;

        let (axis_top, axis_bottom) = self.timeline.axis_extent();
        frame.lines.push(LinePrimitive::new(
            axis_x,
            axis_top + offset,
            axis_x,
            axis_bottom + offset,
            AXIS_STROKE_WIDTH,
            style.timeline_axis_color,
        ));

        for dot in self.timeline.dots() {
            let (color, radius) = match self.hover.emphasis_for(dot.day_index) {
                SegmentEmphasis::Highlighted => (style.timeline_highlight_color, dot_radius * 1.5),
                SegmentEmphasis::Normal | SegmentEmphasis::Dimmed => {
                    (style.timeline_dot_color, dot_radius)
                }
            };
            frame
                .circles
                .push(CirclePrimitive::new(axis_x, dot.y + offset, radius, color));
        }

        let affordance = self.timeline_geometry.affordance;
        if affordance.can_pan_up {
            let tip = ARROW_EDGE_INSET;
            push_chevron(&mut frame, axis_x, tip + ARROW_HEIGHT, tip, style.pan_arrow_color);
        }
        if affordance.can_pan_down {
            let tip = f64::from(viewport.height) - ARROW_EDGE_INSET;
            push_chevron(&mut frame, axis_x, tip - ARROW_HEIGHT, tip, style.pan_arrow_color);
        }

        Ok(frame)
    }
}

/// Two strokes from (`x ± half width`, `base_y`) meeting at (`x`, `tip_y`).
fn push_chevron(frame: &mut RenderFrame, x: f64, base_y: f64, tip_y: f64, color: Color) {
    for side in [-ARROW_HALF_WIDTH, ARROW_HALF_WIDTH] {
        frame.lines.push(LinePrimitive::new(
            x + side,
            base_y,
            x,
            tip_y,
            ARROW_STROKE_WIDTH,
            color,
        ));
    }
}
