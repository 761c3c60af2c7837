use crate::error::SpiralResult;
use crate::interaction::SegmentEmphasis;
use crate::render::{ArcPrimitive, CirclePrimitive, RenderFrame, Renderer};

use super::UsageSpiralEngine;

impl<R: Renderer> UsageSpiralEngine<R> {
    /// Builds the spiral scene: one hit-region arc per day, then the dot layer.
    ///
    /// Arcs are outline-only and stroked only for the hovered day. Dots of
    /// other days are faded while a day is hovered.
    pub fn build_spiral_frame(&self) -> SpiralResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.spiral.viewport());
        let center = self.spiral.center();
        let style = self.config.style;

        for segment in self.spiral.segments() {
            let stroke = match self.hover.emphasis_for(segment.day_index) {
                SegmentEmphasis::Highlighted => {
                    Some((style.highlight_stroke_color, style.highlight_stroke_width))
                }
                SegmentEmphasis::Normal | SegmentEmphasis::Dimmed => None,
            };
            frame.arcs.push(ArcPrimitive {
                cx: center.x,
                cy: center.y,
                inner_radius: segment.inner_radius,
                outer_radius: segment.outer_radius,
                start_angle: segment.sector.start_angle,
                end_angle: segment.sector.end_angle,
                fill: None,
                stroke,
            });
        }

        let dot_radius = self.config.spiral.dot_radius;
        for point in self.scatter_points() {
            let color = match self.hover.emphasis_for(point.day_index) {
                SegmentEmphasis::Dimmed => point.color.with_alpha(style.dimmed_dot_alpha),
                SegmentEmphasis::Normal | SegmentEmphasis::Highlighted => point.color,
            };
            frame.circles.push(CirclePrimitive::new(
                center.x + point.x,
                center.y + point.y,
                dot_radius,
                color,
            ));
        }

        Ok(frame)
    }
}
