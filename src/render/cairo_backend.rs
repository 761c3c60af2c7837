use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};

use crate::error::{SpiralError, SpiralResult};
use crate::render::{ArcPrimitive, Color, RenderFrame, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub arcs_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> SpiralResult<()>;
}

/// Cairo renderer drawing spiral and timeline frames.
///
/// Frames render either into an owned offscreen image surface through
/// `Renderer::render`, or onto a host context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> SpiralResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SpiralError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> SpiralResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface as PNG.
    pub fn write_png(&self, path: impl AsRef<Path>) -> SpiralResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            SpiralError::InvalidData(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| SpiralError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> SpiralResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for arc in &frame.arcs {
            append_annular_sector_path(context, *arc);
            match (arc.fill, arc.stroke) {
                (Some(fill), Some((stroke, width))) => {
                    apply_color(context, fill);
                    context
                        .fill_preserve()
                        .map_err(|err| map_backend_error("failed to fill arc", err))?;
                    apply_color(context, stroke);
                    context.set_line_width(width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke arc", err))?;
                }
                (Some(fill), None) => {
                    apply_color(context, fill);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill arc", err))?;
                }
                (None, Some((stroke, width))) => {
                    apply_color(context, stroke);
                    context.set_line_width(width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke arc", err))?;
                }
                (None, None) => context.new_path(),
            }
            stats.arcs_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for circle in &frame.circles {
            apply_color(context, circle.color);
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            stats.circles_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SpiralResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> SpiralResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_annular_sector_path(context: &Context, arc: ArcPrimitive) {
    context.new_sub_path();
    context.arc(
        arc.cx,
        arc.cy,
        arc.outer_radius,
        arc.start_angle,
        arc.end_angle,
    );
    context.arc_negative(
        arc.cx,
        arc.cy,
        arc.inner_radius,
        arc.end_angle,
        arc.start_angle,
    );
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> SpiralError {
    SpiralError::InvalidData(format!("{prefix}: {err}"))
}
