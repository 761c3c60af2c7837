use std::path::Path;

use tracing::debug;

use crate::core::Viewport;
use crate::data::{RawTable, UsageDataset, build_dataset, load_dataset};
use crate::error::SpiralResult;
use crate::format::{DEFAULT_DETAIL_APP_LIMIT, DayDetail, LegendEntry, legend_entries};
use crate::interaction::{HoverCoordinator, HoverEvent, InteractionMode, SubscriptionId};
use crate::render::Renderer;
use crate::spiral::{ScatterPoint, SpiralLayout, scatter_rng};
use crate::timeline::{PanAffordance, TimelineGeometry, TimelineLayout, TimelineViewState};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::EngineConfig;

/// Composes the dataset, both view geometries and their shared interaction state.
///
/// The dataset is built once and never mutated; resizes and drags only
/// rebuild geometry derived from it.
pub struct UsageSpiralEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: EngineConfig,
    pub(super) dataset: UsageDataset,
    pub(super) spiral: SpiralLayout,
    pub(super) timeline: TimelineLayout,
    pub(super) timeline_view: TimelineViewState,
    pub(super) timeline_geometry: TimelineGeometry,
    pub(super) hover: HoverCoordinator,
}

impl<R: Renderer> UsageSpiralEngine<R> {
    pub fn new(renderer: R, dataset: UsageDataset, config: EngineConfig) -> SpiralResult<Self> {
        config.validate()?;
        let spiral = SpiralLayout::new(&dataset, config.spiral_viewport, &config.spiral)?;
        let timeline = TimelineLayout::new(&dataset, config.timeline)?;
        let mut timeline_view = TimelineViewState::default();
        let timeline_geometry =
            timeline_view.recompute(&timeline, f64::from(config.timeline_viewport.height))?;

        debug!(
            days = dataset.len(),
            pannable = timeline_geometry.bounds.is_pannable(),
            "engine initialized"
        );
        Ok(Self {
            renderer,
            config,
            dataset,
            spiral,
            timeline,
            timeline_view,
            timeline_geometry,
            hover: HoverCoordinator::default(),
        })
    }

    /// Builds the dataset from in-memory tables, then the engine.
    pub fn from_tables(
        renderer: R,
        usage: &RawTable,
        unlocks: Option<&RawTable>,
        config: EngineConfig,
    ) -> SpiralResult<Self> {
        let dataset = build_dataset(usage, unlocks, &config.pipeline)?;
        Self::new(renderer, dataset, config)
    }

    /// Loads both CSV exports in full before building anything.
    pub fn load(
        renderer: R,
        usage_path: impl AsRef<Path>,
        unlock_path: Option<&Path>,
        config: EngineConfig,
    ) -> SpiralResult<Self> {
        let dataset = load_dataset(usage_path, unlock_path, &config.pipeline)?;
        Self::new(renderer, dataset, config)
    }

    #[must_use]
    pub fn dataset(&self) -> &UsageDataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn spiral_layout(&self) -> &SpiralLayout {
        &self.spiral
    }

    #[must_use]
    pub fn timeline_layout(&self) -> &TimelineLayout {
        &self.timeline
    }

    #[must_use]
    pub fn timeline_geometry(&self) -> TimelineGeometry {
        self.timeline_geometry
    }

    #[must_use]
    pub fn timeline_pan_offset(&self) -> f64 {
        self.timeline_view.pan_offset()
    }

    /// Applies new viewport sizes, reusing the existing dataset.
    ///
    /// The timeline pan offset is clamped into the bounds for the new height.
    pub fn set_viewports(
        &mut self,
        spiral_viewport: Viewport,
        timeline_viewport: Viewport,
    ) -> SpiralResult<()> {
        let spiral_viewport = spiral_viewport.validate()?;
        let timeline_viewport = timeline_viewport.validate()?;

        let spiral = SpiralLayout::new(&self.dataset, spiral_viewport, &self.config.spiral)?;
        let geometry = self
            .timeline_view
            .recompute(&self.timeline, f64::from(timeline_viewport.height))?;

        self.spiral = spiral;
        self.timeline_geometry = geometry;
        self.config.spiral_viewport = spiral_viewport;
        self.config.timeline_viewport = timeline_viewport;
        debug!(
            spiral_width = spiral_viewport.width,
            spiral_height = spiral_viewport.height,
            timeline_height = timeline_viewport.height,
            pan_offset = geometry.pan_offset,
            "viewports updated"
        );
        Ok(())
    }

    pub fn timeline_drag_start(&mut self) {
        self.hover.on_drag_start();
    }

    /// Drags the timeline content by `dy` pixels and returns the new affordances.
    pub fn timeline_drag_by(&mut self, dy: f64) -> PanAffordance {
        let affordance = self
            .timeline_view
            .drag_by(dy)
            .unwrap_or(self.timeline_geometry.affordance);
        self.timeline_geometry.pan_offset = self.timeline_view.pan_offset();
        self.timeline_geometry.affordance = affordance;
        affordance
    }

    pub fn timeline_drag_end(&mut self) {
        self.hover.on_drag_end();
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.hover.mode()
    }

    pub fn subscribe_hover(
        &mut self,
        listener: impl FnMut(&HoverEvent) + 'static,
    ) -> SubscriptionId {
        self.hover.subscribe(listener)
    }

    pub fn unsubscribe_hover(&mut self, id: SubscriptionId) -> bool {
        self.hover.unsubscribe(id)
    }

    /// Hovers a day by index. Out-of-range indices clear the hover.
    pub fn hover_day(&mut self, day_index: usize) -> bool {
        if day_index >= self.dataset.len() {
            return self.clear_hover();
        }
        self.hover.publish(HoverEvent::Entered { day_index })
    }

    pub fn clear_hover(&mut self) -> bool {
        self.hover.publish(HoverEvent::Left)
    }

    /// Hovers whatever timeline dot lies under viewport `y`, or clears the hover.
    pub fn hover_timeline_at(&mut self, viewport_y: f64) -> bool {
        match self
            .timeline
            .hit_test(viewport_y, self.timeline_view.pan_offset())
        {
            Some(day_index) => self.hover_day(day_index),
            None => self.clear_hover(),
        }
    }

    /// Hovers whatever spiral segment lies under viewport (`x`, `y`), or clears the hover.
    pub fn hover_spiral_at(&mut self, x: f64, y: f64) -> bool {
        match self.spiral.hit_test(x, y) {
            Some(day_index) => self.hover_day(day_index),
            None => self.clear_hover(),
        }
    }

    #[must_use]
    pub fn hovered_day(&self) -> Option<usize> {
        self.hover.hovered_day()
    }

    #[must_use]
    pub fn day_detail(&self, day_index: usize) -> Option<DayDetail> {
        self.dataset
            .get(day_index)
            .map(|day| DayDetail::from_record(day, DEFAULT_DETAIL_APP_LIMIT))
    }

    #[must_use]
    pub fn hovered_detail(&self) -> Option<DayDetail> {
        self.hovered_day().and_then(|index| self.day_detail(index))
    }

    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        legend_entries(self.spiral.color_scale())
    }

    /// Fill-layer dots for this render pass, relative to the spiral center.
    ///
    /// With `scatter_seed` configured every call returns the same cloud.
    #[must_use]
    pub fn scatter_points(&self) -> Vec<ScatterPoint> {
        let mut rng = scatter_rng(self.config.spiral.scatter_seed);
        self.spiral.scatter_points(&self.dataset, &mut rng)
    }

    pub fn render_spiral(&mut self) -> SpiralResult<()> {
        let frame = self.build_spiral_frame()?;
        self.renderer.render(&frame)
    }

    pub fn render_timeline(&mut self) -> SpiralResult<()> {
        let frame = self.build_timeline_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the spiral, then the timeline.
    pub fn render(&mut self) -> SpiralResult<()> {
        self.render_spiral()?;
        self.render_timeline()
    }

    /// Renders the spiral frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_spiral_on_cairo_context(&mut self, context: &cairo::Context) -> SpiralResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_spiral_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
