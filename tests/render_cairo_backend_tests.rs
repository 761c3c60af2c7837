#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use usage_spiral::SpiralError;
use usage_spiral::api::{EngineConfig, UsageSpiralEngine};
use usage_spiral::core::Viewport;
use usage_spiral::data::RawTable;
use usage_spiral::render::CairoRenderer;
use usage_spiral::spiral::SpiralConfig;

fn usage_table() -> RawTable {
    RawTable::new([
        "App name",
        "Device",
        "September 1, 2025",
        "September 2, 2025",
        "September 3, 2025",
    ])
    .with_row(["Browser", "Phone", "600", "1200", "300"])
}

fn config() -> EngineConfig {
    EngineConfig::new(Viewport::new(600, 600), Viewport::new(120, 600))
        .with_spiral(SpiralConfig::default().with_scatter_seed(1).with_dots_per_day(20))
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, SpiralError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_segments_and_dots() {
    let renderer = CairoRenderer::new(600, 600).expect("renderer");
    let mut engine =
        UsageSpiralEngine::from_tables(renderer, &usage_table(), None, config()).expect("engine");
    engine.hover_day(1);

    engine.render_spiral().expect("render");
    let stats = engine.renderer().last_stats();

    assert_eq!(stats.arcs_drawn, 3);
    assert_eq!(stats.circles_drawn, 3 * 20);
    assert_eq!(stats.lines_drawn, 0);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(600, 600).expect("renderer");
    let mut engine =
        UsageSpiralEngine::from_tables(renderer, &usage_table(), None, config()).expect("engine");

    let surface = ImageSurface::create(Format::ARgb32, 600, 600).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_spiral_on_cairo_context(&context)
        .expect("render on context");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.last_stats().circles_drawn, 60);
}

#[test]
fn cairo_renderer_writes_png() {
    let renderer = CairoRenderer::new(600, 600).expect("renderer");
    let mut engine =
        UsageSpiralEngine::from_tables(renderer, &usage_table(), None, config()).expect("engine");
    engine.render_spiral().expect("render");

    let path = std::env::temp_dir().join(format!("usage-spiral-{}.png", std::process::id()));
    engine.renderer().write_png(&path).expect("png");
    let bytes = std::fs::read(&path).expect("read png");
    assert_eq!(&bytes[..4], b"\x89PNG");
    std::fs::remove_file(path).ok();
}
