#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use graph_rs::core::{
    CategorySeries, CategoryTable, DataPoint, InMemoryDataModel, LayoutStrategy, Series,
};
use graph_rs::render::{CairoRenderer, Renderer};
use graph_rs::{ChartEngine, ChartEngineConfig, ChartError};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
}

#[test]
fn cairo_renderer_draws_bars_axes_and_labels() {
    let model = InMemoryDataModel::with_categories(CategoryTable::new(
        vec!["q1".to_owned(), "q2".to_owned(), "q3".to_owned()],
        vec![
            CategorySeries::new("north", vec![4.0, 6.0, 5.0]),
            CategorySeries::new("south", vec![2.0, 3.0, 7.0]),
        ],
    ))
    .expect("model")
    .into_shared();
    let renderer = CairoRenderer::new(640, 400).expect("renderer");
    let engine = ChartEngine::new(
        renderer,
        model,
        ChartEngineConfig::new(LayoutStrategy::StackedBars).with_grid_lines(true),
    )
    .expect("engine");

    let stats = engine.renderer().last_stats();
    assert_eq!(stats.rects_drawn, 6);
    assert!(stats.lines_drawn >= 2);
    assert!(stats.texts_drawn >= 3);

    let mut png = Vec::new();
    engine.renderer().write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_resizes_and_draws_on_external_context() {
    let model = InMemoryDataModel::with_series(vec![Series::new(
        "samples",
        vec![DataPoint::new(0.0, 10.0), DataPoint::new(30.0, 20.0)],
    )])
    .expect("model")
    .into_shared();
    let renderer = CairoRenderer::new(300, 200).expect("renderer");
    let mut engine = ChartEngine::new(
        renderer,
        model,
        ChartEngineConfig::new(LayoutStrategy::ScatterMarkers),
    )
    .expect("engine");

    engine.renderer_mut().resize(600, 320).expect("resize");
    assert_eq!(engine.renderer().surface_size().width, 600);
    engine.resize_notified().expect("redraw");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_on_cairo_context(&context)
        .expect("render on context");
    assert_eq!(engine.renderer().last_stats().markers_drawn, 2);
}
