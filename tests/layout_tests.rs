use std::sync::Arc;

use approx::assert_relative_eq;
use graph_rs::api::SeriesStyle;
use graph_rs::core::{
    Axis, AxisPadding, AxisScaler, BarRect, BarSlot, CategorySeries, CategoryTable, ChartData, DataPoint,
    InMemoryDataModel, LayoutGeometry, LayoutParams, LayoutStrategy, ScaleType, Series, Viewport,
    ViewportGeometry, category_slot, grouped_sub_slots, layered_draw_order,
};
use graph_rs::render::{Color, NullRenderer};
use graph_rs::{ChartEngine, ChartEngineConfig, ChartError};

const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

fn table(categories: &[&str], series: &[&[f64]]) -> CategoryTable {
    CategoryTable::new(
        categories.iter().map(|label| (*label).to_owned()).collect(),
        series
            .iter()
            .enumerate()
            .map(|(index, values)| CategorySeries::new(format!("s{index}"), values.to_vec()))
            .collect(),
    )
}

fn params() -> LayoutParams {
    LayoutParams {
        slot_fill_ratio: 0.8,
        marker_half_size: 2.0,
    }
}

fn category_geometry(categories: usize, y_max: f64) -> ViewportGeometry {
    let mut x = AxisScaler::new(ScaleType::Linear);
    x.set_extrema(0.0, categories as f64).expect("x extrema");
    let mut y = AxisScaler::new(ScaleType::Linear);
    y.set_extrema(0.0, y_max).expect("y extrema");
    let padding = AxisPadding {
        numbering: false,
        ..AxisPadding::default()
    };
    ViewportGeometry::recompute(&x, &y, Viewport::new(400, 400), padding).expect("geometry")
}

fn bars(layout: LayoutStrategy, data: &ChartData, geometry: &ViewportGeometry) -> Vec<BarRect> {
    match layout.project(data, geometry, params()).expect("project") {
        LayoutGeometry::Bars(bars) => bars,
        LayoutGeometry::Markers(_) => panic!("bar layout produced markers"),
    }
}

#[test]
fn grouped_slot_splits_into_equal_sub_bars() {
    let slots = grouped_sub_slots(BarSlot::new(0.0, 30.0), 3);
    assert_eq!(
        slots,
        vec![
            BarSlot::new(0.0, 10.0),
            BarSlot::new(10.0, 10.0),
            BarSlot::new(20.0, 10.0)
        ]
    );
    assert!(grouped_sub_slots(BarSlot::new(0.0, 30.0), 0).is_empty());
}

#[test]
fn category_slot_is_centred_and_scaled_by_fill_ratio() {
    let geometry = category_geometry(3, 10.0);
    let per_category = 350.0 / 3.0;

    let slot = category_slot(&geometry, 1, 0.8).expect("slot");
    assert_relative_eq!(slot.width, per_category * 0.8, epsilon = 1e-9);
    assert_relative_eq!(
        slot.left,
        25.0 + per_category + per_category * 0.1,
        epsilon = 1e-9
    );

    assert!(matches!(
        category_slot(&geometry, 0, 0.0),
        Err(ChartError::InvalidData(_))
    ));
    assert!(category_slot(&geometry, 0, 1.5).is_err());
}

#[test]
fn grouped_bars_rise_from_the_baseline_side_by_side() {
    let data = ChartData::Categories(table(&["a", "b"], &[&[4.0, 2.0], &[6.0, 8.0]]));
    let geometry = category_geometry(2, 10.0);
    let bars = bars(LayoutStrategy::GroupedBars, &data, &geometry);

    assert_eq!(bars.len(), 4);
    let baseline = geometry.origin().y;
    for bar in &bars {
        assert_relative_eq!(bar.y_bottom, baseline);
        let top = geometry.y_to_screen(bar.value).expect("value pixel");
        assert_relative_eq!(bar.y_top, top, epsilon = 1e-9);
    }
    let (first, second) = (&bars[0], &bars[1]);
    assert_eq!((first.category, first.series), (0, 0));
    assert_eq!((second.category, second.series), (0, 1));
    assert_relative_eq!(second.x, first.x + first.width, epsilon = 1e-9);
    assert_relative_eq!(first.width, second.width);
}

#[test]
fn layered_order_is_descending_by_value() {
    assert_eq!(layered_draw_order(&[10.0, 3.0, 7.0]).as_slice(), &[0, 2, 1]);
}

#[test]
fn layered_bars_share_one_slot() {
    let data = ChartData::Categories(table(&["only"], &[&[10.0], &[3.0], &[7.0]]));
    let geometry = category_geometry(1, 10.0);
    let bars = bars(LayoutStrategy::LayeredBars, &data, &geometry);

    let series: Vec<usize> = bars.iter().map(|bar| bar.series).collect();
    assert_eq!(series, vec![0, 2, 1]);
    assert!(bars.iter().all(|bar| bar.x == bars[0].x && bar.width == bars[0].width));
}

#[test]
fn layered_engine_paints_largest_value_first_in_series_colors() {
    let model = InMemoryDataModel::with_categories(table(&["only"], &[&[10.0], &[3.0], &[7.0]]))
        .expect("model")
        .into_shared();
    let style = SeriesStyle {
        palette: vec![RED, GREEN, BLUE],
        ..SeriesStyle::default()
    };
    let config = ChartEngineConfig::new(LayoutStrategy::LayeredBars).with_style(style);
    let engine =
        ChartEngine::new(NullRenderer::with_size(300, 300), model, config).expect("engine");

    let frame = engine.presented_frame().expect("presented");
    let fills: Vec<Color> = frame.rects.iter().map(|rect| rect.fill_color).collect();
    assert_eq!(fills, vec![RED, BLUE, GREEN]);
}

#[test]
fn stacked_bars_start_where_the_previous_bar_ends() {
    let data = ChartData::Categories(table(&["a", "b"], &[&[3.0, 1.0], &[5.0, 2.0]]));
    let geometry = category_geometry(2, 10.0);
    let bars = bars(LayoutStrategy::StackedBars, &data, &geometry);

    assert_eq!(bars.len(), 4);
    assert_relative_eq!(bars[0].y_bottom, geometry.origin().y);
    assert_relative_eq!(bars[1].y_bottom, bars[0].y_top, epsilon = 1e-9);
    let stack_top = geometry.y_to_screen(8.0).expect("sum pixel");
    assert_relative_eq!(bars[1].y_top, stack_top, epsilon = 1e-9);
    assert_relative_eq!(bars[3].y_bottom, bars[2].y_top, epsilon = 1e-9);
}

#[test]
fn stacked_auto_extrema_cover_the_category_sum() {
    let model = InMemoryDataModel::with_categories(table(&["a"], &[&[3.0], &[5.0]]))
        .expect("model")
        .into_shared();
    let engine = ChartEngine::new(
        NullRenderer::with_size(300, 300),
        model,
        ChartEngineConfig::new(LayoutStrategy::StackedBars),
    )
    .expect("engine");

    let (min, max) = engine.axis(Axis::Y).raw_extrema();
    assert!(max >= 8.0);
    assert!(min <= 0.0);
}

#[test]
fn stacking_and_categories_need_linear_axes() {
    let (lin, log) = (ScaleType::Linear, ScaleType::Log);
    assert!(LayoutStrategy::StackedBars.validate_scales(true, lin, lin).is_ok());
    assert!(matches!(
        LayoutStrategy::StackedBars.validate_scales(true, lin, log),
        Err(ChartError::InvalidScale(_))
    ));
    assert!(LayoutStrategy::LayeredBars.validate_scales(true, lin, log).is_ok());
    assert!(LayoutStrategy::GroupedBars.validate_scales(true, log, lin).is_err());
    assert!(LayoutStrategy::ScatterMarkers.validate_scales(false, log, log).is_ok());
}

#[test]
fn layouts_reject_the_wrong_kind_of_data() {
    let points = ChartData::Points(vec![Series::new("p", vec![DataPoint::new(1.0, 2.0)])]);
    let categories = ChartData::Categories(table(&["a"], &[&[1.0]]));

    assert!(matches!(
        LayoutStrategy::GroupedBars.validate_data(&points),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        LayoutStrategy::ScatterMarkers.validate_data(&categories),
        Err(ChartError::InvalidData(_))
    ));
    assert!(LayoutStrategy::StackedBars.validate_data(&categories).is_ok());

    let model = Arc::new(parking_lot::Mutex::new(
        InMemoryDataModel::new(points).expect("model"),
    ));
    let result = ChartEngine::new(
        NullRenderer::with_size(200, 200),
        model.clone(),
        ChartEngineConfig::new(LayoutStrategy::GroupedBars),
    );
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn scatter_projects_one_marker_per_sample() {
    let data = ChartData::Points(vec![
        Series::new("a", vec![DataPoint::new(0.0, 0.0), DataPoint::new(2.0, 4.0)]),
        Series::new("b", vec![DataPoint::new(1.0, 1.0)]),
    ]);
    let geometry = category_geometry(2, 4.0);
    let LayoutGeometry::Markers(markers) = LayoutStrategy::ScatterMarkers
        .project(&data, &geometry, params())
        .expect("project")
    else {
        panic!("scatter produced bars");
    };

    assert_eq!(markers.len(), 3);
    assert_eq!((markers[2].series, markers[2].index), (1, 0));
    let expected = geometry.data_to_screen(2.0, 4.0).expect("pixel");
    assert_relative_eq!(markers[1].center.x, expected.x);
    assert_relative_eq!(markers[1].center.y, expected.y);
    assert_eq!(markers[0].half_size, 2.0);
}
