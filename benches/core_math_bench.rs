use criterion::{Criterion, criterion_group, criterion_main};
use graph_rs::api::AxisConfig;
use graph_rs::core::{
    AxisPadding, AxisScaler, CategorySeries, CategoryTable, ChartData, DataPoint,
    InMemoryDataModel, LayoutParams, LayoutStrategy, ScaleType, Series, Viewport,
    ViewportGeometry,
};
use graph_rs::render::NullRenderer;
use graph_rs::{ChartEngine, ChartEngineConfig};
use std::hint::black_box;

fn explicit_axis(scale_type: ScaleType, min: f64, max: f64) -> AxisScaler {
    let mut axis = AxisScaler::new(scale_type);
    axis.set_extrema(min, max).expect("valid extrema");
    axis
}

fn bench_log_round_trip(c: &mut Criterion) {
    let x = explicit_axis(ScaleType::Linear, 0.0, 10_000.0);
    let y = explicit_axis(ScaleType::Log, 0.01, 100_000.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(1920, 1080), AxisPadding::default())
            .expect("geometry");

    c.bench_function("log_axis_round_trip", |b| {
        b.iter(|| {
            let pixel = geometry
                .data_to_screen(black_box(4_321.123), black_box(77.7))
                .expect("to screen");
            let _ = geometry.screen_to_data(pixel).expect("to data");
        })
    });
}

fn bench_scatter_projection_10k(c: &mut Criterion) {
    let x = explicit_axis(ScaleType::Linear, 0.0, 10_000.0);
    let y = explicit_axis(ScaleType::Linear, -1.0, 1.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(1920, 1080), AxisPadding::default())
            .expect("geometry");
    let data = ChartData::Points(vec![Series::new(
        "wave",
        (0..10_000)
            .map(|i| DataPoint::new(f64::from(i), (f64::from(i) / 100.0).sin()))
            .collect(),
    )]);
    let params = LayoutParams {
        slot_fill_ratio: 0.8,
        marker_half_size: 2.0,
    };

    c.bench_function("scatter_projection_10k", |b| {
        b.iter(|| {
            let _ = LayoutStrategy::ScatterMarkers
                .project(black_box(&data), black_box(&geometry), params)
                .expect("projection");
        })
    });
}

fn bench_stacked_projection_1k(c: &mut Criterion) {
    let table = CategoryTable::new(
        (0..1_000).map(|i| format!("c{i}")).collect(),
        (0..4)
            .map(|s| {
                CategorySeries::new(
                    format!("s{s}"),
                    (0..1_000).map(|i| f64::from((i + s) % 17 + 1)).collect(),
                )
            })
            .collect(),
    );
    let x = explicit_axis(ScaleType::Linear, 0.0, 1_000.0);
    let y = explicit_axis(ScaleType::Linear, 0.0, 80.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(1920, 1080), AxisPadding::default())
            .expect("geometry");
    let data = ChartData::Categories(table);
    let params = LayoutParams {
        slot_fill_ratio: 0.8,
        marker_half_size: 2.0,
    };

    c.bench_function("stacked_projection_1k", |b| {
        b.iter(|| {
            let _ = LayoutStrategy::StackedBars
                .project(black_box(&data), black_box(&geometry), params)
                .expect("projection");
        })
    });
}

fn bench_engine_incremental_append(c: &mut Criterion) {
    let model = InMemoryDataModel::with_series(vec![Series::new("live", Vec::new())])
        .expect("model")
        .into_shared();
    let config = ChartEngineConfig::new(LayoutStrategy::ScatterMarkers)
        .with_x_axis(AxisConfig::default().with_extrema(0.0, 1.0e9))
        .with_y_axis(AxisConfig::default().with_extrema(-1.0, 1.0));
    let mut engine = ChartEngine::new(NullRenderer::with_size(1600, 900), model.clone(), config)
        .expect("engine");
    let mut step = 0.0;

    c.bench_function("engine_incremental_append", |b| {
        b.iter(|| {
            step += 1.0;
            model
                .lock()
                .append_point(0, DataPoint::new(step, (step / 50.0).sin()))
                .expect("append");
            engine.process_pending_changes().expect("process");
        })
    });
}

criterion_group!(
    benches,
    bench_log_round_trip,
    bench_scatter_projection_10k,
    bench_stacked_projection_1k,
    bench_engine_incremental_append
);
criterion_main!(benches);
