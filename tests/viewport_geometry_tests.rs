use approx::assert_relative_eq;
use graph_rs::ChartError;
use graph_rs::core::{AxisPadding, AxisScaler, PixelPoint, ScaleType, Viewport, ViewportGeometry};
use proptest::prelude::*;

fn explicit_axis(scale_type: ScaleType, min: f64, max: f64) -> AxisScaler {
    let mut axis = AxisScaler::new(scale_type);
    axis.set_extrema(min, max).expect("extrema");
    axis
}

fn without_numbering() -> AxisPadding {
    AxisPadding {
        numbering: false,
        ..AxisPadding::default()
    }
}

#[test]
fn square_surface_with_explicit_hundred_unit_axes() {
    let x = explicit_axis(ScaleType::Linear, 0.0, 100.0);
    let y = explicit_axis(ScaleType::Linear, 0.0, 100.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(400, 400), without_numbering())
            .expect("geometry");

    assert_relative_eq!(geometry.pixel_scale_y(), 3.5);
    assert_relative_eq!(geometry.pixel_scale_x(), 3.5);
    assert_eq!(geometry.tick_increment_y(), 10.0);
    assert_eq!(geometry.left_gutter_px(), 25.0);

    let bottom_left = geometry.data_to_screen(0.0, 0.0).expect("project");
    assert_relative_eq!(bottom_left.x, 25.0);
    assert_relative_eq!(bottom_left.y, 375.0);
    let top_right = geometry.data_to_screen(100.0, 100.0).expect("project");
    assert_relative_eq!(top_right.x, 375.0);
    assert_relative_eq!(top_right.y, 25.0);
}

#[test]
fn numbering_reserves_a_gutter_for_the_widest_y_label() {
    let x = explicit_axis(ScaleType::Linear, 0.0, 100.0);
    let y = explicit_axis(ScaleType::Linear, 0.0, 100.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(400, 400), AxisPadding::default())
            .expect("geometry");

    // "100.0" is five characters of eight pixels each.
    assert_relative_eq!(geometry.left_gutter_px(), 65.0);
    assert_relative_eq!(geometry.pixel_scale_x(), 310.0 / 100.0);
    assert_relative_eq!(geometry.plot_left(), 65.0);
    assert_relative_eq!(geometry.plot_right(), 375.0);
}

#[test]
fn extrema_map_to_the_plot_edges() {
    let x = explicit_axis(ScaleType::Linear, -40.0, 60.0);
    let y = explicit_axis(ScaleType::Log, 1.0, 1000.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(640, 480), AxisPadding::default())
            .expect("geometry");

    let min_corner = geometry.data_to_screen(-40.0, 1.0).expect("min corner");
    let max_corner = geometry.data_to_screen(60.0, 1000.0).expect("max corner");
    assert_relative_eq!(min_corner.x, geometry.plot_left(), epsilon = 1e-9);
    assert_relative_eq!(min_corner.y, geometry.plot_bottom(), epsilon = 1e-9);
    assert_relative_eq!(max_corner.x, geometry.plot_right(), epsilon = 1e-9);
    assert_relative_eq!(max_corner.y, geometry.plot_top(), epsilon = 1e-9);
}

#[test]
fn origin_is_clamped_to_the_plot_when_zero_is_outside() {
    let x = explicit_axis(ScaleType::Linear, 10.0, 20.0);
    let y = explicit_axis(ScaleType::Linear, -20.0, -10.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(300, 200), without_numbering())
            .expect("geometry");

    assert_eq!(geometry.origin().x, geometry.plot_left());
    assert_eq!(geometry.origin().y, geometry.plot_top());
    assert!(geometry.zero().x < geometry.plot_left());
    assert!(geometry.zero().y < geometry.plot_top());
}

#[test]
fn origin_follows_zero_when_ranges_straddle_it() {
    let x = explicit_axis(ScaleType::Linear, -50.0, 50.0);
    let y = explicit_axis(ScaleType::Linear, -10.0, 30.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(400, 400), without_numbering())
            .expect("geometry");

    assert_eq!(geometry.origin(), geometry.zero());
    assert_relative_eq!(geometry.origin().x, 200.0);
    assert_relative_eq!(geometry.origin().y, 375.0 - 10.0 * geometry.pixel_scale_y());
}

#[test]
fn empty_surfaces_are_rejected() {
    let x = explicit_axis(ScaleType::Linear, 0.0, 1.0);
    let y = explicit_axis(ScaleType::Linear, 0.0, 1.0);

    let err = ViewportGeometry::recompute(&x, &y, Viewport::new(0, 0), AxisPadding::default())
        .expect_err("zero surface");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 0
        }
    ));

    let err = ViewportGeometry::recompute(&x, &y, Viewport::new(40, 40), AxisPadding::default())
        .expect_err("paddings consume the surface");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn negative_x_range_shrinks_the_label_gutter() {
    let y = explicit_axis(ScaleType::Linear, 0.0, 100.0);
    let positive = explicit_axis(ScaleType::Linear, 0.0, 100.0);
    let straddling = explicit_axis(ScaleType::Linear, -100.0, 100.0);
    let surface = Viewport::new(400, 400);

    let wide = ViewportGeometry::recompute(&positive, &y, surface, AxisPadding::default())
        .expect("positive x");
    let narrow = ViewportGeometry::recompute(&straddling, &y, surface, AxisPadding::default())
        .expect("straddling x");
    assert!(narrow.left_gutter_px() < wide.left_gutter_px());
    assert!(narrow.left_gutter_px() >= narrow.axis_pad_px());
}

#[test]
fn non_finite_pixels_cannot_be_inverted() {
    let x = explicit_axis(ScaleType::Linear, 0.0, 1.0);
    let y = explicit_axis(ScaleType::Linear, 0.0, 1.0);
    let geometry =
        ViewportGeometry::recompute(&x, &y, Viewport::new(200, 200), AxisPadding::default())
            .expect("geometry");
    assert!(matches!(
        geometry.screen_to_data(PixelPoint::new(f64::NAN, 3.0)),
        Err(ChartError::InvalidData(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn screen_round_trip_stays_within_a_pixel(
        points in prop::collection::vec((-1.0e4f64..1.0e4, 1.0e-2f64..1.0e5), 1000),
        width in 120u32..2000,
        height in 120u32..2000
    ) {
        let x = explicit_axis(ScaleType::Linear, -1.0e4, 1.0e4);
        let y = explicit_axis(ScaleType::Log, 1.0e-2, 1.0e5);
        let geometry = ViewportGeometry::recompute(
            &x,
            &y,
            Viewport::new(width, height),
            AxisPadding::default(),
        )
        .expect("geometry");

        for (data_x, data_y) in points {
            let pixel = geometry.data_to_screen(data_x, data_y).expect("to screen");
            let back = geometry.screen_to_data(pixel).expect("to data");
            let again = geometry.data_to_screen(back.x, back.y).expect("to screen again");
            prop_assert!((again.x - pixel.x).abs() <= 1.0);
            prop_assert!((again.y - pixel.y).abs() <= 1.0);
        }
    }
}
