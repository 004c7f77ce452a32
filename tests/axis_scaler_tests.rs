use approx::assert_relative_eq;
use graph_rs::ChartError;
use graph_rs::core::{AxisScaler, NumberFormat, ScaleType, TickIncrement, auto_extrema};

#[test]
fn explicit_extrema_require_max_above_min() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    let err = axis.set_extrema(5.0, 5.0).expect_err("degenerate range");
    assert!(matches!(err, ChartError::InvalidRange { .. }));
    assert!(axis.is_auto_extrema());
    assert_eq!(axis.raw_extrema(), (-5.0, 5.0));
}

#[test]
fn explicit_log_extrema_reject_non_positive_min() {
    let mut axis = AxisScaler::new(ScaleType::Log);
    let err = axis.set_extrema(0.0, 10.0).expect_err("log min must be > 0");
    assert!(matches!(err, ChartError::InvalidScale(_)));
}

#[test]
fn explicit_extrema_disable_auto_until_reenabled() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    axis.set_extrema(0.0, 100.0).expect("set extrema");
    assert!(!axis.is_auto_extrema());

    axis.refresh_extrema([3.0, 400.0]).expect("refresh");
    assert_eq!(axis.raw_extrema(), (0.0, 100.0));

    axis.set_auto_extrema();
    axis.refresh_extrema([3.0, 400.0]).expect("refresh");
    assert_eq!(axis.raw_extrema(), (3.0, 400.0));
}

#[test]
fn auto_extrema_expand_degenerate_and_empty_data() {
    assert_eq!(
        auto_extrema([3.0, 3.0], ScaleType::Linear).expect("linear"),
        (2.5, 3.5)
    );
    let (min, max) = auto_extrema([10.0], ScaleType::Log).expect("log");
    assert_relative_eq!(min, 1.0);
    assert_relative_eq!(max, 100.0);

    assert_eq!(
        auto_extrema(std::iter::empty(), ScaleType::Linear).expect("empty"),
        (-5.0, 5.0)
    );
    assert_eq!(
        auto_extrema(std::iter::empty(), ScaleType::Log).expect("empty"),
        (1.0, 100.0)
    );
}

#[test]
fn log_auto_extrema_reject_non_positive_values() {
    let err = auto_extrema([4.0, -1.0], ScaleType::Log).expect_err("negative under log");
    assert!(matches!(err, ChartError::InvalidScale(_)));
}

#[test]
fn non_finite_data_breaks_the_model_contract() {
    let err = auto_extrema([1.0, f64::NAN], ScaleType::Linear).expect_err("nan");
    assert!(matches!(err, ChartError::ModelContract(_)));
}

#[test]
fn scale_transforms_are_identity_and_natural_log() {
    let linear = AxisScaler::new(ScaleType::Linear);
    assert_eq!(linear.to_scaled(-12.5).expect("linear"), -12.5);

    let log = AxisScaler::new(ScaleType::Log);
    assert_relative_eq!(log.to_scaled(std::f64::consts::E).expect("ln"), 1.0);
    assert_relative_eq!(log.from_scaled(2.0).expect("exp"), 2.0_f64.exp());
    assert!(matches!(
        log.to_scaled(0.0),
        Err(ChartError::InvalidScale(_))
    ));
}

#[test]
fn auto_growth_takes_value_or_margin_whichever_is_further() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    axis.refresh_extrema([0.0, 10.0]).expect("refresh");
    axis.set_growth_margin(2.0).expect("margin");

    assert!(!axis.grow_incremental(5.0).expect("inside"));
    assert!(axis.grow_incremental(11.0).expect("just above"));
    assert_eq!(axis.raw_extrema(), (0.0, 12.0));

    assert!(axis.grow_incremental(30.0).expect("far above"));
    assert_eq!(axis.raw_extrema(), (0.0, 30.0));

    assert!(axis.grow_incremental(-1.0).expect("below"));
    assert_eq!(axis.raw_extrema(), (-2.0, 30.0));
}

#[test]
fn explicit_growth_moves_only_by_margin() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    axis.set_extrema(0.0, 10.0).expect("extrema");
    axis.set_growth_margin(2.0).expect("margin");

    assert!(axis.grow_incremental(30.0).expect("grow"));
    assert_eq!(axis.raw_extrema(), (0.0, 12.0));
}

#[test]
fn log_growth_never_drops_min_to_non_positive() {
    let mut auto = AxisScaler::new(ScaleType::Log);
    auto.refresh_extrema([1.0, 10.0]).expect("refresh");
    auto.set_growth_margin(5.0).expect("margin");
    assert!(auto.grow_incremental(0.5).expect("grow"));
    assert_eq!(auto.raw_extrema(), (0.5, 10.0));

    let mut explicit = AxisScaler::new(ScaleType::Log);
    explicit.set_extrema(1.0, 10.0).expect("extrema");
    explicit.set_growth_margin(5.0).expect("margin");
    assert!(!explicit.grow_incremental(0.5).expect("grow"));
    assert_eq!(explicit.raw_extrema(), (1.0, 10.0));

    assert!(matches!(
        explicit.grow_incremental(-3.0),
        Err(ChartError::InvalidScale(_))
    ));
}

#[test]
fn scale_type_switch_is_validated_against_data() {
    let axis = AxisScaler::new(ScaleType::Linear);
    assert!(axis.validate_scale_type(ScaleType::Log, [1.0, 2.0]).is_ok());
    assert!(matches!(
        axis.validate_scale_type(ScaleType::Log, [1.0, 0.0]),
        Err(ChartError::InvalidScale(_))
    ));
}

#[test]
fn tick_policy_setters_validate_input() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    assert!(axis.set_tick_increment(Some(0.0)).is_err());
    assert!(axis.set_tick_increment(Some(-1.0)).is_err());
    assert!(axis.set_tick_spacing_px(0.0).is_err());
    assert!(axis.set_growth_margin(-1.0).is_err());

    axis.set_tick_increment(Some(25.0)).expect("fixed");
    assert_eq!(axis.tick_policy(), TickIncrement::Fixed(25.0));
    assert_eq!(axis.tick_increment(3.5), 25.0);

    axis.set_tick_increment(None).expect("auto");
    assert_eq!(axis.tick_policy(), TickIncrement::Auto);
}

#[test]
fn auto_tick_increment_rounds_to_one_significant_digit() {
    let axis = AxisScaler::new(ScaleType::Linear);
    // 40 px at 3.5 px/unit is 11.43 units.
    assert_eq!(axis.tick_increment(3.5), 10.0);
    // 40 px at 0.15 px/unit is 266.7 units.
    assert_eq!(axis.tick_increment(0.15), 300.0);
}

#[test]
fn tick_values_step_outward_from_zero() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    axis.set_extrema(-25.0, 30.0).expect("extrema");
    let ticks = axis.tick_values(10.0).expect("ticks");
    assert_eq!(ticks, vec![-20.0, -10.0, 10.0, 20.0, 30.0]);

    axis.set_extrema(0.0, 100.0).expect("extrema");
    assert_eq!(axis.tick_values(10.0).expect("ticks").len(), 10);
}

#[test]
fn positive_range_ticks_start_at_the_minimum() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    axis.set_extrema(5.0, 26.0).expect("extrema");
    assert_eq!(
        axis.tick_values(10.0).expect("ticks"),
        vec![5.0, 15.0, 25.0]
    );
}

#[test]
fn custom_number_format_drives_label_width() {
    let mut axis = AxisScaler::new(ScaleType::Linear);
    axis.set_extrema(0.0, 1000.0).expect("extrema");
    assert_eq!(axis.format(1000.0), "1000.0");
    assert_eq!(axis.widest_extrema_label_chars(), 6);

    axis.set_number_format(NumberFormat::custom(|value| format!("{value:.0} u")));
    assert_eq!(axis.format(1000.0), "1000 u");
    assert_eq!(axis.widest_extrema_label_chars(), 6);

    axis.set_number_format(NumberFormat::fixed(0));
    assert_eq!(axis.widest_extrema_label_chars(), 4);
}
