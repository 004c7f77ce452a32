use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Target pixel distance between two auto-spaced ticks.
pub const DEFAULT_TICK_SPACING_PX: f64 = 40.0;
/// Upper bound of ticks generated on each side of zero.
pub const MAX_TICKS: usize = 256;

const DEFAULT_LINEAR_RANGE: (f64, f64) = (-5.0, 5.0);
const DEFAULT_LOG_RANGE: (f64, f64) = (1.0, 100.0);

/// Mapping between raw values and scaled (plotted) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleType {
    /// Identity transform.
    #[default]
    Linear,
    /// Natural-log transform; every raw value must be > 0.
    Log,
}

impl ScaleType {
    /// Maps a raw value into scaled space.
    pub fn to_scaled(self, raw: f64) -> ChartResult<f64> {
        if !raw.is_finite() {
            return Err(ChartError::InvalidData("axis value must be finite".to_owned()));
        }
        match self {
            Self::Linear => Ok(raw),
            Self::Log => {
                if raw <= 0.0 {
                    return Err(ChartError::InvalidScale(format!(
                        "logarithmic scale requires values > 0, got {raw}"
                    )));
                }
                Ok(raw.ln())
            }
        }
    }

    /// Maps a scaled value back into raw space.
    pub fn from_scaled(self, scaled: f64) -> ChartResult<f64> {
        if !scaled.is_finite() {
            return Err(ChartError::InvalidData(
                "scaled axis value must be finite".to_owned(),
            ));
        }
        match self {
            Self::Linear => Ok(scaled),
            Self::Log => {
                let raw = scaled.exp();
                if !raw.is_finite() || raw <= 0.0 {
                    return Err(ChartError::InvalidScale(
                        "mapped log value must be finite and > 0".to_owned(),
                    ));
                }
                Ok(raw)
            }
        }
    }

    /// Range used when there is no data at all.
    #[must_use]
    pub fn default_range(self) -> (f64, f64) {
        match self {
            Self::Linear => DEFAULT_LINEAR_RANGE,
            Self::Log => DEFAULT_LOG_RANGE,
        }
    }
}

/// Tick spacing policy of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum TickIncrement {
    /// Derived from the target pixel spacing on every geometry recompute.
    #[default]
    Auto,
    /// Fixed spacing in scaled units.
    Fixed(f64),
}

/// Pluggable axis-label number formatter.
#[derive(Clone)]
pub struct NumberFormat {
    kind: NumberFormatKind,
}

#[derive(Clone)]
enum NumberFormatKind {
    FixedDecimals(u8),
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl NumberFormat {
    /// Formats with a fixed number of fractional digits.
    #[must_use]
    pub fn fixed(decimals: u8) -> Self {
        Self {
            kind: NumberFormatKind::FixedDecimals(decimals),
        }
    }

    /// Injects a host formatter (locale-aware formatting lives with the host).
    #[must_use]
    pub fn custom(formatter: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self {
            kind: NumberFormatKind::Custom(Arc::new(formatter)),
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match &self.kind {
            NumberFormatKind::FixedDecimals(decimals) => {
                format!("{value:.prec$}", prec = usize::from(*decimals))
            }
            NumberFormatKind::Custom(formatter) => formatter(value),
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::fixed(1)
    }
}

impl fmt::Debug for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NumberFormatKind::FixedDecimals(decimals) => {
                f.debug_tuple("NumberFormat::Fixed").field(decimals).finish()
            }
            NumberFormatKind::Custom(_) => f.write_str("NumberFormat::Custom(..)"),
        }
    }
}

/// State of one chart axis: extrema, scale type, growth margin, tick policy
/// and label formatting.
///
/// Invariant: `raw_max > raw_min`. Under [`ScaleType::Log`] the scaled bounds
/// are the natural logs of the raw bounds, which requires `raw_min > 0`; that
/// requirement is checked when extrema are committed and, after a scale-type
/// switch, lazily on the next recompute.
#[derive(Debug, Clone)]
pub struct AxisScaler {
    scale_type: ScaleType,
    raw_min: f64,
    raw_max: f64,
    auto_extrema: bool,
    growth_margin: f64,
    tick: TickIncrement,
    tick_spacing_px: f64,
    number_format: NumberFormat,
}

impl Default for AxisScaler {
    fn default() -> Self {
        Self::new(ScaleType::Linear)
    }
}

impl AxisScaler {
    /// Creates an auto-extrema axis holding the scale type's default range.
    #[must_use]
    pub fn new(scale_type: ScaleType) -> Self {
        let (raw_min, raw_max) = scale_type.default_range();
        Self {
            scale_type,
            raw_min,
            raw_max,
            auto_extrema: true,
            growth_margin: 0.0,
            tick: TickIncrement::Auto,
            tick_spacing_px: DEFAULT_TICK_SPACING_PX,
            number_format: NumberFormat::default(),
        }
    }

    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    #[must_use]
    pub fn raw_extrema(&self) -> (f64, f64) {
        (self.raw_min, self.raw_max)
    }

    /// Extrema in scaled space.
    pub fn scaled_extrema(&self) -> ChartResult<(f64, f64)> {
        Ok((
            self.scale_type.to_scaled(self.raw_min)?,
            self.scale_type.to_scaled(self.raw_max)?,
        ))
    }

    #[must_use]
    pub fn is_auto_extrema(&self) -> bool {
        self.auto_extrema
    }

    #[must_use]
    pub fn growth_margin(&self) -> f64 {
        self.growth_margin
    }

    #[must_use]
    pub fn tick_policy(&self) -> TickIncrement {
        self.tick
    }

    #[must_use]
    pub fn tick_spacing_px(&self) -> f64 {
        self.tick_spacing_px
    }

    #[must_use]
    pub fn number_format(&self) -> &NumberFormat {
        &self.number_format
    }

    /// Switches to explicit extrema.
    pub fn set_extrema(&mut self, min: f64, max: f64) -> ChartResult<()> {
        validate_range(min, max)?;
        self.scale_type.to_scaled(min)?;
        self.raw_min = min;
        self.raw_max = max;
        self.auto_extrema = false;
        Ok(())
    }

    /// Re-enables automatic extrema; bounds are derived on the next full scan.
    pub fn set_auto_extrema(&mut self) {
        self.auto_extrema = true;
    }

    /// Stores the scale type. Compatibility with the current bounds and data is
    /// checked on the next recompute.
    pub fn set_scale_type(&mut self, scale_type: ScaleType) {
        self.scale_type = scale_type;
    }

    pub fn set_growth_margin(&mut self, margin: f64) -> ChartResult<()> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ChartError::InvalidData(
                "growth margin must be finite and >= 0".to_owned(),
            ));
        }
        self.growth_margin = margin;
        Ok(())
    }

    /// Sets a fixed tick increment, or `None` for auto spacing.
    pub fn set_tick_increment(&mut self, increment: Option<f64>) -> ChartResult<()> {
        self.tick = match increment {
            None => TickIncrement::Auto,
            Some(value) if value.is_finite() && value > 0.0 => TickIncrement::Fixed(value),
            Some(_) => {
                return Err(ChartError::InvalidData(
                    "tick increment must be finite and > 0".to_owned(),
                ));
            }
        };
        Ok(())
    }

    pub fn set_tick_spacing_px(&mut self, spacing_px: f64) -> ChartResult<()> {
        if !spacing_px.is_finite() || spacing_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "tick spacing must be finite and > 0".to_owned(),
            ));
        }
        self.tick_spacing_px = spacing_px;
        Ok(())
    }

    pub fn set_number_format(&mut self, format: NumberFormat) {
        self.number_format = format;
    }

    /// Raw to scaled conversion under the axis scale type.
    pub fn to_scaled(&self, raw: f64) -> ChartResult<f64> {
        self.scale_type.to_scaled(raw)
    }

    /// Scaled to raw conversion under the axis scale type.
    pub fn from_scaled(&self, scaled: f64) -> ChartResult<f64> {
        self.scale_type.from_scaled(scaled)
    }

    /// Full-scan update. With auto extrema on, bounds are recomputed from
    /// `values`; otherwise the explicit bounds are kept. In both cases every
    /// value is checked against the scale type.
    ///
    /// Returns whether the raw extrema changed.
    pub fn refresh_extrema<I>(&mut self, values: I) -> ChartResult<bool>
    where
        I: IntoIterator<Item = f64>,
    {
        let scanned = scan_extrema(values, self.scale_type)?;
        let (min, max) = if self.auto_extrema {
            resolve_auto_extrema(scanned, self.scale_type)
        } else {
            (self.raw_min, self.raw_max)
        };
        validate_range(min, max)?;
        self.scale_type.to_scaled(min)?;
        let changed = min != self.raw_min || max != self.raw_max;
        self.raw_min = min;
        self.raw_max = max;
        Ok(changed)
    }

    /// Explicit pre-validation of a scale type against data, without mutating
    /// the axis.
    pub fn validate_scale_type<I>(&self, scale_type: ScaleType, values: I) -> ChartResult<()>
    where
        I: IntoIterator<Item = f64>,
    {
        scan_extrema(values, scale_type)?;
        if !self.auto_extrema {
            scale_type.to_scaled(self.raw_min)?;
        }
        Ok(())
    }

    /// Grows the range for one incrementally appended value.
    ///
    /// A value inside the current range is a no-op. Outside it, an auto axis
    /// moves the crossed bound to `max(value, bound + margin)` (or the mirrored
    /// minimum), so a run of close appends does not rescale on every sample.
    /// An explicit axis moves the crossed bound by the margin only.
    ///
    /// Returns whether the raw extrema changed. The range never shrinks.
    pub fn grow_incremental(&mut self, value: f64) -> ChartResult<bool> {
        self.scale_type.to_scaled(value)?;

        let margin = self.growth_margin;
        let mut min = self.raw_min;
        let mut max = self.raw_max;

        if value < min {
            let grown = min - margin;
            min = if self.auto_extrema {
                value.min(grown)
            } else {
                grown
            };
            if self.scale_type == ScaleType::Log && min <= 0.0 {
                min = if self.auto_extrema { value } else { self.raw_min };
            }
        }
        if value > max {
            let grown = max + margin;
            max = if self.auto_extrema {
                value.max(grown)
            } else {
                grown
            };
        }

        let changed = min != self.raw_min || max != self.raw_max;
        self.raw_min = min;
        self.raw_max = max;
        Ok(changed)
    }

    /// Tick spacing in scaled units for the given pixel density.
    ///
    /// Auto spacing converts the target pixel spacing into scaled units and
    /// rounds it to one significant digit. A result that rounds to zero (or is
    /// not finite) is replaced with the smallest positive `f64` so tick
    /// generation still advances.
    #[must_use]
    pub fn tick_increment(&self, pixels_per_unit: f64) -> f64 {
        match self.tick {
            TickIncrement::Fixed(value) => value,
            TickIncrement::Auto => {
                let raw = self.tick_spacing_px / pixels_per_unit;
                let rounded = round_to_significant_digits(raw, 1);
                if rounded.is_finite() && rounded > 0.0 {
                    rounded
                } else {
                    f64::MIN_POSITIVE
                }
            }
        }
    }

    /// Scaled tick positions inside the scaled range.
    ///
    /// Positive ticks start at `increment` (or at the range minimum when the
    /// whole range is positive) and negative ticks mirror that below zero.
    /// Zero itself is the axis line and is not emitted. Each side is capped at
    /// [`MAX_TICKS`].
    pub fn tick_values(&self, increment: f64) -> ChartResult<Vec<f64>> {
        if !increment.is_finite() || increment <= 0.0 {
            return Err(ChartError::InvalidData(
                "tick increment must be finite and > 0".to_owned(),
            ));
        }
        let (min, max) = self.scaled_extrema()?;
        let mut ticks = Vec::new();

        let start = if min > 0.0 { min } else { increment };
        for step in 0..MAX_TICKS {
            let value = start + increment * step as f64;
            if value > max {
                break;
            }
            if value >= min {
                ticks.push(value);
            }
        }

        let start = if max < 0.0 { max } else { -increment };
        for step in 0..MAX_TICKS {
            let value = start - increment * step as f64;
            if value < min {
                break;
            }
            if value <= max {
                ticks.push(value);
            }
        }

        ticks.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        ticks.dedup();
        Ok(ticks)
    }

    /// Formats a raw value for axis numbering.
    #[must_use]
    pub fn format(&self, raw: f64) -> String {
        self.number_format.format(raw)
    }

    /// Character width of the widest extrema label.
    #[must_use]
    pub fn widest_extrema_label_chars(&self) -> usize {
        let min_len = self.format(self.raw_min).chars().count();
        let max_len = self.format(self.raw_max).chars().count();
        min_len.max(max_len)
    }
}

/// Automatic extrema of a value set.
///
/// Degenerate data (`min == max`) is widened by ±0.5 (linear) or ÷10/×10
/// (log). When that step is lost to rounding, underflow or overflow, only the
/// side that survives moves (log) or a step relative to the value is used
/// (linear). An empty set falls back to the scale type's default range.
pub fn auto_extrema<I>(values: I, scale_type: ScaleType) -> ChartResult<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let scanned = scan_extrema(values, scale_type)?;
    Ok(resolve_auto_extrema(scanned, scale_type))
}

fn scan_extrema<I>(values: I, scale_type: ScaleType) -> ChartResult<Option<(f64, f64)>>
where
    I: IntoIterator<Item = f64>,
{
    let mut extrema: Option<(f64, f64)> = None;
    for value in values {
        if !value.is_finite() {
            return Err(ChartError::ModelContract(
                "data values must be finite".to_owned(),
            ));
        }
        if scale_type == ScaleType::Log && value <= 0.0 {
            return Err(ChartError::InvalidScale(format!(
                "logarithmic scale requires values > 0, data contains {value}"
            )));
        }
        extrema = Some(match extrema {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    Ok(extrema)
}

fn resolve_auto_extrema(scanned: Option<(f64, f64)>, scale_type: ScaleType) -> (f64, f64) {
    match scanned {
        None => scale_type.default_range(),
        Some((min, max)) if min == max => match scale_type {
            ScaleType::Linear => widen_linear(min),
            ScaleType::Log => widen_log(min),
        },
        Some(extrema) => extrema,
    }
}

// Relative step used once ±0.5 vanishes below the value's precision.
const DEGENERATE_RELATIVE_STEP: f64 = 1.0e-6;

fn widen_linear(value: f64) -> (f64, f64) {
    let (min, max) = (value - 0.5, value + 0.5);
    if min < max {
        return (min, max);
    }
    let step = value.abs() * DEGENERATE_RELATIVE_STEP;
    (
        (value - step).max(f64::MIN),
        (value + step).min(f64::MAX),
    )
}

fn widen_log(value: f64) -> (f64, f64) {
    let min = value / 10.0;
    let max = value * 10.0;
    (
        if min > 0.0 { min } else { value },
        if max.is_finite() { max } else { value },
    )
}

fn validate_range(min: f64, max: f64) -> ChartResult<()> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return Err(ChartError::InvalidRange { min, max });
    }
    Ok(())
}

/// Rounds `value` to `digits` significant digits.
#[must_use]
pub fn round_to_significant_digits(value: f64, digits: i32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return if value.is_finite() { 0.0 } else { value };
    }
    let exponent = value.abs().log10().floor() as i32 - (digits - 1);
    let magnitude = 10_f64.powi(exponent);
    if magnitude == 0.0 || !magnitude.is_finite() {
        return 0.0;
    }
    (value / magnitude).round() * magnitude
}
