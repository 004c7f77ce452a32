use serde::{Deserialize, Serialize};

use crate::core::bars::validate_slot_fill_ratio;
use crate::core::{
    AxisPadding, AxisScaler, DEFAULT_SLOT_FILL_RATIO, DEFAULT_TICK_SPACING_PX, LayoutStrategy,
    NumberFormat, ScaleType,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::SeriesStyle;

/// Initial extrema policy of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum AxisExtrema {
    /// Computed from the data on every full change.
    #[default]
    Auto,
    Explicit { min: f64, max: f64 },
}

/// Bootstrap configuration of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default)]
    pub scale_type: ScaleType,
    #[serde(default)]
    pub extrema: AxisExtrema,
    #[serde(default)]
    pub growth_margin: f64,
    #[serde(default = "default_tick_spacing_px")]
    pub tick_spacing_px: f64,
    /// `None` derives the increment from `tick_spacing_px`.
    #[serde(default)]
    pub tick_increment: Option<f64>,
    #[serde(default = "default_label_decimals")]
    pub label_decimals: u8,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            scale_type: ScaleType::Linear,
            extrema: AxisExtrema::Auto,
            growth_margin: 0.0,
            tick_spacing_px: default_tick_spacing_px(),
            tick_increment: None,
            label_decimals: default_label_decimals(),
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }

    #[must_use]
    pub fn with_extrema(mut self, min: f64, max: f64) -> Self {
        self.extrema = AxisExtrema::Explicit { min, max };
        self
    }

    #[must_use]
    pub fn with_growth_margin(mut self, margin: f64) -> Self {
        self.growth_margin = margin;
        self
    }

    #[must_use]
    pub fn with_tick_increment(mut self, increment: Option<f64>) -> Self {
        self.tick_increment = increment;
        self
    }

    /// Builds a validated axis from this config.
    pub fn build_scaler(&self) -> ChartResult<AxisScaler> {
        let mut axis = AxisScaler::new(self.scale_type);
        if let AxisExtrema::Explicit { min, max } = self.extrema {
            axis.set_extrema(min, max)?;
        }
        axis.set_growth_margin(self.growth_margin)?;
        axis.set_tick_spacing_px(self.tick_spacing_px)?;
        axis.set_tick_increment(self.tick_increment)?;
        axis.set_number_format(NumberFormat::fixed(self.label_decimals));
        Ok(axis)
    }
}

/// Colors and font size used for axes, grid and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAppearance {
    pub background: Color,
    pub foreground: Color,
    pub grid_color: Color,
    pub font_size_px: f64,
    pub axis_line_width: f64,
}

impl Default for ChartAppearance {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::BLACK,
            grid_color: Color::rgb(0.753, 0.753, 0.753),
            font_size_px: 10.0,
            axis_line_width: 1.0,
        }
    }
}

impl ChartAppearance {
    pub fn validate(self) -> ChartResult<Self> {
        self.background.validate()?;
        self.foreground.validate()?;
        self.grid_color.validate()?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.axis_line_width.is_finite() || self.axis_line_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis line width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can keep chart setup in a
/// config file. Number formatters are code and are injected at runtime through
/// `ChartEngine::set_number_format`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default)]
    pub y_axis: AxisConfig,
    #[serde(default)]
    pub layout: LayoutStrategy,
    #[serde(default)]
    pub style: SeriesStyle,
    #[serde(default)]
    pub padding: AxisPadding,
    #[serde(default = "default_grid_lines")]
    pub grid_lines: bool,
    #[serde(default = "default_slot_fill_ratio")]
    pub slot_fill_ratio: f64,
    #[serde(default)]
    pub appearance: ChartAppearance,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            layout: LayoutStrategy::default(),
            style: SeriesStyle::default(),
            padding: AxisPadding::default(),
            grid_lines: default_grid_lines(),
            slot_fill_ratio: default_slot_fill_ratio(),
            appearance: ChartAppearance::default(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(layout: LayoutStrategy) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, enabled: bool) -> Self {
        self.grid_lines = enabled;
        self
    }

    #[must_use]
    pub fn with_numbering(mut self, enabled: bool) -> Self {
        self.padding.numbering = enabled;
        self
    }

    #[must_use]
    pub fn with_slot_fill_ratio(mut self, ratio: f64) -> Self {
        self.slot_fill_ratio = ratio;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.style.validate()?;
        self.padding.validate()?;
        self.appearance.validate()?;
        validate_slot_fill_ratio(self.slot_fill_ratio)?;
        self.layout.validate_scales(
            self.layout.is_bar_layout(),
            self.x_axis.scale_type,
            self.y_axis.scale_type,
        )?;
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_tick_spacing_px() -> f64 {
    DEFAULT_TICK_SPACING_PX
}

fn default_label_decimals() -> u8 {
    1
}

fn default_grid_lines() -> bool {
    false
}

fn default_slot_fill_ratio() -> f64 {
    DEFAULT_SLOT_FILL_RATIO
}
