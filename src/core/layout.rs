use serde::{Deserialize, Serialize};

use crate::core::bars::{BarRect, category_x_range};
use crate::core::grouped_bars::{project_grouped_bars, project_grouped_category};
use crate::core::layered_bars::{project_layered_bars, project_layered_category};
use crate::core::scatter::{MarkerGeometry, project_markers};
use crate::core::stacked_bars::{
    category_running_sums, project_stacked_bars, project_stacked_category,
    stacked_extrema_values,
};
use crate::core::{CategoryTable, ChartData, ScaleType, ViewportGeometry};
use crate::error::{ChartError, ChartResult};

/// Drawing algorithm applied to the chart's series.
///
/// Strategies are stateless: every call works from the engine's current
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutStrategy {
    /// Each category slot split into one sub-bar per series.
    GroupedBars,
    /// Full-width bars per category, painted largest value first.
    LayeredBars,
    /// Series stacked on top of each other per category.
    StackedBars,
    /// One marker per `(x, y)` sample.
    #[default]
    ScatterMarkers,
}

/// Geometry produced by one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutGeometry {
    Bars(Vec<BarRect>),
    Markers(Vec<MarkerGeometry>),
}

impl LayoutGeometry {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bars(bars) => bars.len(),
            Self::Markers(markers) => markers.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-layout projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub slot_fill_ratio: f64,
    pub marker_half_size: f64,
}

impl LayoutStrategy {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GroupedBars => "grouped-bars",
            Self::LayeredBars => "layered-bars",
            Self::StackedBars => "stacked-bars",
            Self::ScatterMarkers => "scatter-markers",
        }
    }

    #[must_use]
    pub fn is_bar_layout(self) -> bool {
        !matches!(self, Self::ScatterMarkers)
    }

    /// Bar layouts consume category tables, scatter consumes point series.
    pub fn validate_data(self, data: &ChartData) -> ChartResult<()> {
        if self.is_bar_layout() != data.is_categorical() {
            let expected = if self.is_bar_layout() {
                "category"
            } else {
                "point"
            };
            return Err(ChartError::InvalidData(format!(
                "layout `{}` requires {expected} data",
                self.name()
            )));
        }
        Ok(())
    }

    /// Category charts need a linear x axis. Stacked bars also need a linear
    /// y axis: stacks add heights in pixel space, which only matches the
    /// running sums on a linear scale.
    pub fn validate_scales(
        self,
        categorical: bool,
        x_scale: ScaleType,
        y_scale: ScaleType,
    ) -> ChartResult<()> {
        if categorical && x_scale == ScaleType::Log {
            return Err(ChartError::InvalidScale(
                "category charts require a linear x axis".to_owned(),
            ));
        }
        if self == Self::StackedBars && y_scale == ScaleType::Log {
            return Err(ChartError::InvalidScale(
                "stacked bars require a linear y axis".to_owned(),
            ));
        }
        Ok(())
    }

    /// Raw x values the x axis auto-extrema must cover.
    #[must_use]
    pub fn x_extrema_values(self, data: &ChartData) -> Vec<f64> {
        match data {
            ChartData::Points(_) => data.x_values().collect(),
            ChartData::Categories(table) => {
                let (start, end) = category_x_range(table.category_count());
                vec![start, end]
            }
        }
    }

    /// Raw y values the y axis auto-extrema must cover.
    ///
    /// Stacked bars contribute running per-category sums. Bar layouts on a
    /// linear axis also include the zero baseline.
    #[must_use]
    pub fn y_extrema_values(self, data: &ChartData, y_scale: ScaleType) -> Vec<f64> {
        match data {
            ChartData::Points(_) => data.y_values().collect(),
            ChartData::Categories(table) => {
                let mut values = match self {
                    Self::StackedBars => stacked_extrema_values(table),
                    _ => data.y_values().collect(),
                };
                if y_scale == ScaleType::Linear {
                    values.push(0.0);
                }
                values
            }
        }
    }

    /// Raw y values bounding a single category, used for incremental growth.
    #[must_use]
    pub fn category_y_values(
        self,
        table: &CategoryTable,
        category: usize,
        y_scale: ScaleType,
    ) -> Vec<f64> {
        let mut values = match self {
            Self::StackedBars => category_running_sums(table.category_values(category)),
            _ => table.category_values(category).collect(),
        };
        if y_scale == ScaleType::Linear {
            values.push(0.0);
        }
        values
    }

    /// Projects every series.
    pub fn project(
        self,
        data: &ChartData,
        geometry: &ViewportGeometry,
        params: LayoutParams,
    ) -> ChartResult<LayoutGeometry> {
        match (self, data) {
            (Self::ScatterMarkers, ChartData::Points(series)) => Ok(LayoutGeometry::Markers(
                project_markers(series, geometry, params.marker_half_size)?,
            )),
            (Self::GroupedBars, ChartData::Categories(table)) => Ok(LayoutGeometry::Bars(
                project_grouped_bars(table, geometry, params.slot_fill_ratio)?,
            )),
            (Self::LayeredBars, ChartData::Categories(table)) => Ok(LayoutGeometry::Bars(
                project_layered_bars(table, geometry, params.slot_fill_ratio)?,
            )),
            (Self::StackedBars, ChartData::Categories(table)) => Ok(LayoutGeometry::Bars(
                project_stacked_bars(table, geometry, params.slot_fill_ratio)?,
            )),
            _ => self.validate_data(data).map(|()| LayoutGeometry::Bars(Vec::new())),
        }
    }

    /// Projects the bars of one category only.
    pub fn project_category(
        self,
        table: &CategoryTable,
        category: usize,
        geometry: &ViewportGeometry,
        params: LayoutParams,
    ) -> ChartResult<Vec<BarRect>> {
        match self {
            Self::GroupedBars => {
                project_grouped_category(table, category, geometry, params.slot_fill_ratio)
            }
            Self::LayeredBars => {
                project_layered_category(table, category, geometry, params.slot_fill_ratio)
            }
            Self::StackedBars => {
                project_stacked_category(table, category, geometry, params.slot_fill_ratio)
            }
            Self::ScatterMarkers => Err(ChartError::InvalidData(
                "layout `scatter-markers` has no category bars".to_owned(),
            )),
        }
    }
}
