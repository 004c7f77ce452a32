use crate::core::{AxisPadding, AxisScaler, ChartData, LayoutParams, LayoutStrategy};
use crate::error::ChartResult;

use super::{ChartAppearance, ChartEngineConfig, SeriesStyle};

/// Everything that shapes a frame apart from the data itself.
///
/// Mutations are applied to a clone and committed only after the redraw they
/// trigger succeeds.
#[derive(Debug, Clone)]
pub(super) struct ChartView {
    pub(super) axis_x: AxisScaler,
    pub(super) axis_y: AxisScaler,
    pub(super) layout: LayoutStrategy,
    pub(super) style: SeriesStyle,
    pub(super) padding: AxisPadding,
    pub(super) grid_lines: bool,
    pub(super) slot_fill_ratio: f64,
    pub(super) appearance: ChartAppearance,
}

/// Whether a full pass rescans the data for auto extrema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ExtremaPass {
    Refresh,
    Keep,
}

impl ChartView {
    pub(super) fn from_config(config: &ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            axis_x: config.x_axis.build_scaler()?,
            axis_y: config.y_axis.build_scaler()?,
            layout: config.layout,
            style: config.style.clone(),
            padding: config.padding,
            grid_lines: config.grid_lines,
            slot_fill_ratio: config.slot_fill_ratio,
            appearance: config.appearance,
        })
    }

    pub(super) fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            slot_fill_ratio: self.slot_fill_ratio,
            marker_half_size: self.style.marker.half_size_px,
        }
    }

    /// Checks the data against the layout and scale types, then (for
    /// [`ExtremaPass::Refresh`]) recomputes auto extrema.
    pub(super) fn prepare_axes(&mut self, data: &ChartData, pass: ExtremaPass) -> ChartResult<()> {
        data.validate()?;
        self.layout.validate_data(data)?;
        self.layout.validate_scales(
            data.is_categorical(),
            self.axis_x.scale_type(),
            self.axis_y.scale_type(),
        )?;
        let x_values = self.layout.x_extrema_values(data);
        let y_values = self.layout.y_extrema_values(data, self.axis_y.scale_type());
        match pass {
            ExtremaPass::Refresh => {
                self.axis_x.refresh_extrema(x_values)?;
                self.axis_y.refresh_extrema(y_values)?;
            }
            ExtremaPass::Keep => {
                self.axis_x.validate_scale_type(self.axis_x.scale_type(), x_values)?;
                self.axis_y.validate_scale_type(self.axis_y.scale_type(), y_values)?;
            }
        }
        Ok(())
    }
}
