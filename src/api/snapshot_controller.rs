use crate::core::AxisScaler;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{AxisSnapshot, ChartEngine, EngineSnapshot};

fn axis_snapshot(axis: &AxisScaler) -> AxisSnapshot {
    AxisSnapshot {
        scale_type: axis.scale_type(),
        raw_extrema: axis.raw_extrema(),
        auto_extrema: axis.is_auto_extrema(),
        growth_margin: axis.growth_margin(),
        tick: axis.tick_policy(),
        tick_spacing_px: axis.tick_spacing_px(),
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    pub fn snapshot(&self) -> ChartResult<EngineSnapshot> {
        let layout_geometry = match &self.geometry {
            Some(geometry) => Some(self.view.layout.project(
                &self.data,
                geometry,
                self.view.layout_params(),
            )?),
            None => None,
        };
        Ok(EngineSnapshot {
            surface: self.renderer.surface_size(),
            layout: self.view.layout,
            x_axis: axis_snapshot(&self.view.axis_x),
            y_axis: axis_snapshot(&self.view.axis_y),
            geometry: self.geometry,
            series_count: self.data.series_count(),
            categorical: self.data.is_categorical(),
            layout_geometry,
            stats: self.stats,
        })
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
