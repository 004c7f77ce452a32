use tracing::debug;

use crate::core::bars::validate_slot_fill_ratio;
use crate::core::{
    Axis, AxisScaler, ChartData, LayoutStrategy, NumberFormat, ScaleType, ViewportGeometry,
};
use crate::error::ChartResult;
use crate::render::{Color, RenderFrame, Renderer};

use super::chart_view::{ChartView, ExtremaPass};
use super::{ChartAppearance, ChartEngine, MarkerStyle, RedrawKind, RenderStats, SeriesStyle};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &AxisScaler {
        match axis {
            Axis::X => &self.view.axis_x,
            Axis::Y => &self.view.axis_y,
        }
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&ViewportGeometry> {
        self.geometry.as_ref()
    }

    /// Frame currently shown by the renderer.
    #[must_use]
    pub fn presented_frame(&self) -> Option<&RenderFrame> {
        self.presented.as_ref()
    }

    #[must_use]
    pub fn layout_strategy(&self) -> LayoutStrategy {
        self.view.layout
    }

    #[must_use]
    pub fn series_style(&self) -> &SeriesStyle {
        &self.view.style
    }

    #[must_use]
    pub fn grid_lines(&self) -> bool {
        self.view.grid_lines
    }

    #[must_use]
    pub fn numbering(&self) -> bool {
        self.view.padding.numbering
    }

    #[must_use]
    pub fn render_stats(&self) -> RenderStats {
        self.stats
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the backend, e.g. to resize its surface. Call
    /// [`ChartEngine::resize_notified`] afterwards.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Fixes the axis extrema and disables auto extrema.
    pub fn set_extrema(&mut self, axis: Axis, min: f64, max: f64) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            axis_mut(view, axis).set_extrema(min, max)
        })
    }

    /// Re-enables auto extrema and rescans the data.
    pub fn set_auto_extrema(&mut self, axis: Axis) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Refresh, |view| {
            axis_mut(view, axis).set_auto_extrema();
            Ok(())
        })
    }

    /// Switches the scale type. Data that cannot be plotted under the new
    /// scale fails with `InvalidScale` and leaves the axis unchanged.
    pub fn set_scale_type(&mut self, axis: Axis, scale_type: ScaleType) -> ChartResult<RedrawKind> {
        if self.axis(axis).scale_type() == scale_type {
            return Ok(RedrawKind::Unchanged);
        }
        self.update_view(ExtremaPass::Refresh, |view| {
            axis_mut(view, axis).set_scale_type(scale_type);
            Ok(())
        })
    }

    /// Checks whether the current data can be plotted under `scale_type`
    /// without changing anything.
    pub fn validate_scale_type(&self, axis: Axis, scale_type: ScaleType) -> ChartResult<()> {
        let layout = self.view.layout;
        match axis {
            Axis::X => {
                let categorical = self.data.is_categorical();
                layout.validate_scales(categorical, scale_type, self.view.axis_y.scale_type())?;
                self.view
                    .axis_x
                    .validate_scale_type(scale_type, layout.x_extrema_values(&self.data))
            }
            Axis::Y => {
                let categorical = self.data.is_categorical();
                layout.validate_scales(categorical, self.view.axis_x.scale_type(), scale_type)?;
                self.view.axis_y.validate_scale_type(
                    scale_type,
                    layout.y_extrema_values(&self.data, scale_type),
                )
            }
        }
    }

    /// Growth margin only affects future appends; nothing is redrawn.
    pub fn set_growth_margin(&mut self, axis: Axis, margin: f64) -> ChartResult<()> {
        let mut view = self.view.clone();
        axis_mut(&mut view, axis).set_growth_margin(margin)?;
        self.view = view;
        Ok(())
    }

    /// `None` switches back to auto tick spacing.
    pub fn set_tick_increment(
        &mut self,
        axis: Axis,
        increment: Option<f64>,
    ) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            axis_mut(view, axis).set_tick_increment(increment)
        })
    }

    pub fn set_tick_spacing_px(&mut self, axis: Axis, spacing_px: f64) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            axis_mut(view, axis).set_tick_spacing_px(spacing_px)
        })
    }

    /// Installs a label formatter; the y-label gutter follows its output width.
    pub fn set_number_format(
        &mut self,
        axis: Axis,
        format: NumberFormat,
    ) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            axis_mut(view, axis).set_number_format(format);
            Ok(())
        })
    }

    /// Swaps the layout strategy. Axis settings are kept; auto extrema are
    /// recomputed with the new layout's rule.
    pub fn set_layout_strategy(&mut self, layout: LayoutStrategy) -> ChartResult<RedrawKind> {
        debug!(from = self.view.layout.name(), to = layout.name(), "layout swap");
        self.update_view(ExtremaPass::Refresh, |view| {
            view.layout = layout;
            Ok(())
        })
    }

    pub fn set_palette(&mut self, palette: Vec<Color>) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            view.style.palette = palette;
            view.style.validate()
        })
    }

    pub fn set_marker_style(&mut self, marker: MarkerStyle) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            view.style.marker = marker.validate()?;
            Ok(())
        })
    }

    pub fn set_grid_lines(&mut self, enabled: bool) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            view.grid_lines = enabled;
            Ok(())
        })
    }

    /// Turns axis numbering on or off; the left gutter shrinks to the axis
    /// pad without it.
    pub fn set_numbering(&mut self, enabled: bool) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            view.padding.numbering = enabled;
            Ok(())
        })
    }

    pub fn set_slot_fill_ratio(&mut self, ratio: f64) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            view.slot_fill_ratio = validate_slot_fill_ratio(ratio)?;
            Ok(())
        })
    }

    pub fn set_appearance(&mut self, appearance: ChartAppearance) -> ChartResult<RedrawKind> {
        self.update_view(ExtremaPass::Keep, |view| {
            view.appearance = appearance.validate()?;
            Ok(())
        })
    }

    /// Applies `mutate` to a candidate view and redraws with it; the engine is
    /// untouched when either step fails.
    fn update_view(
        &mut self,
        pass: ExtremaPass,
        mutate: impl FnOnce(&mut ChartView) -> ChartResult<()>,
    ) -> ChartResult<RedrawKind> {
        let mut view = self.view.clone();
        mutate(&mut view)?;
        self.redraw_with(None, view, pass)
    }
}

fn axis_mut(view: &mut ChartView, axis: Axis) -> &mut AxisScaler {
    match axis {
        Axis::X => &mut view.axis_x,
        Axis::Y => &mut view.axis_y,
    }
}
