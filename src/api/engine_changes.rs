use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::scatter::project_marker;
use crate::core::{AppendedPoint, ChartData, DataChange, MarkerGeometry, category_x_range};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::chart_view::ExtremaPass;
use super::engine::full_pass;
use super::render_frame_builder::{category_label, push_bars, push_markers};
use super::{ChartEngine, RedrawKind};

impl<R: Renderer> ChartEngine<R> {
    /// Applies every queued model change, in order, on the calling thread.
    ///
    /// Stops at the first failing change and returns its error; later changes
    /// stay queued.
    pub fn process_pending_changes(&mut self) -> ChartResult<usize> {
        let mut processed = 0;
        while let Some(change) = self.inbox.pop() {
            self.on_data_changed(change)?;
            processed += 1;
        }
        Ok(processed)
    }

    #[must_use]
    pub fn pending_change_count(&self) -> usize {
        self.inbox.len()
    }

    /// Reacts to one model change.
    ///
    /// A full change rescans extrema and redraws everything. An append grows
    /// both axes; when neither extrema nor surface changed, only the new
    /// primitives are added to the presented frame.
    pub fn on_data_changed(&mut self, change: DataChange) -> ChartResult<RedrawKind> {
        match change {
            DataChange::Full(snapshot) => {
                let data = Arc::unwrap_or_clone(snapshot);
                debug!(series = data.series_count(), "full data change");
                self.redraw_with(Some(data), self.view.clone(), ExtremaPass::Refresh)
            }
            DataChange::PointsAppended(points) => {
                self.validate_appended_points(&points)?;
                if points.is_empty() {
                    return Ok(RedrawKind::Unchanged);
                }
                self.push_points(&points);
                let result = self.draw_appended_points(&points);
                if result.is_err() {
                    self.pop_points(&points);
                }
                result
            }
            DataChange::CategoryAppended { label, values } => {
                self.validate_appended_category(&values)?;
                let category = self.push_category(label, &values)?;
                let result = self.draw_appended_category(category);
                if result.is_err() {
                    self.pop_category();
                }
                result
            }
        }
    }

    fn validate_appended_points(&self, points: &[AppendedPoint]) -> ChartResult<()> {
        let ChartData::Points(series) = &self.data else {
            return Err(ChartError::ModelContract(
                "points appended to a category table".to_owned(),
            ));
        };
        for (offset, appended) in points.iter().enumerate() {
            let target = series.get(appended.series_index).ok_or_else(|| {
                ChartError::ModelContract(format!(
                    "point appended to unknown series {}",
                    appended.series_index
                ))
            })?;
            let earlier = points[..offset]
                .iter()
                .filter(|other| other.series_index == appended.series_index)
                .count();
            if appended.point_index != target.len() + earlier {
                return Err(ChartError::ModelContract(format!(
                    "series {} appended point {} but holds {} points",
                    appended.series_index,
                    appended.point_index,
                    target.len() + earlier
                )));
            }
            if !appended.point.is_finite() {
                return Err(ChartError::ModelContract(
                    "appended point must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    fn validate_appended_category(&self, values: &[f64]) -> ChartResult<()> {
        let ChartData::Categories(table) = &self.data else {
            return Err(ChartError::ModelContract(
                "category appended to point series".to_owned(),
            ));
        };
        if values.len() != table.series.len() {
            return Err(ChartError::ModelContract(format!(
                "category carries {} values for {} series",
                values.len(),
                table.series.len()
            )));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::ModelContract(
                "appended category values must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    fn push_points(&mut self, points: &[AppendedPoint]) {
        if let ChartData::Points(series) = &mut self.data {
            for appended in points {
                if let Some(target) = series.get_mut(appended.series_index) {
                    target.points.push(appended.point);
                }
            }
        }
    }

    fn pop_points(&mut self, points: &[AppendedPoint]) {
        if let ChartData::Points(series) = &mut self.data {
            for appended in points.iter().rev() {
                if let Some(target) = series.get_mut(appended.series_index) {
                    target.points.pop();
                }
            }
        }
    }

    fn push_category(&mut self, label: String, values: &[f64]) -> ChartResult<usize> {
        let ChartData::Categories(table) = &mut self.data else {
            return Err(ChartError::ModelContract(
                "category appended to point series".to_owned(),
            ));
        };
        table.categories.push(label);
        for (series, value) in table.series.iter_mut().zip(values) {
            series.values.push(*value);
        }
        Ok(table.category_count() - 1)
    }

    fn pop_category(&mut self) {
        if let ChartData::Categories(table) = &mut self.data {
            table.categories.pop();
            for series in &mut table.series {
                series.values.pop();
            }
        }
    }

    /// Draws points already pushed into the engine's data.
    fn draw_appended_points(&mut self, points: &[AppendedPoint]) -> ChartResult<RedrawKind> {
        let mut axis_x = self.view.axis_x.clone();
        let mut axis_y = self.view.axis_y.clone();
        let mut extrema_changed = false;
        for appended in points {
            extrema_changed |= axis_x.grow_incremental(appended.point.x)?;
            extrema_changed |= axis_y.grow_incremental(appended.point.y)?;
        }

        let surface = self.renderer.surface_size();
        if !extrema_changed {
            if let (Some(geometry), Some(frame)) = (self.geometry, self.presented.as_mut()) {
                if geometry.surface() == surface {
                    let half_size = self.view.style.marker.half_size_px;
                    let markers = points
                        .iter()
                        .map(|appended| {
                            project_marker(
                                appended.series_index,
                                appended.point_index,
                                appended.point,
                                &geometry,
                                half_size,
                            )
                        })
                        .collect::<ChartResult<Vec<MarkerGeometry>>>()?;

                    let markers_before = frame.markers.len();
                    push_markers(frame, &self.view, &markers);
                    if let Err(err) = self.renderer.render(frame) {
                        frame.markers.truncate(markers_before);
                        return Err(err);
                    }
                    trace!(points = points.len(), "incremental point draw");
                    self.stats.record(RedrawKind::Incremental);
                    return Ok(RedrawKind::Incremental);
                }
            }
        }

        let mut view = self.view.clone();
        view.axis_x = axis_x;
        view.axis_y = axis_y;
        match full_pass(&mut self.renderer, &self.data, &mut view, ExtremaPass::Keep) {
            Ok(outcome) => Ok(self.commit_full(None, view, outcome)),
            Err(err) => {
                warn!(error = %err, "incremental rescale rolled back");
                Err(err)
            }
        }
    }

    /// Draws a category already pushed into the engine's data.
    fn draw_appended_category(&mut self, category: usize) -> ChartResult<RedrawKind> {
        let ChartData::Categories(table) = &self.data else {
            return Err(ChartError::ModelContract(
                "category appended to point series".to_owned(),
            ));
        };

        let mut axis_x = self.view.axis_x.clone();
        let mut axis_y = self.view.axis_y.clone();
        let (_, x_end) = category_x_range(category + 1);
        let mut extrema_changed = axis_x.grow_incremental(x_end)?;
        for value in self
            .view
            .layout
            .category_y_values(table, category, axis_y.scale_type())
        {
            extrema_changed |= axis_y.grow_incremental(value)?;
        }

        let surface = self.renderer.surface_size();
        if !extrema_changed {
            if let (Some(geometry), Some(frame)) = (self.geometry, self.presented.as_mut()) {
                if geometry.surface() == surface {
                    let bars = self.view.layout.project_category(
                        table,
                        category,
                        &geometry,
                        self.view.layout_params(),
                    )?;
                    let label = category_label(table, category, &self.view, &geometry)?;

                    let rects_before = frame.rects.len();
                    let texts_before = frame.texts.len();
                    push_bars(frame, &self.view, &bars);
                    frame.texts.extend(label);
                    if let Err(err) = self.renderer.render(frame) {
                        frame.rects.truncate(rects_before);
                        frame.texts.truncate(texts_before);
                        return Err(err);
                    }
                    trace!(category, bars = bars.len(), "incremental category draw");
                    self.stats.record(RedrawKind::Incremental);
                    return Ok(RedrawKind::Incremental);
                }
            }
        }

        let mut view = self.view.clone();
        view.axis_x = axis_x;
        view.axis_y = axis_y;
        match full_pass(&mut self.renderer, &self.data, &mut view, ExtremaPass::Keep) {
            Ok(outcome) => Ok(self.commit_full(None, view, outcome)),
            Err(err) => {
                warn!(error = %err, "incremental rescale rolled back");
                Err(err)
            }
        }
    }
}
