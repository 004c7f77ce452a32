use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::core::{
    ChangeInbox, ChartData, DataModel, DataPoint, PixelPoint, SubscriptionId, ViewportGeometry,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::chart_view::{ChartView, ExtremaPass};
use super::render_frame_builder::build_full_frame;
use super::{ChartEngineConfig, RedrawKind, RenderStats};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// A data model shared between the engine and the threads that feed it.
pub type SharedDataModel = Arc<Mutex<dyn DataModel>>;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns both axes, the derived geometry and the series style.
/// It listens to a [`DataModel`], recomputes extrema and geometry when the
/// data changes and hands complete frames to its renderer.
///
/// All state lives on the thread that owns the engine. Model notifications
/// are queued and applied by [`ChartEngine::process_pending_changes`].
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) model: SharedDataModel,
    pub(super) subscription: SubscriptionId,
    pub(super) inbox: ChangeInbox,
    pub(super) data: ChartData,
    pub(super) view: ChartView,
    pub(super) geometry: Option<ViewportGeometry>,
    pub(super) presented: Option<RenderFrame>,
    pub(super) stats: RenderStats,
}

impl<R: Renderer> ChartEngine<R> {
    /// Subscribes to `model`, captures its data and performs the first full
    /// redraw.
    pub fn new(renderer: R, model: SharedDataModel, config: ChartEngineConfig) -> ChartResult<Self> {
        let view = ChartView::from_config(&config)?;
        let inbox = ChangeInbox::new();
        let (subscription, data) = attach_model(&model, &inbox)?;

        let mut engine = Self {
            renderer,
            model,
            subscription,
            inbox,
            data,
            view: view.clone(),
            geometry: None,
            presented: None,
            stats: RenderStats::default(),
        };
        engine.redraw_with(None, view, ExtremaPass::Refresh)?;
        Ok(engine)
    }

    /// Replaces the data model: unsubscribes from the current one, subscribes
    /// to `model` and redraws from its data. On failure the current model
    /// stays installed.
    pub fn set_model(&mut self, model: SharedDataModel) -> ChartResult<RedrawKind> {
        let inbox = ChangeInbox::new();
        let (subscription, data) = attach_model(&model, &inbox)?;

        let mut view = self.view.clone();
        let outcome = match full_pass(&mut self.renderer, &data, &mut view, ExtremaPass::Refresh) {
            Ok(outcome) => outcome,
            Err(err) => {
                model.lock().unsubscribe(subscription);
                warn!(error = %err, "model swap rolled back");
                return Err(err);
            }
        };

        self.model.lock().unsubscribe(self.subscription);
        self.model = model;
        self.subscription = subscription;
        self.inbox = inbox;
        debug!(series = data.series_count(), "data model replaced");
        Ok(self.commit_full(Some(data), view, outcome))
    }

    /// Drops queued changes and redraws from a fresh model snapshot.
    pub fn resync(&mut self) -> ChartResult<RedrawKind> {
        let data = {
            let model = self.model.lock();
            self.inbox.clear();
            model.snapshot()?
        };
        self.redraw_with(Some(data), self.view.clone(), ExtremaPass::Refresh)
    }

    /// Full redraw with the current extrema, e.g. after the surface changed.
    pub fn redraw(&mut self) -> ChartResult<RedrawKind> {
        self.redraw_with(None, self.view.clone(), ExtremaPass::Keep)
    }

    /// Redraws only when the renderer's surface size differs from the size
    /// the current geometry was computed for.
    pub fn resize_notified(&mut self) -> ChartResult<RedrawKind> {
        let surface = self.renderer.surface_size();
        if self.geometry.is_some_and(|geometry| geometry.surface() == surface) {
            return Ok(RedrawKind::Unchanged);
        }
        self.redraw()
    }

    pub fn data_to_screen(&self, x: f64, y: f64) -> ChartResult<PixelPoint> {
        self.require_geometry()?.data_to_screen(x, y)
    }

    pub fn screen_to_data(&self, pixel: PixelPoint) -> ChartResult<DataPoint> {
        self.require_geometry()?.screen_to_data(pixel)
    }

    /// Presents the last frame on an external cairo context, for example from
    /// a toolkit paint callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        match &self.presented {
            Some(frame) => self.renderer.render_on_cairo_context(context, frame),
            None => Ok(()),
        }
    }

    pub(super) fn require_geometry(&self) -> ChartResult<&ViewportGeometry> {
        self.geometry.as_ref().ok_or_else(|| {
            let surface = self.renderer.surface_size();
            ChartError::InvalidViewport {
                width: surface.width,
                height: surface.height,
            }
        })
    }

    /// Runs a full pass over `data` (or the current data) with a candidate
    /// view and commits both only when the pass succeeds.
    pub(super) fn redraw_with(
        &mut self,
        data: Option<ChartData>,
        mut view: ChartView,
        pass: ExtremaPass,
    ) -> ChartResult<RedrawKind> {
        let result = {
            let current = data.as_ref().unwrap_or(&self.data);
            full_pass(&mut self.renderer, current, &mut view, pass)
        };
        match result {
            Ok(outcome) => Ok(self.commit_full(data, view, outcome)),
            Err(err) => {
                warn!(error = %err, "full recompute rolled back");
                Err(err)
            }
        }
    }

    pub(super) fn commit_full(
        &mut self,
        data: Option<ChartData>,
        view: ChartView,
        outcome: Option<(ViewportGeometry, RenderFrame)>,
    ) -> RedrawKind {
        if let Some(data) = data {
            self.data = data;
        }
        self.view = view;
        let kind = match outcome {
            Some((geometry, frame)) => {
                debug!(
                    x_extrema = ?self.view.axis_x.raw_extrema(),
                    y_extrema = ?self.view.axis_y.raw_extrema(),
                    layout = self.view.layout.name(),
                    primitives = frame.primitive_count(),
                    "full redraw committed"
                );
                self.geometry = Some(geometry);
                self.presented = Some(frame);
                RedrawKind::Full
            }
            None => {
                self.geometry = None;
                self.presented = None;
                RedrawKind::Skipped
            }
        };
        self.stats.record(kind);
        kind
    }
}

impl<R: Renderer> Drop for ChartEngine<R> {
    fn drop(&mut self) {
        self.model.lock().unsubscribe(self.subscription);
    }
}

/// Subscribes the inbox and captures a snapshot under one model lock, so no
/// change can fall between the two.
fn attach_model(
    model: &SharedDataModel,
    inbox: &ChangeInbox,
) -> ChartResult<(SubscriptionId, ChartData)> {
    let mut guard = model.lock();
    let subscription = guard.subscribe(inbox.listener());
    match guard.snapshot().and_then(|data| data.validate().map(|()| data)) {
        Ok(data) => Ok((subscription, data)),
        Err(err) => {
            guard.unsubscribe(subscription);
            Err(err)
        }
    }
}

/// Recomputes axes and geometry for `data`, builds the whole frame off-screen
/// and presents it.
///
/// Returns `None` when the surface cannot hold a plot; that is not an error.
pub(super) fn full_pass<R: Renderer>(
    renderer: &mut R,
    data: &ChartData,
    view: &mut ChartView,
    pass: ExtremaPass,
) -> ChartResult<Option<(ViewportGeometry, RenderFrame)>> {
    view.prepare_axes(data, pass)?;
    let surface = renderer.surface_size();
    let geometry =
        match ViewportGeometry::recompute(&view.axis_x, &view.axis_y, surface, view.padding) {
            Ok(geometry) => geometry,
            Err(ChartError::InvalidViewport { width, height }) => {
                warn!(width, height, "surface too small to plot, redraw skipped");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
    let frame = build_full_frame(data, view, &geometry)?;
    renderer.render(&frame)?;
    Ok(Some((geometry, frame)))
}
