use serde::{Deserialize, Serialize};

/// Outcome of one redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedrawKind {
    /// Extrema/geometry recomputed and every series redrawn.
    Full,
    /// Only the appended primitives were added to the presented frame.
    Incremental,
    /// The surface is too small to hold a plot; nothing was drawn.
    Skipped,
    /// Nothing needed redrawing.
    Unchanged,
}

/// Redraw counters, useful to assert that the cheap path is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderStats {
    pub full_redraws: u64,
    pub incremental_draws: u64,
    pub skipped_redraws: u64,
    pub last_kind: Option<RedrawKind>,
}

impl RenderStats {
    pub(super) fn record(&mut self, kind: RedrawKind) {
        match kind {
            RedrawKind::Full => self.full_redraws += 1,
            RedrawKind::Incremental => self.incremental_draws += 1,
            RedrawKind::Skipped => self.skipped_redraws += 1,
            RedrawKind::Unchanged => {}
        }
        self.last_kind = Some(kind);
    }
}
