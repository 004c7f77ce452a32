use serde::{Deserialize, Serialize};

use crate::core::{LayoutGeometry, LayoutStrategy, ScaleType, TickIncrement, Viewport, ViewportGeometry};

use super::RenderStats;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub scale_type: ScaleType,
    pub raw_extrema: (f64, f64),
    pub auto_extrema: bool,
    pub growth_margin: f64,
    pub tick: TickIncrement,
    pub tick_spacing_px: f64,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub surface: Viewport,
    pub layout: LayoutStrategy,
    pub x_axis: AxisSnapshot,
    pub y_axis: AxisSnapshot,
    pub geometry: Option<ViewportGeometry>,
    pub series_count: usize,
    pub categorical: bool,
    pub layout_geometry: Option<LayoutGeometry>,
    pub stats: RenderStats,
}
