mod chart_view;
mod engine;
mod engine_accessors;
mod engine_changes;
mod engine_config;
mod engine_snapshot;
mod render_frame_builder;
mod render_stats;
mod series_style;
mod snapshot_controller;

pub use engine::{ChartEngine, SharedDataModel};
pub use engine_config::{AxisConfig, AxisExtrema, ChartAppearance, ChartEngineConfig};
pub use engine_snapshot::{AxisSnapshot, EngineSnapshot};
pub use render_stats::{RedrawKind, RenderStats};
pub use series_style::{DEFAULT_MARKER_HALF_SIZE_PX, DEFAULT_PALETTE, MarkerStyle, SeriesStyle};
