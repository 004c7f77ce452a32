pub mod axis;
pub mod bars;
pub mod geometry;
pub mod grouped_bars;
pub mod layered_bars;
pub mod layout;
pub mod model;
pub mod scatter;
pub mod series;
pub mod stacked_bars;
pub mod types;

pub use axis::{
    AxisScaler, DEFAULT_TICK_SPACING_PX, MAX_TICKS, NumberFormat, ScaleType, TickIncrement,
    auto_extrema, round_to_significant_digits,
};
pub use bars::{BarRect, BarSlot, DEFAULT_SLOT_FILL_RATIO, category_slot, category_x_range};
pub use geometry::{AxisPadding, ViewportGeometry};
pub use grouped_bars::grouped_sub_slots;
pub use layered_bars::layered_draw_order;
pub use layout::{LayoutGeometry, LayoutParams, LayoutStrategy};
pub use model::{
    AppendedPoint, ChangeInbox, ChangeListener, CursorCategoryModel, CursorDataModel, DataChange,
    DataModel, InMemoryDataModel, SharedModel, SubscriptionId, capture_category_table,
    capture_point_series,
};
pub use scatter::MarkerGeometry;
pub use series::{CategorySeries, CategoryTable, ChartData, Series};
pub use stacked_bars::category_running_sums;
pub use types::{Axis, DataPoint, PixelPoint, Viewport};
