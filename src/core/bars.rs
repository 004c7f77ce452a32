use serde::{Deserialize, Serialize};

use crate::core::ViewportGeometry;
use crate::error::{ChartError, ChartResult};

/// Default share of a category's width covered by its bars.
pub const DEFAULT_SLOT_FILL_RATIO: f64 = 0.8;

/// Horizontal pixel extent available to one category (or one sub-bar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSlot {
    pub left: f64,
    pub width: f64,
}

impl BarSlot {
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// One projected bar in pixel coordinates (`y_top <= y_bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub category: usize,
    pub series: usize,
    pub value: f64,
    pub x: f64,
    pub width: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

impl BarRect {
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_bottom - self.y_top
    }

    pub(crate) fn spanning(
        category: usize,
        series: usize,
        value: f64,
        slot: BarSlot,
        y_a: f64,
        y_b: f64,
    ) -> Self {
        Self {
            category,
            series,
            value,
            x: slot.left,
            width: slot.width,
            y_top: y_a.min(y_b),
            y_bottom: y_a.max(y_b),
        }
    }
}

pub fn validate_slot_fill_ratio(ratio: f64) -> ChartResult<f64> {
    if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "bar slot fill ratio must be in (0, 1]".to_owned(),
        ));
    }
    Ok(ratio)
}

/// Pixel slot of category `index`, which spans data `[index, index + 1]`.
///
/// The slot covers `fill_ratio` of that span and is centred in it.
pub fn category_slot(
    geometry: &ViewportGeometry,
    index: usize,
    fill_ratio: f64,
) -> ChartResult<BarSlot> {
    let fill_ratio = validate_slot_fill_ratio(fill_ratio)?;
    let left_edge = geometry.x_to_screen(index as f64)?;
    let right_edge = geometry.x_to_screen(index as f64 + 1.0)?;
    let full = right_edge - left_edge;
    let width = full * fill_ratio;
    Ok(BarSlot::new(left_edge + (full - width) / 2.0, width))
}

/// Raw x extent covered by `category_count` categories.
#[must_use]
pub fn category_x_range(category_count: usize) -> (f64, f64) {
    (0.0, category_count.max(1) as f64)
}
