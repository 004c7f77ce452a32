use crate::core::bars::{BarRect, BarSlot, category_slot};
use crate::core::{CategoryTable, ViewportGeometry};
use crate::error::ChartResult;

/// Splits a category slot into `series_count` equal sub-bars, left to right.
#[must_use]
pub fn grouped_sub_slots(slot: BarSlot, series_count: usize) -> Vec<BarSlot> {
    if series_count == 0 {
        return Vec::new();
    }
    let sub_width = slot.width / series_count as f64;
    (0..series_count)
        .map(|index| BarSlot::new(slot.left + sub_width * index as f64, sub_width))
        .collect()
}

/// Projects one category: each series gets its own sub-bar from the baseline
/// to its value.
pub fn project_grouped_category(
    table: &CategoryTable,
    category: usize,
    geometry: &ViewportGeometry,
    fill_ratio: f64,
) -> ChartResult<Vec<BarRect>> {
    let slot = category_slot(geometry, category, fill_ratio)?;
    let baseline = geometry.origin().y;
    let sub_slots = grouped_sub_slots(slot, table.series.len());

    let mut bars = Vec::with_capacity(sub_slots.len());
    for ((series, value), sub_slot) in table.category_values(category).enumerate().zip(sub_slots) {
        let value_y = geometry.y_to_screen(value)?;
        bars.push(BarRect::spanning(
            category, series, value, sub_slot, baseline, value_y,
        ));
    }
    Ok(bars)
}

pub fn project_grouped_bars(
    table: &CategoryTable,
    geometry: &ViewportGeometry,
    fill_ratio: f64,
) -> ChartResult<Vec<BarRect>> {
    let mut bars = Vec::with_capacity(table.category_count() * table.series.len());
    for category in 0..table.category_count() {
        bars.extend(project_grouped_category(
            table, category, geometry, fill_ratio,
        )?);
    }
    Ok(bars)
}
