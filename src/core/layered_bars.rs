use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::bars::{BarRect, category_slot};
use crate::core::{CategoryTable, ViewportGeometry};
use crate::error::ChartResult;

/// Series indices in layered draw order: descending by value, ties keep
/// series order.
///
/// Bars share one slot and are painted in this order, so every smaller bar is
/// drawn on top of the larger ones behind it.
#[must_use]
pub fn layered_draw_order(values: &[f64]) -> SmallVec<[usize; 8]> {
    let mut order: SmallVec<[usize; 8]> = (0..values.len()).collect();
    // `sort_by_key` is stable.
    order.sort_by_key(|&index| Reverse(OrderedFloat(values[index])));
    order
}

/// Projects one category as full-width bars in layered draw order.
pub fn project_layered_category(
    table: &CategoryTable,
    category: usize,
    geometry: &ViewportGeometry,
    fill_ratio: f64,
) -> ChartResult<Vec<BarRect>> {
    let slot = category_slot(geometry, category, fill_ratio)?;
    let baseline = geometry.origin().y;
    let values: SmallVec<[f64; 8]> = table.category_values(category).collect();

    let mut bars = Vec::with_capacity(values.len());
    for series in layered_draw_order(&values) {
        let value = values[series];
        let value_y = geometry.y_to_screen(value)?;
        bars.push(BarRect::spanning(
            category, series, value, slot, baseline, value_y,
        ));
    }
    Ok(bars)
}

pub fn project_layered_bars(
    table: &CategoryTable,
    geometry: &ViewportGeometry,
    fill_ratio: f64,
) -> ChartResult<Vec<BarRect>> {
    let mut bars = Vec::with_capacity(table.category_count() * table.series.len());
    for category in 0..table.category_count() {
        bars.extend(project_layered_category(
            table, category, geometry, fill_ratio,
        )?);
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::layered_draw_order;

    #[test]
    fn equal_values_keep_series_order() {
        let order = layered_draw_order(&[2.0, 5.0, 2.0, 5.0]);
        assert_eq!(order.as_slice(), &[1, 3, 0, 2]);
    }
}
