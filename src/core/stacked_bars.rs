use crate::core::bars::{BarRect, category_slot};
use crate::core::{CategoryTable, ViewportGeometry};
use crate::error::ChartResult;

/// Running totals of one category's values in series order.
#[must_use]
pub fn category_running_sums(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values
        .into_iter()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}

/// Values that bound a stacked chart: every running sum of every category.
///
/// The top of each stack is the category sum, so auto extrema cover the sum
/// rather than the largest single value.
#[must_use]
pub fn stacked_extrema_values(table: &CategoryTable) -> Vec<f64> {
    (0..table.category_count())
        .flat_map(|category| category_running_sums(table.category_values(category)))
        .collect()
}

/// Projects one category as a vertical stack.
///
/// Each series' bar starts where the previous one ended: bar heights are
/// measured from the baseline in pixels and accumulated.
pub fn project_stacked_category(
    table: &CategoryTable,
    category: usize,
    geometry: &ViewportGeometry,
    fill_ratio: f64,
) -> ChartResult<Vec<BarRect>> {
    let slot = category_slot(geometry, category, fill_ratio)?;
    let baseline = geometry.origin().y;

    let mut total_height = 0.0;
    let mut bars = Vec::with_capacity(table.series.len());
    for (series, value) in table.category_values(category).enumerate() {
        let bar_height = baseline - geometry.y_to_screen(value)?;
        let bottom = baseline - total_height;
        let top = bottom - bar_height;
        bars.push(BarRect::spanning(category, series, value, slot, top, bottom));
        total_height += bar_height;
    }
    Ok(bars)
}

pub fn project_stacked_bars(
    table: &CategoryTable,
    geometry: &ViewportGeometry,
    fill_ratio: f64,
) -> ChartResult<Vec<BarRect>> {
    let mut bars = Vec::with_capacity(table.category_count() * table.series.len());
    for category in 0..table.category_count() {
        bars.extend(project_stacked_category(
            table, category, geometry, fill_ratio,
        )?);
    }
    Ok(bars)
}
