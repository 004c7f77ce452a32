use crate::core::{
    AxisScaler, BarRect, CategoryTable, ChartData, LayoutGeometry, MarkerGeometry,
    ViewportGeometry,
};
use crate::error::ChartResult;
use crate::render::{
    LinePrimitive, MarkerPrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::chart_view::ChartView;

const TICK_MARK_LENGTH_PX: f64 = 5.0;
const Y_LABEL_GAP_PX: f64 = 8.0;
const BAR_BORDER_WIDTH_PX: f64 = 1.0;

/// Builds the complete frame for one full redraw: background, grid, axes,
/// numbering and every series.
pub(super) fn build_full_frame(
    data: &ChartData,
    view: &ChartView,
    geometry: &ViewportGeometry,
) -> ChartResult<RenderFrame> {
    let surface = geometry.surface();
    let mut frame = RenderFrame::new(surface).with_background(RectPrimitive::new(
        0.0,
        0.0,
        f64::from(surface.width),
        f64::from(surface.height),
        view.appearance.background,
    ));

    let categories = match data {
        ChartData::Categories(table) => Some(table),
        ChartData::Points(_) => None,
    };
    push_x_ticks(&mut frame, view, geometry, categories)?;
    push_y_ticks(&mut frame, view, geometry)?;
    push_axis_lines(&mut frame, view, geometry);

    match view.layout.project(data, geometry, view.layout_params())? {
        LayoutGeometry::Bars(bars) => push_bars(&mut frame, view, &bars),
        LayoutGeometry::Markers(markers) => push_markers(&mut frame, view, &markers),
    }
    Ok(frame)
}

pub(super) fn push_bars(frame: &mut RenderFrame, view: &ChartView, bars: &[BarRect]) {
    frame.rects.extend(bars.iter().map(|bar| {
        RectPrimitive::new(
            bar.x,
            bar.y_top,
            bar.width,
            bar.height(),
            view.style.color_for(bar.series),
        )
        .with_border(BAR_BORDER_WIDTH_PX, view.appearance.foreground)
    }));
}

pub(super) fn push_markers(frame: &mut RenderFrame, view: &ChartView, markers: &[MarkerGeometry]) {
    frame.markers.extend(markers.iter().map(|marker| {
        MarkerPrimitive::new(
            marker.center.x,
            marker.center.y,
            marker.half_size,
            view.style.marker.shape,
            view.style.color_for(marker.series),
        )
    }));
}

/// Label of one category, centred under its slot.
pub(super) fn category_label(
    table: &CategoryTable,
    category: usize,
    view: &ChartView,
    geometry: &ViewportGeometry,
) -> ChartResult<Option<TextPrimitive>> {
    let Some(label) = table.categories.get(category) else {
        return Ok(None);
    };
    if label.is_empty() || !view.padding.numbering {
        return Ok(None);
    }
    let center = geometry.x_to_screen(category as f64 + 0.5)?;
    Ok(Some(TextPrimitive::new(
        label.clone(),
        center,
        geometry.plot_bottom() + TICK_MARK_LENGTH_PX,
        view.appearance.font_size_px,
        view.appearance.foreground,
        TextHAlign::Center,
    )))
}

fn grid_top(geometry: &ViewportGeometry) -> f64 {
    geometry.axis_pad_px() - geometry.scale_pad_px()
}

fn grid_bottom(geometry: &ViewportGeometry) -> f64 {
    f64::from(geometry.surface().height) - (geometry.axis_pad_px() - geometry.scale_pad_px())
}

fn grid_left(geometry: &ViewportGeometry) -> f64 {
    geometry.left_gutter_px() - geometry.scale_pad_px()
}

fn grid_right(geometry: &ViewportGeometry) -> f64 {
    f64::from(geometry.surface().width) - (geometry.axis_pad_px() - geometry.scale_pad_px())
}

fn tick_label(axis: &AxisScaler, scaled: f64) -> ChartResult<String> {
    Ok(axis.format(axis.from_scaled(scaled)?))
}

fn push_x_ticks(
    frame: &mut RenderFrame,
    view: &ChartView,
    geometry: &ViewportGeometry,
    categories: Option<&CategoryTable>,
) -> ChartResult<()> {
    let appearance = view.appearance;
    if let Some(table) = categories {
        for category in 0..table.category_count() {
            if let Some(label) = category_label(table, category, view, geometry)? {
                frame.texts.push(label);
            }
        }
        return Ok(());
    }
    if !view.grid_lines && !view.padding.numbering {
        return Ok(());
    }

    let axis_y = geometry.origin().y;
    for scaled in view.axis_x.tick_values(geometry.tick_increment_x())? {
        let px = geometry.scaled_to_screen(scaled, 0.0).x;
        if view.grid_lines {
            frame.lines.push(LinePrimitive::new(
                px,
                grid_top(geometry),
                px,
                grid_bottom(geometry),
                appearance.axis_line_width,
                appearance.grid_color,
            ));
        }
        if view.padding.numbering {
            frame.lines.push(LinePrimitive::new(
                px,
                axis_y,
                px,
                axis_y + TICK_MARK_LENGTH_PX,
                appearance.axis_line_width,
                appearance.foreground,
            ));
            let text = tick_label(&view.axis_x, scaled)?;
            if !text.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    text,
                    px,
                    axis_y + TICK_MARK_LENGTH_PX,
                    appearance.font_size_px,
                    appearance.foreground,
                    TextHAlign::Center,
                ));
            }
        }
    }
    Ok(())
}

fn push_y_ticks(
    frame: &mut RenderFrame,
    view: &ChartView,
    geometry: &ViewportGeometry,
) -> ChartResult<()> {
    if !view.grid_lines && !view.padding.numbering {
        return Ok(());
    }
    let appearance = view.appearance;
    let axis_x = geometry.origin().x;
    for scaled in view.axis_y.tick_values(geometry.tick_increment_y())? {
        let py = geometry.scaled_to_screen(0.0, scaled).y;
        if view.grid_lines {
            frame.lines.push(LinePrimitive::new(
                grid_left(geometry),
                py,
                grid_right(geometry),
                py,
                appearance.axis_line_width,
                appearance.grid_color,
            ));
        }
        if view.padding.numbering {
            frame.lines.push(LinePrimitive::new(
                axis_x,
                py,
                axis_x - TICK_MARK_LENGTH_PX,
                py,
                appearance.axis_line_width,
                appearance.foreground,
            ));
            let text = tick_label(&view.axis_y, scaled)?;
            if !text.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    text,
                    axis_x - Y_LABEL_GAP_PX,
                    py - appearance.font_size_px / 2.0,
                    appearance.font_size_px,
                    appearance.foreground,
                    TextHAlign::Right,
                ));
            }
        }
    }
    Ok(())
}

/// Both axis lines through the visible origin.
fn push_axis_lines(frame: &mut RenderFrame, view: &ChartView, geometry: &ViewportGeometry) {
    let origin = geometry.origin();
    let appearance = view.appearance;
    frame.lines.push(LinePrimitive::new(
        grid_left(geometry),
        origin.y,
        grid_right(geometry),
        origin.y,
        appearance.axis_line_width,
        appearance.foreground,
    ));
    frame.lines.push(LinePrimitive::new(
        origin.x,
        grid_top(geometry),
        origin.x,
        grid_bottom(geometry),
        appearance.axis_line_width,
        appearance.foreground,
    ));
}
