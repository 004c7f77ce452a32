use serde::{Deserialize, Serialize};

use crate::core::scatter::validate_marker_half_size;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, MarkerShape};

pub const DEFAULT_MARKER_HALF_SIZE_PX: f64 = 2.0;

/// Series colors, cycled by series index.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::rgb(0.0, 0.0, 0.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(0.0, 1.0, 0.0),
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(1.0, 1.0, 0.0),
    Color::rgb(0.0, 1.0, 1.0),
    Color::rgb(0.753, 0.753, 0.753),
    Color::rgb(1.0, 0.0, 1.0),
    Color::rgb(1.0, 0.784, 0.0),
    Color::rgb(1.0, 0.686, 0.686),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub half_size_px: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Square,
            half_size_px: DEFAULT_MARKER_HALF_SIZE_PX,
        }
    }
}

impl MarkerStyle {
    pub fn validate(self) -> ChartResult<Self> {
        validate_marker_half_size(self.half_size_px)?;
        Ok(self)
    }
}

/// Per-series appearance: a color palette plus the scatter marker glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub palette: Vec<Color>,
    #[serde(default)]
    pub marker: MarkerStyle,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            marker: MarkerStyle::default(),
        }
    }
}

impl SeriesStyle {
    /// Color of series `index`; the palette wraps around.
    #[must_use]
    pub fn color_for(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "series palette must contain at least one color".to_owned(),
            ));
        }
        for color in &self.palette {
            color.validate()?;
        }
        self.marker.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PALETTE, SeriesStyle};

    #[test]
    fn palette_wraps_by_series_index() {
        let style = SeriesStyle::default();
        assert_eq!(style.color_for(0), DEFAULT_PALETTE[0]);
        assert_eq!(style.color_for(3), DEFAULT_PALETTE[3]);
        assert_eq!(style.color_for(DEFAULT_PALETTE.len() + 1), DEFAULT_PALETTE[1]);
    }
}
