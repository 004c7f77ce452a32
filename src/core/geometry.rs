use serde::{Deserialize, Serialize};

use crate::core::{AxisScaler, DataPoint, PixelPoint, ScaleType, Viewport};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_AXIS_PAD_PX: f64 = 25.0;
pub const DEFAULT_SCALE_PAD_PX: f64 = 5.0;
/// Fixed per-character width used to size the y-label gutter.
pub const LABEL_CHAR_WIDTH_PX: f64 = 8.0;

/// Fixed paddings around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPadding {
    pub axis_pad_px: f64,
    pub scale_pad_px: f64,
    pub label_char_width_px: f64,
    /// Reserve a y-label gutter for axis numbering.
    pub numbering: bool,
}

impl Default for AxisPadding {
    fn default() -> Self {
        Self {
            axis_pad_px: DEFAULT_AXIS_PAD_PX,
            scale_pad_px: DEFAULT_SCALE_PAD_PX,
            label_char_width_px: LABEL_CHAR_WIDTH_PX,
            numbering: true,
        }
    }
}

impl AxisPadding {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("axis pad", self.axis_pad_px),
            ("scale pad", self.scale_pad_px),
            ("label char width", self.label_char_width_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Pixel-space geometry derived from both axes and the surface size.
///
/// `zero` is the pixel of scaled `(0, 0)` and anchors every transform (it may
/// lie outside the plot). `origin` is the visible axes crossing: the zero
/// crossing when a range straddles zero, otherwise the nearest plot edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    surface: Viewport,
    scale_type_x: ScaleType,
    scale_type_y: ScaleType,
    scaled_x: (f64, f64),
    scaled_y: (f64, f64),
    zero: PixelPoint,
    origin: PixelPoint,
    pixel_scale_x: f64,
    pixel_scale_y: f64,
    left_gutter_px: f64,
    axis_pad_px: f64,
    scale_pad_px: f64,
    tick_increment_x: f64,
    tick_increment_y: f64,
}

impl ViewportGeometry {
    /// Recomputes the geometry from axis state and surface size.
    ///
    /// Fails with `InvalidViewport` when the surface (or the plot area left
    /// after paddings) is empty, and with `InvalidScale` when an axis cannot be
    /// mapped into scaled space.
    pub fn recompute(
        axis_x: &AxisScaler,
        axis_y: &AxisScaler,
        surface: Viewport,
        padding: AxisPadding,
    ) -> ChartResult<Self> {
        if !surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: surface.width,
                height: surface.height,
            });
        }
        let padding = padding.validate()?;
        let scaled_x = axis_x.scaled_extrema()?;
        let scaled_y = axis_y.scaled_extrema()?;

        let width = f64::from(surface.width);
        let height = f64::from(surface.height);
        let axis_pad = padding.axis_pad_px;

        let mut left_gutter = axis_pad;
        if padding.numbering {
            let mut label_pad =
                padding.label_char_width_px * axis_y.widest_extrema_label_chars() as f64;
            if scaled_x.0 < 0.0 {
                // Negative x labels sit left of the y axis, inside the plot.
                let negative_x_px = (width - 2.0 * (axis_pad + padding.scale_pad_px)) * scaled_x.0
                    / (scaled_x.0 - scaled_x.1);
                label_pad = (label_pad - negative_x_px).max(0.0);
            }
            left_gutter += label_pad;
        }

        let plot_width = width - left_gutter - axis_pad;
        let plot_height = height - 2.0 * axis_pad;
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: surface.width,
                height: surface.height,
            });
        }

        let pixel_scale_x = plot_width / (scaled_x.1 - scaled_x.0);
        let pixel_scale_y = plot_height / (scaled_y.1 - scaled_y.0);
        if !pixel_scale_x.is_finite() || !pixel_scale_y.is_finite() {
            return Err(ChartError::InvalidData(
                "axis span is too small to map onto pixels".to_owned(),
            ));
        }

        let zero = PixelPoint::new(
            left_gutter - scaled_x.0 * pixel_scale_x,
            height - axis_pad + scaled_y.0 * pixel_scale_y,
        );
        let origin_x = if scaled_x.0 > 0.0 {
            left_gutter
        } else if scaled_x.1 < 0.0 {
            width - axis_pad
        } else {
            zero.x
        };
        let origin_y = if scaled_y.0 > 0.0 {
            height - axis_pad
        } else if scaled_y.1 < 0.0 {
            axis_pad
        } else {
            zero.y
        };

        Ok(Self {
            surface,
            scale_type_x: axis_x.scale_type(),
            scale_type_y: axis_y.scale_type(),
            scaled_x,
            scaled_y,
            zero,
            origin: PixelPoint::new(origin_x, origin_y),
            pixel_scale_x,
            pixel_scale_y,
            left_gutter_px: left_gutter,
            axis_pad_px: axis_pad,
            scale_pad_px: padding.scale_pad_px,
            tick_increment_x: axis_x.tick_increment(pixel_scale_x),
            tick_increment_y: axis_y.tick_increment(pixel_scale_y),
        })
    }

    #[must_use]
    pub fn surface(&self) -> Viewport {
        self.surface
    }

    #[must_use]
    pub fn origin(&self) -> PixelPoint {
        self.origin
    }

    #[must_use]
    pub fn zero(&self) -> PixelPoint {
        self.zero
    }

    #[must_use]
    pub fn pixel_scale_x(&self) -> f64 {
        self.pixel_scale_x
    }

    #[must_use]
    pub fn pixel_scale_y(&self) -> f64 {
        self.pixel_scale_y
    }

    #[must_use]
    pub fn left_gutter_px(&self) -> f64 {
        self.left_gutter_px
    }

    #[must_use]
    pub fn axis_pad_px(&self) -> f64 {
        self.axis_pad_px
    }

    #[must_use]
    pub fn scale_pad_px(&self) -> f64 {
        self.scale_pad_px
    }

    #[must_use]
    pub fn tick_increment_x(&self) -> f64 {
        self.tick_increment_x
    }

    #[must_use]
    pub fn tick_increment_y(&self) -> f64 {
        self.tick_increment_y
    }

    #[must_use]
    pub fn scaled_extrema_x(&self) -> (f64, f64) {
        self.scaled_x
    }

    #[must_use]
    pub fn scaled_extrema_y(&self) -> (f64, f64) {
        self.scaled_y
    }

    #[must_use]
    pub fn plot_left(&self) -> f64 {
        self.left_gutter_px
    }

    #[must_use]
    pub fn plot_right(&self) -> f64 {
        f64::from(self.surface.width) - self.axis_pad_px
    }

    #[must_use]
    pub fn plot_top(&self) -> f64 {
        self.axis_pad_px
    }

    #[must_use]
    pub fn plot_bottom(&self) -> f64 {
        f64::from(self.surface.height) - self.axis_pad_px
    }

    #[must_use]
    pub fn scaled_to_screen(&self, scaled_x: f64, scaled_y: f64) -> PixelPoint {
        PixelPoint::new(
            self.zero.x + self.pixel_scale_x * scaled_x,
            self.zero.y - self.pixel_scale_y * scaled_y,
        )
    }

    #[must_use]
    pub fn screen_to_scaled(&self, pixel: PixelPoint) -> (f64, f64) {
        (
            (pixel.x - self.zero.x) / self.pixel_scale_x,
            (self.zero.y - pixel.y) / self.pixel_scale_y,
        )
    }

    pub fn x_to_screen(&self, x: f64) -> ChartResult<f64> {
        Ok(self.zero.x + self.pixel_scale_x * self.scale_type_x.to_scaled(x)?)
    }

    pub fn y_to_screen(&self, y: f64) -> ChartResult<f64> {
        Ok(self.zero.y - self.pixel_scale_y * self.scale_type_y.to_scaled(y)?)
    }

    /// Raw data to pixel: scale transform first, then pixel factors.
    pub fn data_to_screen(&self, x: f64, y: f64) -> ChartResult<PixelPoint> {
        Ok(PixelPoint::new(self.x_to_screen(x)?, self.y_to_screen(y)?))
    }

    /// Pixel to raw data, undoing [`Self::data_to_screen`] in reverse order.
    pub fn screen_to_data(&self, pixel: PixelPoint) -> ChartResult<DataPoint> {
        if !pixel.x.is_finite() || !pixel.y.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let (scaled_x, scaled_y) = self.screen_to_scaled(pixel);
        Ok(DataPoint::new(
            self.scale_type_x.from_scaled(scaled_x)?,
            self.scale_type_y.from_scaled(scaled_y)?,
        ))
    }
}
