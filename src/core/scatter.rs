use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{DataPoint, PixelPoint, Series, ViewportGeometry};
use crate::error::{ChartError, ChartResult};

/// One projected scatter marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerGeometry {
    pub series: usize,
    pub index: usize,
    pub center: PixelPoint,
    pub half_size: f64,
}

pub fn validate_marker_half_size(half_size: f64) -> ChartResult<f64> {
    if !half_size.is_finite() || half_size <= 0.0 {
        return Err(ChartError::InvalidData(
            "marker half-size must be finite and > 0".to_owned(),
        ));
    }
    Ok(half_size)
}

/// Projects a single sample into a marker centred on its pixel position.
pub fn project_marker(
    series: usize,
    index: usize,
    point: DataPoint,
    geometry: &ViewportGeometry,
    half_size: f64,
) -> ChartResult<MarkerGeometry> {
    Ok(MarkerGeometry {
        series,
        index,
        center: geometry.data_to_screen(point.x, point.y)?,
        half_size,
    })
}

/// Projects every point of every series, in series then point order.
pub fn project_markers(
    series: &[Series],
    geometry: &ViewportGeometry,
    half_size: f64,
) -> ChartResult<Vec<MarkerGeometry>> {
    let half_size = validate_marker_half_size(half_size)?;
    let samples: Vec<(usize, usize, DataPoint)> = series
        .iter()
        .enumerate()
        .flat_map(|(series_index, series)| {
            series
                .points
                .iter()
                .enumerate()
                .map(move |(index, point)| (series_index, index, *point))
        })
        .collect();

    // Large scatter sets can be projected in parallel; output order is kept.
    #[cfg(feature = "parallel-projection")]
    {
        samples
            .par_iter()
            .map(|(series, index, point)| {
                project_marker(*series, *index, *point, geometry, half_size)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        let mut markers = Vec::with_capacity(samples.len());
        for (series, index, point) in samples {
            markers.push(project_marker(series, index, point, geometry, half_size)?);
        }
        Ok(markers)
    }
}
