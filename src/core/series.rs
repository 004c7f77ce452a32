use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// One named, ordered sequence of `(x, y)` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rejects non-finite samples; `index` only labels the error.
    pub fn validate(&self, index: usize) -> ChartResult<()> {
        match self.points.iter().position(|p| !p.is_finite()) {
            Some(position) => Err(ChartError::ModelContract(format!(
                "series {index} (`{}`) has a non-finite point at index {position}",
                self.label
            ))),
            None => Ok(()),
        }
    }
}

/// One value per category for a single bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl CategorySeries {
    #[must_use]
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Category-indexed table shared by all bar layouts.
///
/// Every series carries exactly one value per category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryTable {
    pub categories: Vec<String>,
    pub series: Vec<CategorySeries>,
}

impl CategoryTable {
    #[must_use]
    pub fn new(categories: Vec<String>, series: Vec<CategorySeries>) -> Self {
        Self { categories, series }
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Values of every series for one category, in series order.
    pub fn category_values(&self, category: usize) -> impl Iterator<Item = f64> + '_ {
        self.series
            .iter()
            .filter_map(move |series| series.values.get(category).copied())
    }

    pub fn validate(&self) -> ChartResult<()> {
        let expected = self.categories.len();
        for (index, series) in self.series.iter().enumerate() {
            if series.values.len() != expected {
                return Err(ChartError::ModelContract(format!(
                    "series {index} (`{}`) has {} values but the table has {expected} categories",
                    series.label,
                    series.values.len()
                )));
            }
            if series.values.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::ModelContract(format!(
                    "series {index} (`{}`) contains non-finite values",
                    series.label
                )));
            }
        }
        Ok(())
    }
}

/// Immutable data snapshot captured from a model at notification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    Points(Vec<Series>),
    Categories(CategoryTable),
}

impl Default for ChartData {
    fn default() -> Self {
        Self::Points(Vec::new())
    }
}

impl ChartData {
    #[must_use]
    pub fn series_count(&self) -> usize {
        match self {
            Self::Points(series) => series.len(),
            Self::Categories(table) => table.series.len(),
        }
    }

    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categories(_))
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Points(series) => series
                .iter()
                .enumerate()
                .try_for_each(|(index, series)| series.validate(index)),
            Self::Categories(table) => table.validate(),
        }
    }

    /// Every raw x value of a point snapshot.
    pub fn x_values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::Points(series) => Box::new(
                series
                    .iter()
                    .flat_map(|series| series.points.iter().map(|p| p.x)),
            ),
            Self::Categories(_) => Box::new(std::iter::empty()),
        }
    }

    /// Every raw y value: point ordinates or per-series category values.
    pub fn y_values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::Points(series) => Box::new(
                series
                    .iter()
                    .flat_map(|series| series.points.iter().map(|p| p.y)),
            ),
            Self::Categories(table) => Box::new(
                table
                    .series
                    .iter()
                    .flat_map(|series| series.values.iter().copied()),
            ),
        }
    }
}
