//! Data-model contract consumed by the engine.
//!
//! Models publish [`DataChange`] events to subscribed listeners. The engine's
//! listener only enqueues events into a [`ChangeInbox`]; the engine drains the
//! inbox on its own thread, so a model may be mutated from a background
//! acquisition thread while rendering stays single-threaded.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{CategorySeries, CategoryTable, ChartData, DataPoint, Series};
use crate::error::{ChartError, ChartResult};

/// Upper bound on series visited through a legacy cursor before the traversal
/// is treated as a runaway cursor.
pub const MAX_CURSOR_SERIES: usize = 65_536;

// Reported counts are untrusted; larger series grow while pushing.
const MAX_CURSOR_RESERVE: usize = 4_096;

/// Listener invoked synchronously by a model on every change.
pub type ChangeListener = Box<dyn FnMut(&DataChange) + Send>;

/// A model shared between the engine and the threads that feed it.
pub type SharedModel<M> = Arc<Mutex<M>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One point appended at the end of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppendedPoint {
    pub series_index: usize,
    pub point_index: usize,
    pub point: DataPoint,
}

/// Change notification emitted by a model.
#[derive(Debug, Clone, PartialEq)]
pub enum DataChange {
    /// The whole data set changed; carries the snapshot taken at notification time.
    Full(Arc<ChartData>),
    /// One point appended to one series, or one point to every series.
    PointsAppended(Vec<AppendedPoint>),
    /// One category (one value per series) appended to a category table.
    CategoryAppended { label: String, values: Vec<f64> },
}

impl DataChange {
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

/// Contract every data source implements.
pub trait DataModel: Send {
    /// Immutable copy of the current data.
    fn snapshot(&self) -> ChartResult<ChartData>;

    fn subscribe(&mut self, listener: ChangeListener) -> SubscriptionId;

    /// Returns `false` when the id was not subscribed.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Thread-safe queue that hands model events over to the engine's thread.
///
/// A full change supersedes everything queued before it.
#[derive(Debug, Clone, Default)]
pub struct ChangeInbox {
    queue: Arc<Mutex<VecDeque<DataChange>>>,
}

impl ChangeInbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener that enqueues every change into this inbox.
    #[must_use]
    pub fn listener(&self) -> ChangeListener {
        let inbox = self.clone();
        Box::new(move |change: &DataChange| inbox.push(change.clone()))
    }

    pub fn push(&self, change: DataChange) {
        let mut queue = self.queue.lock();
        if change.is_full() {
            queue.clear();
        }
        queue.push_back(change);
    }

    #[must_use]
    pub fn pop(&self) -> Option<DataChange> {
        self.queue.lock().pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub fn clear(&self) {
        self.queue.lock().clear();
    }
}

/// In-memory model backed by a [`ChartData`] snapshot.
pub struct InMemoryDataModel {
    data: ChartData,
    listeners: IndexMap<SubscriptionId, ChangeListener>,
    next_subscription: u64,
}

impl fmt::Debug for InMemoryDataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryDataModel")
            .field("data", &self.data)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for InMemoryDataModel {
    fn default() -> Self {
        Self {
            data: ChartData::default(),
            listeners: IndexMap::new(),
            next_subscription: 0,
        }
    }
}

impl InMemoryDataModel {
    pub fn new(data: ChartData) -> ChartResult<Self> {
        data.validate()?;
        Ok(Self {
            data,
            ..Self::default()
        })
    }

    pub fn with_series(series: Vec<Series>) -> ChartResult<Self> {
        Self::new(ChartData::Points(series))
    }

    pub fn with_categories(table: CategoryTable) -> ChartResult<Self> {
        Self::new(ChartData::Categories(table))
    }

    /// Wraps the model for sharing with the engine and feeder threads.
    #[must_use]
    pub fn into_shared(self) -> SharedModel<Self> {
        Arc::new(Mutex::new(self))
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replaces all data and notifies a full change.
    pub fn set_data(&mut self, data: ChartData) -> ChartResult<()> {
        data.validate()?;
        self.data = data;
        let snapshot = Arc::new(self.data.clone());
        self.notify(&DataChange::Full(snapshot));
        Ok(())
    }

    /// Appends one point to one series and notifies an incremental change.
    pub fn append_point(&mut self, series_index: usize, point: DataPoint) -> ChartResult<()> {
        let appended = self.push_point(series_index, point)?;
        self.notify(&DataChange::PointsAppended(vec![appended]));
        Ok(())
    }

    /// Appends one point to every series (`points[i]` goes to series `i`).
    pub fn append_to_all_series(&mut self, points: &[DataPoint]) -> ChartResult<()> {
        let ChartData::Points(series) = &self.data else {
            return Err(ChartError::InvalidData(
                "points can only be appended to point series".to_owned(),
            ));
        };
        if points.len() != series.len() {
            return Err(ChartError::InvalidData(format!(
                "expected {} points (one per series), got {}",
                series.len(),
                points.len()
            )));
        }
        if points.iter().any(|point| !point.is_finite()) {
            return Err(ChartError::InvalidData(
                "appended points must be finite".to_owned(),
            ));
        }
        let mut appended = Vec::with_capacity(points.len());
        for (series_index, point) in points.iter().enumerate() {
            appended.push(self.push_point(series_index, *point)?);
        }
        self.notify(&DataChange::PointsAppended(appended));
        Ok(())
    }

    /// Appends one category with a value for every series.
    pub fn append_category(&mut self, label: impl Into<String>, values: Vec<f64>) -> ChartResult<()> {
        let ChartData::Categories(table) = &mut self.data else {
            return Err(ChartError::InvalidData(
                "categories can only be appended to a category table".to_owned(),
            ));
        };
        if values.len() != table.series.len() {
            return Err(ChartError::InvalidData(format!(
                "expected {} values (one per series), got {}",
                table.series.len(),
                values.len()
            )));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "appended values must be finite".to_owned(),
            ));
        }
        let label = label.into();
        table.categories.push(label.clone());
        for (series, value) in table.series.iter_mut().zip(&values) {
            series.values.push(*value);
        }
        self.notify(&DataChange::CategoryAppended { label, values });
        Ok(())
    }

    fn push_point(&mut self, series_index: usize, point: DataPoint) -> ChartResult<AppendedPoint> {
        if !point.is_finite() {
            return Err(ChartError::InvalidData(
                "appended point must be finite".to_owned(),
            ));
        }
        let ChartData::Points(series) = &mut self.data else {
            return Err(ChartError::InvalidData(
                "points can only be appended to point series".to_owned(),
            ));
        };
        let target = series.get_mut(series_index).ok_or_else(|| {
            ChartError::InvalidData(format!("series index {series_index} out of range"))
        })?;
        target.points.push(point);
        Ok(AppendedPoint {
            series_index,
            point_index: target.points.len() - 1,
            point,
        })
    }

    fn notify(&mut self, change: &DataChange) {
        trace!(
            listeners = self.listeners.len(),
            full = change.is_full(),
            "notify data change"
        );
        for listener in self.listeners.values_mut() {
            listener(change);
        }
    }
}

impl DataModel for InMemoryDataModel {
    fn snapshot(&self) -> ChartResult<ChartData> {
        Ok(self.data.clone())
    }

    fn subscribe(&mut self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, listener);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }
}

/// Legacy stateful-cursor point model: one "current series" at a time.
///
/// The cursor always designates a series after `reset_to_first_series`.
pub trait CursorDataModel {
    fn reset_to_first_series(&mut self);
    /// Moves to the next series; `false` when there is none.
    fn advance_to_next_series(&mut self) -> bool;
    /// Point count of the current series. Negative counts break the contract.
    fn series_point_count(&self) -> i64;
    fn series_label(&self) -> String {
        String::new()
    }
    fn x(&self, index: usize) -> Option<f64>;
    fn y(&self, index: usize) -> Option<f64>;
}

/// Legacy stateful-cursor category model.
pub trait CursorCategoryModel {
    fn reset_to_first_series(&mut self);
    fn advance_to_next_series(&mut self) -> bool;
    fn series_point_count(&self) -> i64;
    fn series_label(&self) -> String {
        String::new()
    }
    fn category_label(&self, index: usize) -> Option<String>;
    fn value(&self, index: usize) -> Option<f64>;
}

fn checked_point_count(count: i64, series_index: usize) -> ChartResult<usize> {
    usize::try_from(count).map_err(|_| {
        ChartError::ModelContract(format!(
            "series {series_index} reported a negative point count ({count})"
        ))
    })
}

fn cursor_sample<T>(value: Option<T>, what: &str, series: usize, index: usize) -> ChartResult<T> {
    value.ok_or_else(|| {
        ChartError::ModelContract(format!(
            "series {series} has no {what} at index {index} although it reported more points"
        ))
    })
}

/// Captures a cursor point model into immutable series in a single pass.
pub fn capture_point_series<C: CursorDataModel + ?Sized>(model: &mut C) -> ChartResult<Vec<Series>> {
    let mut series = Vec::new();
    model.reset_to_first_series();
    loop {
        let series_index = series.len();
        if series_index >= MAX_CURSOR_SERIES {
            return Err(ChartError::ModelContract(format!(
                "series cursor did not terminate after {MAX_CURSOR_SERIES} series"
            )));
        }
        let count = checked_point_count(model.series_point_count(), series_index)?;
        let mut points = Vec::with_capacity(count.min(MAX_CURSOR_RESERVE));
        for index in 0..count {
            let x = cursor_sample(model.x(index), "x value", series_index, index)?;
            let y = cursor_sample(model.y(index), "y value", series_index, index)?;
            points.push(DataPoint::new(x, y));
        }
        series.push(Series::new(model.series_label(), points));
        if !model.advance_to_next_series() {
            break;
        }
    }
    for (index, captured) in series.iter().enumerate() {
        captured.validate(index)?;
    }
    Ok(series)
}

/// Captures a cursor category model into an immutable table.
///
/// Category labels come from the first series; every series must report the
/// same number of values.
pub fn capture_category_table<C: CursorCategoryModel + ?Sized>(
    model: &mut C,
) -> ChartResult<CategoryTable> {
    let mut categories: Option<Vec<String>> = None;
    let mut series = Vec::new();
    model.reset_to_first_series();
    loop {
        let series_index = series.len();
        if series_index >= MAX_CURSOR_SERIES {
            return Err(ChartError::ModelContract(format!(
                "series cursor did not terminate after {MAX_CURSOR_SERIES} series"
            )));
        }
        let count = checked_point_count(model.series_point_count(), series_index)?;
        match &categories {
            None => {
                let mut labels = Vec::with_capacity(count.min(MAX_CURSOR_RESERVE));
                for index in 0..count {
                    labels.push(cursor_sample(
                        model.category_label(index),
                        "category label",
                        series_index,
                        index,
                    )?);
                }
                categories = Some(labels);
            }
            Some(labels) if labels.len() != count => {
                return Err(ChartError::ModelContract(format!(
                    "series {series_index} has {count} values but the first series has {}",
                    labels.len()
                )));
            }
            Some(_) => {}
        }
        let mut values = Vec::with_capacity(count.min(MAX_CURSOR_RESERVE));
        for index in 0..count {
            values.push(cursor_sample(model.value(index), "value", series_index, index)?);
        }
        series.push(CategorySeries::new(model.series_label(), values));
        if !model.advance_to_next_series() {
            break;
        }
    }
    let table = CategoryTable::new(categories.unwrap_or_default(), series);
    table.validate()?;
    Ok(table)
}
