// File: crates/easel-core/src/record.rs
// Summary: Record, Dataset, and FrameSet data model shared by loaders, scales, and charts.

use std::collections::HashMap;

use chrono::NaiveDate;

/// One data point: an identity key, named numeric metrics, an optional
/// categorical group, and an optional parsed date.
#[derive(Clone, Debug, Default)]
pub struct Record {
    pub key: String,
    pub group: Option<String>,
    pub date: Option<NaiveDate>,
    metrics: HashMap<String, f64>,
}

impl Record {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Default::default() }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn set_metric(&mut self, name: impl Into<String>, value: f64) {
        self.metrics.insert(name.into(), value);
    }

    /// Named metric value; `None` when the field was absent or failed coercion.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }
}

/// Ordered sequence of records. Loader constructors live in `dataset.rs`.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sort ascending by parsed date; records without a date sort first.
    /// Nearest-point lookup requires ascending order.
    pub fn sort_by_date(&mut self) {
        self.records.sort_by_key(|r| r.date);
    }
}

/// One time step of an animated dataset, labelled (e.g. the year).
#[derive(Clone, Debug)]
pub struct Frame {
    pub label: String,
    pub dataset: Dataset,
}

/// Ordered sequence of frames.
#[derive(Clone, Debug, Default)]
pub struct FrameSet {
    pub frames: Vec<Frame>,
}

impl FrameSet {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&Frame> {
        self.frames.get(step)
    }
}
