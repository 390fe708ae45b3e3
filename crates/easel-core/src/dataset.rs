// File: crates/easel-core/src/dataset.rs
// Summary: Dataset/FrameSet loaders: CSV and JSON readers with per-field coercion.
// Notes:
// - No schema validation beyond the coercions each field needs. A metric that
//   fails to coerce is simply absent on the record; only an unreadable file or
//   an unparseable document is an error.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::record::{Dataset, Frame, FrameSet, Record};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("parsing json {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: {reason}")]
    Shape { path: PathBuf, reason: String },
}

/// Field mapping for a flat record source: which column is the key, which
/// columns are numeric metrics, and the optional group/date columns.
#[derive(Clone, Debug)]
pub struct LoadSpec {
    pub key_field: String,
    pub metric_fields: Vec<String>,
    pub group_field: Option<String>,
    pub date_field: Option<String>,
    /// strftime format for `date_field`; `"%Y"` parses to Jan 1 of that year.
    pub date_format: String,
    /// Records missing any of these metrics are dropped during load.
    pub required: Vec<String>,
}

impl LoadSpec {
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            metric_fields: Vec::new(),
            group_field: None,
            date_field: None,
            date_format: "%Y-%m-%d".to_string(),
            required: Vec::new(),
        }
    }

    pub fn metrics(mut self, fields: &[&str]) -> Self {
        self.metric_fields = fields.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn group(mut self, field: impl Into<String>) -> Self {
        self.group_field = Some(field.into());
        self
    }

    pub fn date(mut self, field: impl Into<String>, format: impl Into<String>) -> Self {
        self.date_field = Some(field.into());
        self.date_format = format.into();
        self
    }

    pub fn require(mut self, fields: &[&str]) -> Self {
        self.required = fields.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Field mapping for a frame-per-time-step JSON document:
/// `[{ <label_field>: "1800", <records_field>: [ ... ] }, ...]`.
#[derive(Clone, Debug)]
pub struct FrameSpec {
    pub label_field: String,
    pub records_field: String,
    pub record_spec: LoadSpec,
}

impl FrameSpec {
    pub fn new(
        label_field: impl Into<String>,
        records_field: impl Into<String>,
        record_spec: LoadSpec,
    ) -> Self {
        Self {
            label_field: label_field.into(),
            records_field: records_field.into(),
            record_spec,
        }
    }
}

impl Dataset {
    /// Load a row-oriented CSV table with a header row. Numeric columns are
    /// coerced per field; rows with an empty key are skipped.
    pub fn from_csv_path(path: impl AsRef<Path>, spec: &LoadSpec) -> Result<Dataset, DataError> {
        let path = path.as_ref();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| DataError::Csv { path: path.to_path_buf(), source })?;

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|source| DataError::Csv { path: path.to_path_buf(), source })?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let col = |name: &str| headers.iter().position(|h| h == name);

        let key_col = col(&spec.key_field).ok_or_else(|| DataError::Shape {
            path: path.to_path_buf(),
            reason: format!("missing key column '{}'", spec.key_field),
        })?;
        let group_col = spec.group_field.as_deref().and_then(col);
        let date_col = spec.date_field.as_deref().and_then(col);
        let metric_cols: Vec<(String, Option<usize>)> = spec
            .metric_fields
            .iter()
            .map(|f| (f.clone(), col(f)))
            .collect();

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(|source| DataError::Csv { path: path.to_path_buf(), source })?;
            let key = match row.get(key_col) {
                Some(k) if !k.is_empty() => k.to_string(),
                _ => continue,
            };
            let mut rec = Record::new(key);
            if let Some(g) = group_col.and_then(|i| row.get(i)) {
                if !g.is_empty() {
                    rec.group = Some(g.to_string());
                }
            }
            if let Some(s) = date_col.and_then(|i| row.get(i)) {
                rec.date = parse_date(s, &spec.date_format);
            }
            for (name, idx) in &metric_cols {
                if let Some(v) = idx.and_then(|i| row.get(i)).and_then(|s| s.trim().parse::<f64>().ok()) {
                    rec.set_metric(name.clone(), v);
                }
            }
            records.push(rec);
        }

        let records = apply_required(records, spec);
        debug!(path = %path.display(), count = records.len(), "loaded csv dataset");
        Ok(Dataset::new(records))
    }

    /// Load a JSON array of flat objects. Numeric fields may be JSON numbers
    /// or numeric strings.
    pub fn from_json_path(path: impl AsRef<Path>, spec: &LoadSpec) -> Result<Dataset, DataError> {
        let path = path.as_ref();
        let doc = read_json(path)?;
        let rows = doc.as_array().ok_or_else(|| DataError::Shape {
            path: path.to_path_buf(),
            reason: "expected a top-level array".to_string(),
        })?;
        let records = apply_required(records_from_values(rows, spec), spec);
        debug!(path = %path.display(), count = records.len(), "loaded json dataset");
        Ok(Dataset::new(records))
    }

    /// Load one group from a JSON object keyed by group name, each value an
    /// array of flat objects.
    pub fn from_json_group(
        path: impl AsRef<Path>,
        group: &str,
        spec: &LoadSpec,
    ) -> Result<Dataset, DataError> {
        let path = path.as_ref();
        let doc = read_json(path)?;
        let rows = doc
            .get(group)
            .and_then(Value::as_array)
            .ok_or_else(|| DataError::Shape {
                path: path.to_path_buf(),
                reason: format!("no record array under key '{group}'"),
            })?;
        let records = apply_required(records_from_values(rows, spec), spec);
        debug!(path = %path.display(), group, count = records.len(), "loaded json group");
        Ok(Dataset::new(records))
    }
}

impl FrameSet {
    /// Load a JSON array of labelled frames, each carrying its own record array.
    pub fn from_json_path(path: impl AsRef<Path>, spec: &FrameSpec) -> Result<FrameSet, DataError> {
        let path = path.as_ref();
        let doc = read_json(path)?;
        let rows = doc.as_array().ok_or_else(|| DataError::Shape {
            path: path.to_path_buf(),
            reason: "expected a top-level array of frames".to_string(),
        })?;

        let mut frames = Vec::new();
        for row in rows {
            let label = match row.get(&spec.label_field) {
                Some(v) => coerce_string(v),
                None => continue,
            };
            let records = row
                .get(&spec.records_field)
                .and_then(Value::as_array)
                .map(|vals| apply_required(records_from_values(vals, &spec.record_spec), &spec.record_spec))
                .unwrap_or_default();
            frames.push(Frame { label, dataset: Dataset::new(records) });
        }
        debug!(path = %path.display(), count = frames.len(), "loaded frame set");
        Ok(FrameSet { frames })
    }
}

fn read_json(path: &Path) -> Result<Value, DataError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| DataError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| DataError::Json { path: path.to_path_buf(), source })
}

fn records_from_values(rows: &[Value], spec: &LoadSpec) -> Vec<Record> {
    rows.iter().filter_map(|v| record_from_value(v, spec)).collect()
}

fn record_from_value(value: &Value, spec: &LoadSpec) -> Option<Record> {
    let obj = value.as_object()?;
    let key = coerce_string(obj.get(&spec.key_field)?);
    let mut rec = Record::new(key);
    if let Some(field) = &spec.group_field {
        rec.group = obj.get(field).and_then(Value::as_str).map(|s| s.to_string());
    }
    if let Some(field) = &spec.date_field {
        rec.date = obj
            .get(field)
            .and_then(Value::as_str)
            .and_then(|s| parse_date(s, &spec.date_format));
    }
    for name in &spec.metric_fields {
        if let Some(v) = obj.get(name).and_then(coerce_number) {
            rec.set_metric(name.clone(), v);
        }
    }
    Some(rec)
}

/// JSON numbers pass through; numeric strings are parsed. Anything else is absent.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_date(s: &str, format: &str) -> Option<NaiveDate> {
    if format == "%Y" {
        let year = s.trim().parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    NaiveDate::parse_from_str(s.trim(), format).ok()
}

fn apply_required(records: Vec<Record>, spec: &LoadSpec) -> Vec<Record> {
    if spec.required.is_empty() {
        return records;
    }
    let before = records.len();
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|r| spec.required.iter().all(|f| r.has_metric(f)))
        .collect();
    if kept.len() != before {
        debug!(dropped = before - kept.len(), "dropped records missing required metrics");
    }
    kept
}
