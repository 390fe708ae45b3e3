// File: crates/easel-core/src/axis.rs
// Summary: Axis configuration, tick layout, and tick label formatting.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::scale::{AnyScale, DomainPolicy};

/// Which scale an axis resolves against the active dataset.
#[derive(Clone, Debug)]
pub enum ScaleSpec {
    Linear(DomainPolicy),
    /// Fixed endpoints only; positivity is the caller's contract.
    Log { min: f64, max: f64 },
    /// Domain spans the record dates.
    Time,
    Band { padding_inner: f64, padding_outer: f64, sorted: bool },
}

/// Formatter for tick labels. Custom formatters receive the tick's domain
/// value (day number for time axes).
#[derive(Clone, Default)]
pub enum TickFormatter {
    #[default]
    Default,
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl TickFormatter {
    pub fn custom(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Default => format_number(value),
            Self::Custom(f) => f(value),
        }
    }
}

impl std::fmt::Debug for TickFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("TickFormatter::Default"),
            Self::Custom(_) => f.write_str("TickFormatter::Custom(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AxisConfig {
    pub label: String,
    pub scale: ScaleSpec,
    /// Requested tick count; band axes tick every key, log axes every decade.
    pub ticks: usize,
    pub formatter: TickFormatter,
    /// Tick label rotation in degrees about the label anchor (0 = upright).
    pub rotate_labels: f64,
}

impl AxisConfig {
    pub fn new(label: impl Into<String>, scale: ScaleSpec) -> Self {
        Self {
            label: label.into(),
            scale,
            ticks: 6,
            formatter: TickFormatter::Default,
            rotate_labels: 0.0,
        }
    }

    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_formatter(mut self, formatter: TickFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotate_labels = degrees;
        self
    }
}

/// One tick: a pixel position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Tick layout for a resolved scale.
pub fn ticks_for(scale: &AnyScale, count: usize, formatter: &TickFormatter) -> Vec<Tick> {
    match scale {
        AnyScale::Linear(s) => linspace(s.domain.0, s.domain.1, count.max(2))
            .into_iter()
            .map(|v| Tick { position: s.to_px(v), label: formatter.format(v) })
            .collect(),
        AnyScale::Log(s) => {
            // One tick per decade inside the domain.
            let lo = s.domain.0.log10().ceil() as i32;
            let hi = s.domain.1.log10().floor() as i32;
            (lo..=hi)
                .map(|k| {
                    let v = 10f64.powi(k);
                    Tick { position: s.to_px(v), label: formatter.format(v) }
                })
                .collect()
        }
        AnyScale::Time(s) => {
            let d0 = crate::scale::TimeScale::day_number(s.domain.0);
            let d1 = crate::scale::TimeScale::day_number(s.domain.1);
            linspace(d0, d1, count.max(2))
                .into_iter()
                .map(|days| {
                    let label = match formatter {
                        TickFormatter::Custom(f) => f(days),
                        TickFormatter::Default => NaiveDate::from_num_days_from_ce_opt(days.round() as i32)
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                    };
                    Tick { position: s.days_to_px(days), label }
                })
                .collect()
        }
        AnyScale::Band(s) => s
            .keys()
            .iter()
            .filter_map(|k| Some(Tick { position: s.center(k)?, label: k.clone() }))
            .collect(),
    }
}

/// Default numeric label: integers without decimals, otherwise two places.
fn format_number(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 && v.abs() < 1e15 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.2}")
    }
}
