// File: crates/easel-core/src/scale.rs
// Summary: Linear/log/time/band/ordinal scale transforms and domain policies.

use chrono::{Datelike, NaiveDate};

use crate::color::Rgba;
use crate::record::Record;

/// Default multiplicative padding applied by auto domains (±0.5%).
pub const DEFAULT_PAD: f64 = 0.005;

/// Affine map from a numeric domain to a pixel range. Extrapolates outside
/// the domain; a degenerate domain is widened so the map stays defined.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut domain = domain;
        if (domain.1 - domain.0).abs() < 1e-12 {
            domain.1 = domain.0 + 1e-9;
        }
        Self { domain, range }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        let t = (v - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let t = (px - self.range.0) / (self.range.1 - self.range.0);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }
}

/// Base-10 logarithmic map. The domain must be strictly positive; that is
/// the caller's contract and is not guarded here.
#[derive(Clone, Copy, Debug)]
pub struct LogScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    log_min: f64,
    log_max: f64,
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let log_min = domain.0.log10();
        let mut log_max = domain.1.log10();
        if (log_max - log_min).abs() < 1e-12 {
            log_max = log_min + 1e-9;
        }
        Self { domain, range, log_min, log_max }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        let t = (v.log10() - self.log_min) / (self.log_max - self.log_min);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let t = (px - self.range.0) / (self.range.1 - self.range.0);
        10f64.powf(self.log_min + t * (self.log_max - self.log_min))
    }
}

/// Temporal map: dates become day numbers, then a linear map to pixels.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub domain: (NaiveDate, NaiveDate),
    pub range: (f64, f64),
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let inner = LinearScale::new((Self::day_number(domain.0), Self::day_number(domain.1)), range);
        Self { domain, range, inner }
    }

    /// Days since the common era, the working coordinate of this scale.
    #[inline]
    pub fn day_number(date: NaiveDate) -> f64 {
        f64::from(date.num_days_from_ce())
    }

    #[inline]
    pub fn to_px(&self, date: NaiveDate) -> f64 {
        self.inner.to_px(Self::day_number(date))
    }

    #[inline]
    pub fn days_to_px(&self, days: f64) -> f64 {
        self.inner.to_px(days)
    }

    /// Pixel back to a day number (fractional; callers round as needed).
    #[inline]
    pub fn invert_days(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }

    pub fn invert(&self, px: f64) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.inner.invert(px).round() as i32)
    }
}

/// Categorical map allocating equal-width slots with inner/outer padding.
/// Keys are deduplicated in first-seen order; the same key always yields the
/// same slot for a given domain.
#[derive(Clone, Debug)]
pub struct BandScale {
    keys: Vec<String>,
    pub range: (f64, f64),
    pub padding_inner: f64,
    pub padding_outer: f64,
}

impl BandScale {
    pub fn new(
        keys: impl IntoIterator<Item = String>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let mut seen = Vec::new();
        for k in keys {
            if !seen.contains(&k) {
                seen.push(k);
            }
        }
        Self { keys: seen, range, padding_inner, padding_outer }
    }

    /// Like `new`, but with the key slots in lexicographic order.
    pub fn sorted(
        keys: impl IntoIterator<Item = String>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let mut scale = Self::new(keys, range, padding_inner, padding_outer);
        scale.keys.sort();
        scale
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Distance between consecutive slot origins.
    pub fn step(&self) -> f64 {
        let n = self.keys.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / (n - self.padding_inner + 2.0 * self.padding_outer)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Left edge of the key's slot.
    pub fn position(&self, key: &str) -> Option<f64> {
        let i = self.keys.iter().position(|k| k == key)?;
        Some(self.range.0 + self.step() * (self.padding_outer + i as f64))
    }

    pub fn center(&self, key: &str) -> Option<f64> {
        Some(self.position(key)? + self.bandwidth() / 2.0)
    }
}

/// Key-to-color map cycling a palette, in first-seen key order.
#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
    entries: Vec<(String, Rgba)>,
}

/// Color for unknown keys and for an empty palette.
const ORDINAL_FALLBACK: Rgba = Rgba::rgb(0x80, 0x80, 0x80);

impl OrdinalScale {
    pub fn from_keys(keys: impl IntoIterator<Item = String>, palette: &[Rgba]) -> Self {
        let mut scale = Self::default();
        scale.extend_keys(keys, palette);
        scale
    }

    /// Assign palette colors to keys not seen before. Entries are append-only,
    /// so a key's color survives later updates no matter which records remain.
    pub fn extend_keys(&mut self, keys: impl IntoIterator<Item = String>, palette: &[Rgba]) {
        for k in keys {
            if self.entries.iter().any(|(seen, _)| *seen == k) {
                continue;
            }
            let color = match palette.is_empty() {
                true => ORDINAL_FALLBACK,
                false => palette[self.entries.len() % palette.len()],
            };
            self.entries.push((k, color));
        }
    }

    pub fn color(&self, key: &str) -> Rgba {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(ORDINAL_FALLBACK)
    }

    pub fn entries(&self) -> &[(String, Rgba)] {
        &self.entries
    }
}

/// Min/max of a metric over the records that carry it.
pub fn extent(records: &[Record], field: &str) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for r in records {
        if let Some(v) = r.metric(field) {
            min = min.min(v);
            max = max.max(v);
            any = true;
        }
    }
    if any { Some((min, max)) } else { None }
}

/// How an axis resolves its numeric domain from the active dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DomainPolicy {
    /// Explicit endpoints (the only form log axes accept).
    Fixed(f64, f64),
    /// Data extent expanded to `[min / (1 + pad), max * (1 + pad)]`.
    Auto { pad: f64 },
    /// `[0, max * (1 + pad)]`, for bar heights.
    AutoZero { pad: f64 },
}

impl DomainPolicy {
    pub fn auto() -> Self {
        Self::Auto { pad: DEFAULT_PAD }
    }

    pub fn auto_zero() -> Self {
        Self::AutoZero { pad: DEFAULT_PAD }
    }

    pub fn resolve(&self, records: &[Record], field: &str) -> (f64, f64) {
        match *self {
            Self::Fixed(min, max) => (min, max),
            Self::Auto { pad } => match extent(records, field) {
                Some((min, max)) => (min / (1.0 + pad), max * (1.0 + pad)),
                None => (0.0, 1.0),
            },
            Self::AutoZero { pad } => match extent(records, field) {
                Some((_, max)) => (0.0, max * (1.0 + pad)),
                None => (0.0, 1.0),
            },
        }
    }
}

/// A resolved scale of any kind. Band scales are keyed; `to_px` on a band
/// returns the start of the range (use `position`/`center` via `as_band`).
#[derive(Clone, Debug)]
pub enum AnyScale {
    Linear(LinearScale),
    Log(LogScale),
    Time(TimeScale),
    Band(BandScale),
}

impl AnyScale {
    pub fn to_px(&self, v: f64) -> f64 {
        match self {
            Self::Linear(s) => s.to_px(v),
            Self::Log(s) => s.to_px(v),
            Self::Time(s) => s.days_to_px(v),
            Self::Band(s) => s.range.0,
        }
    }

    pub fn invert(&self, px: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(px),
            Self::Log(s) => s.invert(px),
            Self::Time(s) => s.invert_days(px),
            Self::Band(s) => s.range.0,
        }
    }

    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&TimeScale> {
        match self {
            Self::Time(s) => Some(s),
            _ => None,
        }
    }
}
