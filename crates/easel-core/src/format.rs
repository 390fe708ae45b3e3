// File: crates/easel-core/src/format.rs
// Summary: Number formatting helpers for tick labels and the focus overlay.

/// Round to an integer and group with commas: `1234567.4` -> `"1,234,567"`.
pub fn thousands(v: f64) -> String {
    let neg = v < 0.0;
    let digits = (v.abs().round() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if neg {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"$1,234"`.
pub fn dollars(v: f64) -> String {
    if v < 0.0 {
        format!("-${}", thousands(-v))
    } else {
        format!("${}", thousands(v))
    }
}

/// Truncated thousands: `25400.0` -> `"25k"`.
pub fn kilo(v: f64) -> String {
    format!("{}k", (v / 1000.0) as i64)
}

/// Integer value with a unit suffix: `(163.0, "m")` -> `"163m"`.
pub fn with_suffix(v: f64, suffix: &str) -> String {
    format!("{}{}", v.round() as i64, suffix)
}
