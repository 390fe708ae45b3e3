// File: crates/easel-core/src/hover.rs
// Summary: Nearest-point lookup for the pointer-following focus overlay.

/// Find the item whose key is closest to `x` in a slice sorted ascending by
/// `key`. Bisects to the insertion point, then compares the neighbor on each
/// side; ties resolve to the earlier item. Queries outside the key range
/// return the boundary item. Empty input returns `None`.
pub fn nearest_by<T, F>(items: &[T], x: f64, key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return None;
    }
    let i = items.partition_point(|t| key(t) < x);
    if i == 0 {
        return items.first();
    }
    if i >= items.len() {
        return items.last();
    }
    let before = &items[i - 1];
    let after = &items[i];
    if x - key(before) <= key(after) - x {
        Some(before)
    } else {
        Some(after)
    }
}

/// Resolved focus annotation in plot coordinates: the marker position and the
/// value label shown beside it.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusOverlay {
    pub x: f64,
    pub y: f64,
    pub label: String,
}
