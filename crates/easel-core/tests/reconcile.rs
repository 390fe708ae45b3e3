// File: crates/easel-core/tests/reconcile.rs
// Purpose: Enter/update/exit semantics, handle lifetimes, and retarget convergence.

use easel_core::{HandleSet, MarkGeometry, MarkKind, Rgba};

const BASELINE: f64 = 300.0;

fn bar(x: f64, height: f64) -> MarkGeometry {
    MarkGeometry {
        x,
        y: BASELINE - height,
        width: 40.0,
        height,
        radius: 0.0,
        color: Rgba::rgb(0x1f, 0x77, 0xb4),
    }
}

fn targets(entries: &[(&str, MarkGeometry)]) -> Vec<(String, MarkGeometry)> {
    entries.iter().map(|(k, g)| (k.to_string(), *g)).collect()
}

#[test]
fn entering_bars_grow_from_the_baseline() {
    let mut set = HandleSet::new();
    let outcome = set.reconcile(
        &targets(&[("a", bar(0.0, 100.0))]),
        MarkKind::Bar { baseline: BASELINE },
        0.0,
        750.0,
    );
    assert_eq!(outcome.entered.len(), 1);

    let h = set.get_by_key("a").unwrap();
    assert_eq!(h.transition.from.height, 0.0);
    assert_eq!(h.transition.from.y, BASELINE);
    assert_eq!(h.transition.to.height, 100.0);
    // Halfway through the grow-in.
    let mid = h.transition.at(375.0);
    assert!((mid.height - 50.0).abs() < 1e-9);
}

#[test]
fn reconcile_twice_with_same_data_is_idempotent() {
    let mut set = HandleSet::new();
    let data = targets(&[("a", bar(0.0, 100.0)), ("b", bar(50.0, 150.0))]);
    let kind = MarkKind::Bar { baseline: BASELINE };
    set.reconcile(&data, kind, 0.0, 750.0);
    let second = set.reconcile(&data, kind, 100.0, 750.0);
    assert!(second.entered.is_empty());
    assert!(second.exited.is_empty());
    assert_eq!(second.updated.len(), 2);
    assert_eq!(set.live_len(), 2);
}

#[test]
fn live_handle_count_tracks_distinct_keys() {
    let mut set = HandleSet::new();
    let kind = MarkKind::Bar { baseline: BASELINE };
    set.reconcile(&targets(&[("a", bar(0.0, 10.0)), ("b", bar(50.0, 20.0))]), kind, 0.0, 100.0);
    set.reconcile(&targets(&[("b", bar(50.0, 30.0)), ("c", bar(100.0, 40.0))]), kind, 200.0, 100.0);
    set.reconcile(&targets(&[("c", bar(100.0, 50.0))]), kind, 400.0, 100.0);
    assert_eq!(set.live_len(), 1);

    // Exits finished; prune frees the slots with no leaks or duplicates.
    set.prune(10_000.0);
    assert_eq!(set.occupied_len(), 1);
    assert_eq!(set.live_len(), 1);
}

#[test]
fn exiting_handles_outlive_the_reconciliation_pass() {
    let mut set = HandleSet::new();
    let kind = MarkKind::Bar { baseline: BASELINE };
    set.reconcile(&targets(&[("a", bar(0.0, 100.0))]), kind, 0.0, 750.0);
    let outcome = set.reconcile(&targets(&[]), kind, 1000.0, 750.0);
    assert_eq!(outcome.exited.len(), 1);

    // Not live, but still on screen shrinking toward the baseline.
    assert_eq!(set.live_len(), 0);
    assert_eq!(set.occupied_len(), 1);
    let slot = outcome.exited[0];
    let h = set.get(slot).unwrap();
    assert!(h.exiting);
    assert_eq!(h.transition.to.height, 0.0);
    assert_eq!(h.transition.to.y, BASELINE);

    // Mid-exit prune is a no-op; after the death transition it frees the slot.
    assert_eq!(set.prune(1375.0), 0);
    assert_eq!(set.prune(1750.0), 1);
    assert_eq!(set.occupied_len(), 0);
}

#[test]
fn returning_key_gets_a_fresh_handle_while_the_old_one_dies() {
    let mut set = HandleSet::new();
    let kind = MarkKind::Bar { baseline: BASELINE };
    set.reconcile(&targets(&[("a", bar(0.0, 100.0))]), kind, 0.0, 750.0);
    set.reconcile(&targets(&[]), kind, 1000.0, 750.0);

    // "a" comes back before its exit completes.
    let outcome = set.reconcile(&targets(&[("a", bar(0.0, 80.0))]), kind, 1200.0, 750.0);
    assert_eq!(outcome.entered.len(), 1);
    assert_eq!(set.live_len(), 1);
    assert_eq!(set.occupied_len(), 2);

    let fresh = set.get_by_key("a").unwrap();
    assert!(!fresh.exiting);
    assert_eq!(fresh.transition.to.height, 80.0);

    // The old handle finishes dying and is pruned; the fresh one stays.
    set.prune(1000.0 + 750.0);
    assert_eq!(set.occupied_len(), 1);
    assert_eq!(set.live_len(), 1);
}

#[test]
fn retarget_resumes_from_the_sampled_geometry() {
    let mut set = HandleSet::new();
    let kind = MarkKind::Bar { baseline: BASELINE };
    set.reconcile(&targets(&[("a", bar(0.0, 100.0))]), kind, 0.0, 1000.0);

    // Supersede mid-flight: the handle restarts from its on-screen height
    // (50 at t=500) and converges to the latest target only.
    set.reconcile(&targets(&[("a", bar(0.0, 200.0))]), kind, 500.0, 1000.0);
    let h = set.get_by_key("a").unwrap();
    assert!((h.transition.from.height - 50.0).abs() < 1e-9);
    assert_eq!(h.transition.to.height, 200.0);
    let done = h.transition.at(1500.0);
    assert_eq!(done.height, 200.0);
    // Past the deadline it stays clamped on the target, no oscillation.
    assert_eq!(h.transition.at(9000.0).height, 200.0);
}

#[test]
fn points_are_born_at_zero_radius_in_place() {
    let mut set = HandleSet::new();
    let point = MarkGeometry {
        x: 120.0,
        y: 80.0,
        width: 0.0,
        height: 0.0,
        radius: 12.0,
        color: Rgba::rgb(0xd6, 0x27, 0x28),
    };
    set.reconcile(&targets(&[("chile", point)]), MarkKind::Point, 0.0, 100.0);
    let h = set.get_by_key("chile").unwrap();
    assert_eq!(h.transition.from.radius, 0.0);
    assert_eq!(h.transition.from.x, 120.0);
    assert_eq!(h.transition.from.y, 80.0);
}
