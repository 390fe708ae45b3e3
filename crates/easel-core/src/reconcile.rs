// File: crates/easel-core/src/reconcile.rs
// Summary: Keyed enter/update/exit reconciliation over an arena of mark handles.
// Notes:
// - One live handle per present key. Exiting handles are unmapped from the key
//   index immediately but keep their slot until `prune` sees their death
//   transition finish; a key that returns mid-exit gets a fresh handle.
// - Duplicate keys within one target list are an upstream bug; the reconciler
//   assumes uniqueness and does not deduplicate.

use std::collections::{HashMap, HashSet};

use crate::animate::Transition;
use crate::geometry::MarkGeometry;

/// Mark family, which fixes the deterministic birth/death geometry.
#[derive(Clone, Copy, Debug)]
pub enum MarkKind {
    /// Bars are born and die as zero-height rectangles on the baseline.
    Bar { baseline: f64 },
    /// Points are born and die as zero-radius circles in place.
    Point,
}

impl MarkKind {
    fn birth(&self, target: &MarkGeometry) -> MarkGeometry {
        self.collapsed(target)
    }

    fn death(&self, last_target: &MarkGeometry) -> MarkGeometry {
        self.collapsed(last_target)
    }

    fn collapsed(&self, g: &MarkGeometry) -> MarkGeometry {
        match *self {
            Self::Bar { baseline } => MarkGeometry { y: baseline, height: 0.0, ..*g },
            Self::Point => MarkGeometry { radius: 0.0, ..*g },
        }
    }
}

/// One persistent visual handle: a key and its in-flight transition.
#[derive(Clone, Debug)]
pub struct Handle {
    pub key: String,
    pub transition: Transition,
    pub exiting: bool,
}

/// Which arena slots each phase of a reconciliation touched.
#[derive(Clone, Debug, Default)]
pub struct ReconcileOutcome {
    pub entered: Vec<usize>,
    pub updated: Vec<usize>,
    pub exited: Vec<usize>,
}

/// Arena of handles (slots + free list) with a key-to-slot index.
#[derive(Clone, Debug, Default)]
pub struct HandleSet {
    slots: Vec<Option<Handle>>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
}

impl HandleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live handles, i.e. distinct keys in the last target list.
    pub fn live_len(&self) -> usize {
        self.index.len()
    }

    /// Occupied slots, including exiting handles not yet pruned.
    pub fn occupied_len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Handle> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn get_by_key(&self, key: &str) -> Option<&Handle> {
        self.index.get(key).and_then(|&i| self.get(i))
    }

    /// All handles still on screen, live and exiting alike.
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Compare the live handle set against `targets` and schedule transitions.
    /// Entering keys get a handle starting at the kind's birth geometry;
    /// persisting keys are retargeted; absent keys are sent to the death
    /// geometry and unmapped. Nothing is destroyed here.
    pub fn reconcile(
        &mut self,
        targets: &[(String, MarkGeometry)],
        kind: MarkKind,
        now_ms: f64,
        duration_ms: f64,
    ) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();

        let target_keys: HashSet<&str> = targets.iter().map(|(k, _)| k.as_str()).collect();
        let exit_keys: Vec<String> = self
            .index
            .keys()
            .filter(|k| !target_keys.contains(k.as_str()))
            .cloned()
            .collect();
        for key in exit_keys {
            if let Some(slot) = self.index.remove(&key) {
                if let Some(handle) = self.slots[slot].as_mut() {
                    let death = kind.death(&handle.transition.to);
                    handle.transition.retarget(now_ms, death, duration_ms);
                    handle.exiting = true;
                    outcome.exited.push(slot);
                }
            }
        }

        for (key, geometry) in targets {
            match self.index.get(key).copied() {
                Some(slot) => {
                    if let Some(handle) = self.slots[slot].as_mut() {
                        if handle.transition.to != *geometry {
                            handle.transition.retarget(now_ms, *geometry, duration_ms);
                        }
                        outcome.updated.push(slot);
                    }
                }
                None => {
                    let handle = Handle {
                        key: key.clone(),
                        transition: Transition::new(kind.birth(geometry), *geometry, now_ms, duration_ms),
                        exiting: false,
                    };
                    let slot = self.alloc(handle);
                    self.index.insert(key.clone(), slot);
                    outcome.entered.push(slot);
                }
            }
        }

        outcome
    }

    /// Free the slots of exiting handles whose death transition has finished.
    /// Returns how many were destroyed.
    pub fn prune(&mut self, now_ms: f64) -> usize {
        let mut freed = 0;
        for slot in 0..self.slots.len() {
            let done = matches!(
                &self.slots[slot],
                Some(h) if h.exiting && h.transition.is_done(now_ms)
            );
            if done {
                self.slots[slot] = None;
                self.free.push(slot);
                freed += 1;
            }
        }
        freed
    }

    fn alloc(&mut self, handle: Handle) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(handle);
                slot
            }
            None => {
                self.slots.push(Some(handle));
                self.slots.len() - 1
            }
        }
    }
}
