//! Per-thread allocation counters for array storage.
//!
//! Every header allocation and every in-place slack relocation performed by an
//! [`ArrayData`](crate::ArrayData) is counted on the thread that performed it.
//! The counters are cheap (a thread-local `Cell`) and always enabled; they exist
//! so that growth behavior can be asserted on, e.g. that a long run of
//! alternating appends and prepends reallocates only a logarithmic number of
//! times.

use std::cell::Cell;

/// A snapshot of the allocation counters of the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationStats {
    /// Headers allocated, for any reason.
    pub allocations: u64,
    /// Headers allocated to replace existing, non-empty content
    /// (detach or growth).
    pub reallocations: u64,
    /// In-place moves of the content inside an exclusively owned header
    /// (slack readjustment).
    pub relocations: u64,
    /// Elements copied by reallocations and relocations.
    pub elements_copied: u64,
}

impl AllocationStats {
    /// Returns the counters accumulated since `earlier` was taken.
    pub fn since(&self, earlier: &AllocationStats) -> AllocationStats {
        AllocationStats {
            allocations: self.allocations - earlier.allocations,
            reallocations: self.reallocations - earlier.reallocations,
            relocations: self.relocations - earlier.relocations,
            elements_copied: self.elements_copied - earlier.elements_copied,
        }
    }
}

thread_local! {
    static STATS: Cell<AllocationStats> = const {
        Cell::new(AllocationStats {
            allocations: 0,
            reallocations: 0,
            relocations: 0,
            elements_copied: 0,
        })
    };
}

/// Returns the counters of the current thread.
pub fn snapshot() -> AllocationStats {
    STATS.with(Cell::get)
}

/// Resets the counters of the current thread to zero.
pub fn reset() {
    STATS.with(|s| s.set(AllocationStats::default()));
}

#[inline]
fn update(f: impl FnOnce(&mut AllocationStats)) {
    STATS.with(|s| {
        let mut stats = s.get();
        f(&mut stats);
        s.set(stats);
    });
}

pub(crate) fn record_allocation(capacity: usize) {
    update(|s| s.allocations += 1);
    log::trace!("array header allocated: capacity={capacity}");
}

pub(crate) fn record_reallocation(copied: usize, old_capacity: usize, new_capacity: usize) {
    update(|s| {
        s.reallocations += 1;
        s.elements_copied += copied as u64;
    });
    log::trace!(
        "array reallocated: copied={copied}, capacity {old_capacity} -> {new_capacity}"
    );
}

pub(crate) fn record_relocation(moved: usize, old_offset: usize, new_offset: usize) {
    update(|s| {
        s.relocations += 1;
        s.elements_copied += moved as u64;
    });
    log::trace!("array relocated: moved={moved}, offset {old_offset} -> {new_offset}");
}
