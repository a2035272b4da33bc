//! The preallocated record ring.
//!
//! Writers from any thread reserve a slot with one atomic increment, stamp
//! the cycle counter, and store their record. Slots are unique; slot order
//! is reservation order, which is what reconstruction replays. There is no
//! growth: running out of slots is a sizing bug in the caller and aborts.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::clock;
use super::record::{current_thread_id, ProfileRecord, RecordKind, Site};

/// Default ring capacity, in records.
pub const DEFAULT_RECORD_CAPACITY: usize = 4096 * 1024;

pub(crate) struct RecordRing {
    slots: Box<[UnsafeCell<MaybeUninit<ProfileRecord>>]>,
    next: AtomicUsize,
}

// SAFETY: every slot is written at most once per run, through an index that
// exactly one thread reserved via fetch_add; reads only happen after writers
// are quiescent (the facade's stop contract).
unsafe impl Sync for RecordRing {}

impl RecordRing {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect();
        Self {
            slots,
            next: AtomicUsize::new(0),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Appends one record: reserve a slot, check bounds, read the clock,
    /// store. Wait-free; a full ring is fatal.
    pub(crate) fn push(&self, kind: RecordKind, site: Site) {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        assert!(
            index < self.slots.len(),
            "profile record ring overflow: capacity {} exhausted",
            self.slots.len()
        );
        let cycles = clock::read_cpu_timer();
        let record = ProfileRecord {
            kind,
            thread_id: current_thread_id(),
            cycles,
            site,
        };
        // SAFETY: `index` was reserved above and is in bounds; no other
        // thread can write this slot during the current run.
        unsafe { (*self.slots[index].get()).write(record) };
    }

    /// Discards all records. Callers must ensure no push is in flight.
    pub(crate) fn reset(&self) {
        self.next.store(0, Ordering::Release);
    }

    pub(crate) fn len(&self) -> usize {
        self.next.load(Ordering::Acquire).min(self.slots.len())
    }

    /// Copies the written prefix out in slot order. Callers must ensure no
    /// push is in flight (the facade stops the profiler first).
    pub(crate) fn snapshot(&self) -> Vec<ProfileRecord> {
        let len = self.len();
        (0..len)
            // SAFETY: slots below `len` were fully written by `push`.
            .map(|index| unsafe { (*self.slots[index].get()).assume_init_read() })
            .collect()
    }
}
