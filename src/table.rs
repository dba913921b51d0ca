//! # Task Table
//!
//! Fixed-capacity registry of managed tasks, keyed on the host kernel's
//! opaque task handle. One slot per task; capacity is `MAX_TASKS` and
//! lookup is a linear scan over a deliberately small array.
//!
//! ## Concurrency
//!
//! The table is shared between the tick ISR and task context, so every
//! field is an aligned atomic word:
//!
//! - the tick profiler (ISR) scans `handle`, increments `burst_ticks` and
//!   reads `quantum_ticks`, all lock-free;
//! - everything else (registration, level transitions, snapshots) runs in
//!   task context inside the platform critical section, which masks the
//!   tick interrupt on the single-core targets this policy serves.
//!
//! All loads and stores use relaxed ordering: cross-field consistency comes
//! from the critical section, not from hardware fences.

use core::fmt;
use core::sync::atomic::{AtomicU32, AtomicU8, AtomicUsize, Ordering};

use crate::config::MAX_TASKS;
use crate::task::{Level, TaskHandle, TaskStats};

// ---------------------------------------------------------------------------
// Registration errors
// ---------------------------------------------------------------------------

/// Why a task could not be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// All `MAX_TASKS` slots are occupied.
    TableFull,
    /// The handle is already present in the table.
    AlreadyRegistered,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::TableFull => f.write_str("task table full"),
            RegisterError::AlreadyRegistered => f.write_str("task already registered"),
        }
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One task record. A raw handle value of 0 marks the slot empty.
pub(crate) struct Slot {
    /// Raw task handle (0 = empty). Written in task context, scanned by
    /// the ISR.
    handle: AtomicUsize,
    /// Band ordinal. Written only through level transitions.
    level: AtomicU8,
    /// Host tick count at registration.
    arrival_tick: AtomicU32,
    /// Ticks accumulated in the current CPU burst. The ISR is the only
    /// incrementer; the manager resets it on every level transition.
    burst_ticks: AtomicU32,
    /// Tick budget for the current band. 0 means "not configured, never
    /// test for expiry".
    quantum_ticks: AtomicU32,
}

impl Slot {
    /// Empty slot. Used to initialize the static array.
    pub(crate) const EMPTY: Slot = Slot {
        handle: AtomicUsize::new(0),
        level: AtomicU8::new(Level::High as u8),
        arrival_tick: AtomicU32::new(0),
        burst_ticks: AtomicU32::new(0),
        quantum_ticks: AtomicU32::new(0),
    };

    /// Handle occupying this slot, if any.
    #[inline]
    pub(crate) fn handle(&self) -> Option<TaskHandle> {
        TaskHandle::from_raw(self.handle.load(Ordering::Relaxed))
    }

    #[inline]
    pub(crate) fn level(&self) -> Level {
        // The field only ever holds a valid ordinal.
        match Level::from_ordinal(self.level.load(Ordering::Relaxed)) {
            Some(level) => level,
            None => Level::High,
        }
    }

    #[inline]
    pub(crate) fn set_level(&self, level: Level) {
        self.level.store(level.ordinal(), Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn quantum(&self) -> u32 {
        self.quantum_ticks.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn set_quantum(&self, ticks: u32) {
        self.quantum_ticks.store(ticks, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn burst(&self) -> u32 {
        self.burst_ticks.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn reset_burst(&self) {
        self.burst_ticks.store(0, Ordering::Relaxed);
    }

    /// Charge one tick to this slot and return the new burst total.
    /// ISR path: a single atomic read-modify-write.
    #[inline]
    pub(crate) fn charge_tick(&self) -> u32 {
        self.burst_ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn clear(&self) {
        self.handle.store(0, Ordering::Relaxed);
        self.level.store(Level::High as u8, Ordering::Relaxed);
        self.arrival_tick.store(0, Ordering::Relaxed);
        self.burst_ticks.store(0, Ordering::Relaxed);
        self.quantum_ticks.store(0, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// The registry itself: a fixed array of slots.
pub(crate) struct TaskTable {
    slots: [Slot; MAX_TASKS],
}

impl TaskTable {
    pub(crate) const fn new() -> Self {
        TaskTable {
            slots: [Slot::EMPTY; MAX_TASKS],
        }
    }

    /// Reset every slot to the empty state. Caller holds the critical
    /// section.
    pub(crate) fn clear(&self) {
        for slot in &self.slots {
            slot.clear();
        }
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    /// Index of the slot holding `task`, if registered. Linear scan.
    pub(crate) fn find(&self, task: TaskHandle) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.handle() == Some(task))
    }

    /// Slot holding `task`, if registered. Lock-free scan for the ISR path.
    #[inline]
    pub(crate) fn slot_for(&self, task: TaskHandle) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.handle() == Some(task))
    }

    /// Occupy the first empty slot with entry-band defaults.
    ///
    /// Caller holds the critical section. The handle is published last so
    /// the ISR never observes a half-initialized record even if a port's
    /// critical section does not mask the tick interrupt.
    pub(crate) fn occupy(&self, task: TaskHandle, now: u32) -> Result<usize, RegisterError> {
        if self.find(task).is_some() {
            return Err(RegisterError::AlreadyRegistered);
        }
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.handle().is_none() {
                slot.set_level(Level::High);
                slot.arrival_tick.store(now, Ordering::Relaxed);
                slot.reset_burst();
                slot.set_quantum(Level::High.quantum());
                slot.handle.store(task.into_raw(), Ordering::Relaxed);
                return Ok(index);
            }
        }
        Err(RegisterError::TableFull)
    }

    /// By-value copy of the record at `index`, with a live burst read.
    /// Caller holds the critical section.
    pub(crate) fn snapshot(&self, index: usize) -> Option<TaskStats> {
        let slot = self.slots.get(index)?;
        let handle = slot.handle()?;
        Some(TaskStats {
            handle,
            level: slot.level(),
            burst_ticks: slot.burst(),
            arrival_tick: slot.arrival_tick.load(Ordering::Relaxed),
            quantum_ticks: slot.quantum(),
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
