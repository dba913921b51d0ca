//! # MLFQ Configuration
//!
//! Compile-time constants governing the scheduling policy. All limits are
//! fixed at compile time, no dynamic allocation.

/// Maximum number of tasks the policy can manage simultaneously.
/// This bounds the static task table. Lookup is a linear scan, so the
/// table is intentionally small.
pub const MAX_TASKS: usize = 16;

/// Highest host-kernel priority in the MLFQ band. A task at level ordinal
/// `k` runs at host priority `TOP_PRIORITY - k`; the scheduler manager task
/// must be created at `TOP_PRIORITY + 1` so it preempts every managed task.
pub const TOP_PRIORITY: u8 = 5;

/// Quantum (tick budget per CPU burst) for the high-priority band.
pub const QUANTUM_HIGH: u32 = 10;

/// Quantum for the medium-priority band.
pub const QUANTUM_MEDIUM: u32 = 20;

/// Quantum for the low-priority band.
pub const QUANTUM_LOW: u32 = 50;

/// Global boost cadence in milliseconds. Every boost period the manager
/// resets all registered tasks to the high band, which bounds starvation
/// of demoted CPU-bound tasks.
pub const BOOST_PERIOD_MS: u32 = 500;

/// Manager idle interval in milliseconds. The manager blocks on its
/// notification signal with this timeout, so the boost deadline is honored
/// within one idle interval even when no quantum expires.
pub const MANAGER_IDLE_MS: u32 = 10;

/// Capacity of the expired-quantum event channel. Sized so every managed
/// task can have two undrained expiry events in flight before the producer
/// starts dropping. Must be a power of two (lock-free queue requirement).
pub const EVENT_QUEUE_LEN: usize = MAX_TASKS * 2;

// The quantum ladder must be strictly increasing with level ordinal:
// higher bands get shorter slices.
const _: () = assert!(QUANTUM_HIGH < QUANTUM_MEDIUM);
const _: () = assert!(QUANTUM_MEDIUM < QUANTUM_LOW);
const _: () = assert!(QUANTUM_HIGH > 0);
const _: () = assert!(EVENT_QUEUE_LEN.is_power_of_two());
