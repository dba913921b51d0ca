//! # Scheduler Object & Control API
//!
//! The single-instance value that owns all MLFQ policy state: the task
//! table, the expired-quantum channel, and the manager bookkeeping. The
//! application constructs one, typically in a `static`, and wires it to
//! the host kernel:
//!
//! ```text
//! boot task                         timer ISR            manager task
//! ---------                         ---------            ------------
//! SCHED.init()
//! create workload tasks
//! SCHED.register(handle) x N
//! create manager task at
//!   TOP_PRIORITY + 1
//! SCHED.start_manager(handle)
//!                                   SCHED.on_tick()      SCHED.run_manager()
//! ```
//!
//! The tick-accounting entry point lives in `profiler`, the policy
//! transitions in `manager`; this module provides construction,
//! registration, and the read-only reporting surface.

use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::channel::{EventChannel, ExpiryQueue, InitError};
use crate::config::EVENT_QUEUE_LEN;
use crate::platform::Platform;
use crate::table::{RegisterError, TaskTable};
use crate::task::{Level, TaskHandle, TaskStats};

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// The MLFQ policy instance.
///
/// All methods take `&self`: shared fields are atomic words and compound
/// mutations run inside the platform critical section, so one instance can
/// be referenced concurrently from the tick ISR, the manager task, and
/// application tasks.
pub struct Scheduler<P, C = ExpiryQueue<EVENT_QUEUE_LEN>> {
    pub(crate) platform: P,
    pub(crate) table: TaskTable,
    pub(crate) channel: C,
    /// Raw handle of the manager task (0 = not yet started). The profiler
    /// reads it from ISR context to raise the direct notification.
    pub(crate) manager: AtomicUsize,
    /// Tick count of the last global boost.
    pub(crate) last_boost: AtomicU32,
    /// Optional visual indicator invoked after every level transition,
    /// e.g. an LED color keyed by the new band.
    pub(crate) indicator: Option<fn(Level)>,
}

impl<P: Platform> Scheduler<P> {
    /// Create a scheduler with the default statically-allocated event
    /// channel of `EVENT_QUEUE_LEN` entries.
    pub const fn new(platform: P) -> Self {
        Self::with_channel(platform, ExpiryQueue::new())
    }
}

impl<P: Platform, C: EventChannel> Scheduler<P, C> {
    /// Create a scheduler over a caller-supplied event channel, e.g. one
    /// backed by a kernel queue object.
    pub const fn with_channel(platform: P, channel: C) -> Self {
        Scheduler {
            platform,
            table: TaskTable::new(),
            channel,
            manager: AtomicUsize::new(0),
            last_boost: AtomicU32::new(0),
            indicator: None,
        }
    }

    /// Attach a level-transition indicator callback.
    pub const fn with_indicator(mut self, indicator: fn(Level)) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Reset all policy state: empty the table, drain the channel, forget
    /// the manager handle. Call once before creating the manager task.
    ///
    /// # Errors
    /// Propagates channel preparation failure; the manager task must not
    /// be started in that case.
    pub fn init(&self) -> Result<(), InitError> {
        self.channel.try_init()?;
        self.platform.critical_section(|| {
            self.table.clear();
            self.manager.store(0, Ordering::Relaxed);
            self.last_boost
                .store(self.platform.tick_count(), Ordering::Relaxed);
        });
        while self.channel.receive().is_some() {}
        Ok(())
    }

    /// Bring `task` under MLFQ management.
    ///
    /// The task enters at the high band: its slot gets the current tick as
    /// arrival time, a zero burst, the high-band quantum, and its host
    /// priority is retuned to `TOP_PRIORITY`.
    ///
    /// # Errors
    /// [`RegisterError::TableFull`] when all slots are occupied,
    /// [`RegisterError::AlreadyRegistered`] for a duplicate handle; table
    /// state is unchanged in both cases.
    pub fn register(&self, task: TaskHandle) -> Result<(), RegisterError> {
        let now = self.platform.tick_count();
        self.platform.critical_section(|| {
            self.table.occupy(task, now)?;
            self.platform
                .set_task_priority(task, Level::High.host_priority());
            Ok(())
        })
    }

    /// Record the manager task's own handle so the profiler can notify it
    /// from ISR context. Call after creating the manager task (at host
    /// priority `TOP_PRIORITY + 1`) and before it enters its loop.
    pub fn start_manager(&self, manager: TaskHandle) {
        self.manager.store(manager.into_raw(), Ordering::Relaxed);
    }

    /// By-value copy of the record at `index`, with a live burst read, for
    /// external reporting. `None` marks an empty slot or an out-of-range
    /// index; a reporting loop over `0..MAX_TASKS` skips those.
    pub fn stats(&self, index: usize) -> Option<TaskStats> {
        self.platform.critical_section(|| self.table.snapshot(index))
    }

    /// Zero the accumulated burst of `task` without changing its band.
    /// Returns `false` when the task is not registered.
    ///
    /// Burst accounting otherwise runs from one level transition to the
    /// next, so a task that blocks voluntarily carries its count into the
    /// next CPU burst. Applications that can tell when an interactive task
    /// is about to block can clear the count here so short bursts never
    /// accumulate into a spurious expiry.
    pub fn reset_burst(&self, task: TaskHandle) -> bool {
        self.platform.critical_section(|| match self.table.find(task) {
            Some(index) => {
                self.table.slot(index).reset_burst();
                true
            }
            None => false,
        })
    }

    /// Manager handle as registered by [`Scheduler::start_manager`].
    #[inline]
    pub(crate) fn manager_handle(&self) -> Option<TaskHandle> {
        TaskHandle::from_raw(self.manager.load(Ordering::Relaxed))
    }

    /// Fire the indicator callback for an applied transition.
    #[inline]
    pub(crate) fn emit_indicator(&self, applied: Option<Level>) {
        if let (Some(level), Some(indicator)) = (applied, self.indicator) {
            indicator(level);
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
