//! # Scheduler Manager
//!
//! The task half of the policy: a dedicated supervisor task running at
//! host priority `TOP_PRIORITY + 1`, so it preempts every managed task.
//! Each iteration drains the expired-quantum channel (demoting offenders),
//! runs the periodic global boost, then blocks on its notification signal
//! with a bounded timeout.
//!
//! The manager is the single writer of level transitions. Every transition
//! funnels through one apply routine: band store, host-priority retune,
//! fresh quantum, burst reset, all inside one critical section so the tick
//! ISR observes either the old quantum/burst pair or the new one, never a
//! torn mix.

use core::sync::atomic::Ordering;

use crate::channel::EventChannel;
use crate::config::{BOOST_PERIOD_MS, MANAGER_IDLE_MS, MAX_TASKS};
use crate::platform::Platform;
use crate::scheduler::Scheduler;
use crate::table::Slot;
use crate::task::{Level, TaskHandle};

impl<P: Platform, C: EventChannel> Scheduler<P, C> {
    /// Body of the manager task. Never returns.
    ///
    /// The wait is bounded by the idle interval, so the boost cadence is
    /// honored within one interval even when no quantum ever expires.
    pub fn run_manager(&self) -> ! {
        let idle_ticks = self.platform.ms_to_ticks(MANAGER_IDLE_MS);
        loop {
            self.manager_step();
            self.platform.wait_for_event(idle_ticks);
        }
    }

    /// One manager iteration: drain demotions, then the periodic boost.
    ///
    /// Exposed separately from [`run_manager`](Scheduler::run_manager) so
    /// hosts that fold the manager into an existing supervisor task can
    /// call it on their own cadence.
    pub fn manager_step(&self) {
        while let Some(expired) = self.channel.receive() {
            match self.platform.critical_section(|| self.table.find(expired)) {
                Some(index) => self.demote(index),
                // Stale event: the handle left the table between expiry
                // and drain.
                None => log::debug!(
                    "stale expiry event for task {:#x}",
                    expired.into_raw()
                ),
            }
        }

        let now = self.platform.tick_count();
        let boost_period = self.platform.ms_to_ticks(BOOST_PERIOD_MS);
        if now.wrapping_sub(self.last_boost.load(Ordering::Relaxed)) >= boost_period {
            self.global_boost();
            self.last_boost.store(now, Ordering::Relaxed);
        }
    }

    /// Move the task at `index` one band down, saturating at the floor.
    ///
    /// A `Low` task stays at `Low` but still passes through the full
    /// transition, so its burst counter restarts; repeated expiry events
    /// from a persistent hog are harmless.
    pub(crate) fn demote(&self, index: usize) {
        let applied = self.platform.critical_section(|| {
            let slot = self.table.slot(index);
            slot.handle().map(|task| {
                let next = slot.level().demoted();
                self.apply_level(slot, task, next);
                next
            })
        });
        self.emit_indicator(applied);
    }

    /// Move `task` one band up, for tasks the host application classifies
    /// as interactive. A full no-op at the top band and for unregistered
    /// handles.
    pub fn promote(&self, task: TaskHandle) {
        let applied = self.platform.critical_section(|| {
            let index = self.table.find(task)?;
            let slot = self.table.slot(index);
            let next = slot.level().promoted()?;
            self.apply_level(slot, task, next);
            Some(next)
        });
        self.emit_indicator(applied);
    }

    /// Reset every occupied slot to the high band, unconditionally.
    ///
    /// The unconditional transition is what bounds starvation: after a
    /// boost every registered task is back at `High` with a zero burst,
    /// whatever its history. Slots transition independently; the order is
    /// not significant.
    pub fn global_boost(&self) {
        for index in 0..MAX_TASKS {
            let applied = self.platform.critical_section(|| {
                let slot = self.table.slot(index);
                slot.handle().map(|task| {
                    self.apply_level(slot, task, Level::High);
                    Level::High
                })
            });
            self.emit_indicator(applied);
        }
    }

    /// The single mutator of a task's band. Caller holds the critical
    /// section. Order matters for the concurrent ISR reader: the quantum
    /// store and burst reset must land together under the mask.
    fn apply_level(&self, slot: &Slot, task: TaskHandle, level: Level) {
        slot.set_level(level);
        self.platform.set_task_priority(task, level.host_priority());
        slot.set_quantum(level.quantum());
        slot.reset_burst();
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
