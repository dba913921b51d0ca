//! # Host Kernel Contract
//!
//! The policy never talks to the host kernel directly; every interaction
//! goes through the [`Platform`] trait. Any preemptive fixed-priority
//! kernel that can set task priorities, report the running task from ISR
//! context, and deliver an ISR-safe notification satisfies the contract.
//!
//! Splitting the kernel out this way keeps the policy core testable in
//! plain task context: the test suite drives it with an in-memory mock
//! platform and a simulated tick.

use crate::task::TaskHandle;

/// Services the policy requires from the host kernel.
///
/// Method-by-method context requirements:
///
/// | Method                 | Context        | May block |
/// |------------------------|----------------|-----------|
/// | `current_task`         | ISR            | no        |
/// | `set_task_priority`    | task (in CS)   | no        |
/// | `tick_count`           | ISR or task    | no        |
/// | `ms_to_ticks`          | any            | no        |
/// | `critical_section`     | task           | no        |
/// | `notify_from_isr`      | ISR            | no        |
/// | `wait_for_event`       | manager task   | yes       |
/// | `yield_from_isr`       | ISR            | no        |
pub trait Platform {
    /// Identity of the currently running task, or `None` when the tick
    /// preempted the idle context. Must be valid from ISR context.
    fn current_task(&self) -> Option<TaskHandle>;

    /// Retune the host priority of `task`. Non-blocking; called inside the
    /// critical section as part of a level transition.
    fn set_task_priority(&self, task: TaskHandle, priority: u8);

    /// Monotonic (wrapping) tick counter.
    fn tick_count(&self) -> u32;

    /// Convert milliseconds to host ticks.
    fn ms_to_ticks(&self, ms: u32) -> u32;

    /// Run `f` with preemption of policy state excluded.
    ///
    /// The default masks interrupts via [`crate::sync::critical_section`],
    /// which is correct for single-core ARM targets; kernels with a scoped
    /// critical-section primitive of their own should forward to it.
    #[inline]
    fn critical_section<R>(&self, f: impl FnOnce() -> R) -> R {
        crate::sync::critical_section(f)
    }

    /// Raise the manager's direct-notification signal from ISR context.
    /// Returns `true` if this woke a task of higher priority than the one
    /// the ISR interrupted. The signal is binary: repeated raises before
    /// the manager runs coalesce into one wake.
    fn notify_from_isr(&self, task: TaskHandle) -> bool;

    /// Block the calling (manager) task until its notification signal is
    /// raised or `timeout_ticks` elapse, whichever comes first. Consumes
    /// the signal.
    fn wait_for_event(&self, timeout_ticks: u32);

    /// Request a context switch on ISR return when `higher_priority_woken`
    /// is set; a no-op otherwise. Called at the end of every tick hook.
    fn yield_from_isr(&self, higher_priority_woken: bool);
}
