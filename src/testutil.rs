//! Shared test fixtures: an in-memory mock of the host kernel contract,
//! a capacity-one event channel for overflow scenarios, and tick drivers
//! shaped like the workloads the policy is meant to separate (CPU hogs
//! that never yield, interactive tasks that block after short bursts).

use core::cell::{Cell, RefCell};

use heapless::FnvIndexMap;

use crate::channel::EventChannel;
use crate::config::MAX_TASKS;
use crate::platform::Platform;
use crate::scheduler::Scheduler;
use crate::task::TaskHandle;

/// Non-zero raw value as a handle.
pub fn task(raw: usize) -> TaskHandle {
    TaskHandle::from_raw(raw).unwrap()
}

// ---------------------------------------------------------------------------
// Mock platform
// ---------------------------------------------------------------------------

/// Single-threaded in-memory host kernel: a settable running task, a
/// manually advanced tick counter (1 kHz, so ms == ticks), and a recorded
/// priority per handle.
pub struct MockPlatform {
    now: Cell<u32>,
    current: Cell<Option<TaskHandle>>,
    priorities: RefCell<FnvIndexMap<usize, u8, MAX_TASKS>>,
    notifications: Cell<u32>,
    yield_requests: Cell<u32>,
}

impl MockPlatform {
    pub fn new() -> Self {
        MockPlatform {
            now: Cell::new(0),
            current: Cell::new(None),
            priorities: RefCell::new(FnvIndexMap::new()),
            notifications: Cell::new(0),
            yield_requests: Cell::new(0),
        }
    }

    pub fn set_current(&self, task: Option<TaskHandle>) {
        self.current.set(task);
    }

    pub fn advance(&self, ticks: u32) {
        self.now.set(self.now.get().wrapping_add(ticks));
    }

    /// Last priority the policy assigned to `task`, if any.
    pub fn priority_of(&self, task: TaskHandle) -> Option<u8> {
        self.priorities.borrow().get(&task.into_raw()).copied()
    }

    /// Number of manager notifications raised from the tick path.
    pub fn notifications(&self) -> u32 {
        self.notifications.get()
    }

    /// Number of context switches requested on ISR return.
    pub fn yield_requests(&self) -> u32 {
        self.yield_requests.get()
    }
}

impl Platform for MockPlatform {
    fn current_task(&self) -> Option<TaskHandle> {
        self.current.get()
    }

    fn set_task_priority(&self, task: TaskHandle, priority: u8) {
        self.priorities
            .borrow_mut()
            .insert(task.into_raw(), priority)
            .ok();
    }

    fn tick_count(&self) -> u32 {
        self.now.get()
    }

    fn ms_to_ticks(&self, ms: u32) -> u32 {
        ms
    }

    fn notify_from_isr(&self, _task: TaskHandle) -> bool {
        self.notifications.set(self.notifications.get() + 1);
        // The manager outranks every managed task, so the notification
        // always wakes a higher-priority task.
        true
    }

    fn wait_for_event(&self, timeout_ticks: u32) {
        self.advance(timeout_ticks);
    }

    fn yield_from_isr(&self, higher_priority_woken: bool) {
        if higher_priority_woken {
            self.yield_requests.set(self.yield_requests.get() + 1);
        }
    }
}

// ---------------------------------------------------------------------------
// Capacity-one channel
// ---------------------------------------------------------------------------

/// Event channel holding a single undrained event, for overflow tests.
pub struct OneSlotChannel {
    slot: Cell<Option<TaskHandle>>,
}

impl OneSlotChannel {
    pub const fn new() -> Self {
        OneSlotChannel {
            slot: Cell::new(None),
        }
    }
}

impl EventChannel for OneSlotChannel {
    fn send_from_isr(&self, task: TaskHandle) -> bool {
        if self.slot.get().is_some() {
            return false;
        }
        self.slot.set(Some(task));
        true
    }

    fn receive(&self) -> Option<TaskHandle> {
        self.slot.take()
    }
}

// ---------------------------------------------------------------------------
// Workload drivers
// ---------------------------------------------------------------------------

/// Deliver `ticks` timer interrupts with `task` as the running task.
/// Models a CPU-bound stretch: the task holds the CPU for every tick.
pub fn run_for<C: EventChannel>(sched: &Scheduler<MockPlatform, C>, task: TaskHandle, ticks: u32) {
    sched.platform.set_current(Some(task));
    for _ in 0..ticks {
        sched.platform.advance(1);
        sched.on_tick();
    }
}

/// Interactive shape: a short computation, then a voluntary block (the
/// task leaves the CPU before its quantum can expire).
pub fn interactive_burst<C: EventChannel>(
    sched: &Scheduler<MockPlatform, C>,
    task: TaskHandle,
    burst: u32,
) {
    run_for(sched, task, burst);
    sched.platform.set_current(None);
}
