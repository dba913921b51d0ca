//! # Tick Profiler
//!
//! The ISR half of the policy. [`Scheduler::on_tick`] is called once per
//! system tick from the host kernel's timer-interrupt hook; it charges the
//! tick to the currently running task and raises the expired-quantum event
//! when the task has consumed its slice.
//!
//! The whole path is wait-free and bounded: at most one linear scan of the
//! task table, one lock-free queue push, one notification raise. No
//! critical section is taken from ISR context; the fields touched here are
//! single aligned words.

use crate::channel::EventChannel;
use crate::platform::Platform;
use crate::scheduler::Scheduler;

impl<P: Platform, C: EventChannel> Scheduler<P, C> {
    /// Timer-tick entry point. Call from the host kernel's tick hook, in
    /// interrupt context, at every tick.
    ///
    /// Per tick:
    /// 1. Query the running task; ticks spent in idle or in unmanaged
    ///    tasks are not accounted.
    /// 2. Charge the tick to the task's burst counter.
    /// 3. If a quantum is configured and the burst has reached it, publish
    ///    the handle on the event channel and notify the manager task.
    /// 4. Request a context switch on ISR return if the notification woke
    ///    the (higher-priority) manager.
    ///
    /// The burst counter is never reset here. Resetting is the manager's
    /// exclusive duty, so even when the channel is full and the event is
    /// dropped, the expiry condition stays latched and re-raises on the
    /// task's next running tick.
    pub fn on_tick(&self) {
        let mut higher_priority_woken = false;

        if let Some(current) = self.platform.current_task() {
            if let Some(slot) = self.table.slot_for(current) {
                let burst = slot.charge_tick();
                let quantum = slot.quantum();

                // quantum == 0 marks a record not yet configured; never
                // test it for expiry.
                if quantum != 0 && burst >= quantum {
                    let _ = self.channel.send_from_isr(current);
                    if let Some(manager) = self.manager_handle() {
                        higher_priority_woken = self.platform.notify_from_isr(manager);
                    }
                }
            }
        }

        self.platform.yield_from_isr(higher_priority_woken);
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::channel::EventChannel;
    use crate::config::QUANTUM_HIGH;
    use crate::scheduler::Scheduler;
    use crate::testutil::{run_for, task, MockPlatform};

    #[test]
    fn test_tick_charged_to_running_task_only() {
        let sched = Scheduler::new(MockPlatform::new());
        sched.init().unwrap();
        sched.register(task(1)).unwrap();
        sched.register(task(2)).unwrap();

        run_for(&sched, task(1), 3);
        assert_eq!(sched.stats(0).unwrap().burst_ticks, 3);
        assert_eq!(sched.stats(1).unwrap().burst_ticks, 0);
    }

    #[test]
    fn test_idle_and_unmanaged_ticks_ignored() {
        let sched = Scheduler::new(MockPlatform::new());
        sched.init().unwrap();
        sched.register(task(1)).unwrap();

        // Idle context: no running task.
        sched.platform.set_current(None);
        sched.platform.advance(1);
        sched.on_tick();

        // A task the policy does not manage.
        run_for(&sched, task(77), 4);

        assert_eq!(sched.stats(0).unwrap().burst_ticks, 0);
        assert!(sched.channel.receive().is_none());
    }

    #[test]
    fn test_expiry_publishes_event_and_notifies_manager() {
        let sched = Scheduler::new(MockPlatform::new());
        sched.init().unwrap();
        sched.register(task(1)).unwrap();
        sched.start_manager(task(50));

        run_for(&sched, task(1), QUANTUM_HIGH - 1);
        assert_eq!(sched.platform.notifications(), 0);
        assert!(sched.channel.receive().is_none());

        run_for(&sched, task(1), 1);
        assert_eq!(sched.platform.notifications(), 1);
        assert_eq!(sched.platform.yield_requests(), 1);
        assert_eq!(sched.channel.receive(), Some(task(1)));
    }

    #[test]
    fn test_expiry_without_manager_still_publishes() {
        let sched = Scheduler::new(MockPlatform::new());
        sched.init().unwrap();
        sched.register(task(1)).unwrap();

        run_for(&sched, task(1), QUANTUM_HIGH);
        assert_eq!(sched.platform.notifications(), 0);
        assert_eq!(sched.channel.receive(), Some(task(1)));
    }

    #[test]
    fn test_condition_stays_latched_until_manager_resets() {
        let sched = Scheduler::new(MockPlatform::new());
        sched.init().unwrap();
        sched.register(task(1)).unwrap();

        // Run past the quantum: the ISR never resets the burst, so every
        // further tick re-raises.
        run_for(&sched, task(1), QUANTUM_HIGH + 2);
        assert_eq!(sched.stats(0).unwrap().burst_ticks, QUANTUM_HIGH + 2);

        let mut events = 0;
        while sched.channel.receive().is_some() {
            events += 1;
        }
        assert_eq!(events, 3);
    }

    #[test]
    fn test_zero_quantum_never_expires() {
        let sched = Scheduler::new(MockPlatform::new());
        sched.init().unwrap();
        sched.register(task(1)).unwrap();
        // Force the unconfigured state.
        sched.table.slot(0).set_quantum(0);

        run_for(&sched, task(1), 100);
        assert!(sched.channel.receive().is_none());
        assert_eq!(sched.stats(0).unwrap().burst_ticks, 100);
    }
}
