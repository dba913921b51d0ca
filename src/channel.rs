//! # Expired-Quantum Event Channel
//!
//! Bounded handoff from the timer ISR to the scheduler manager, carrying
//! the handles of tasks that just exhausted their quantum.
//!
//! The channel is deliberately lossy: on overflow the producer drops the
//! event. That is safe because the profiler never resets the burst counter,
//! so a task whose expiry was dropped re-raises the condition on its very
//! next running tick.

use core::fmt;

use heapless::mpmc::MpMcQueue;

use crate::task::TaskHandle;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Channel could not be prepared at init time.
///
/// The built-in [`ExpiryQueue`] is statically allocated and never fails;
/// the variant exists for channels backed by fallible kernel primitives
/// (e.g. a kernel queue object allocated at init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The underlying queue could not be created.
    ChannelCreation,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::ChannelCreation => f.write_str("event channel creation failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Channel contract
// ---------------------------------------------------------------------------

/// Bounded single-producer (ISR) single-consumer (manager task) conveyance
/// of expired-quantum task handles.
///
/// Implementations must make `send_from_isr` callable from interrupt
/// context without blocking, and `receive` non-blocking from task context.
/// Events are delivered in FIFO order, subject to drop-on-overflow.
pub trait EventChannel {
    /// Prepare the channel for use. Called by `Scheduler::init`.
    fn try_init(&self) -> Result<(), InitError> {
        Ok(())
    }

    /// Publish an expiry event from ISR context. Returns `false` when the
    /// channel is full and the event was dropped.
    fn send_from_isr(&self, task: TaskHandle) -> bool;

    /// Take the oldest undrained event, or `None` when the channel is
    /// empty. Never blocks.
    fn receive(&self) -> Option<TaskHandle>;
}

// ---------------------------------------------------------------------------
// Default implementation
// ---------------------------------------------------------------------------

/// Lock-free bounded queue of task handles, usable from ISR context on
/// single-core targets. `N` must be a power of two.
pub struct ExpiryQueue<const N: usize> {
    queue: MpMcQueue<TaskHandle, N>,
}

impl<const N: usize> ExpiryQueue<N> {
    pub const fn new() -> Self {
        ExpiryQueue {
            queue: MpMcQueue::new(),
        }
    }
}

impl<const N: usize> Default for ExpiryQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventChannel for ExpiryQueue<N> {
    fn send_from_isr(&self, task: TaskHandle) -> bool {
        self.queue.enqueue(task).is_ok()
    }

    fn receive(&self) -> Option<TaskHandle> {
        self.queue.dequeue()
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn task(raw: usize) -> TaskHandle {
        TaskHandle::from_raw(raw).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let channel: ExpiryQueue<4> = ExpiryQueue::new();
        assert!(channel.send_from_isr(task(1)));
        assert!(channel.send_from_isr(task(2)));
        assert!(channel.send_from_isr(task(3)));

        assert_eq!(channel.receive(), Some(task(1)));
        assert_eq!(channel.receive(), Some(task(2)));
        assert_eq!(channel.receive(), Some(task(3)));
        assert_eq!(channel.receive(), None);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let channel: ExpiryQueue<2> = ExpiryQueue::new();
        assert!(channel.send_from_isr(task(1)));
        assert!(channel.send_from_isr(task(2)));
        assert!(!channel.send_from_isr(task(3)));

        // Earlier events survive; the dropped one is simply absent.
        assert_eq!(channel.receive(), Some(task(1)));
        assert_eq!(channel.receive(), Some(task(2)));
        assert_eq!(channel.receive(), None);

        // Capacity is reusable once drained.
        assert!(channel.send_from_isr(task(3)));
        assert_eq!(channel.receive(), Some(task(3)));
    }
}
