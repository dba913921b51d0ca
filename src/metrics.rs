//! # Metrics Formatting
//!
//! Read-only reporting helpers for external loggers. The policy core never
//! prints; a monitor task (or a host-side harness) pulls snapshots through
//! `Scheduler::stats` and formats them here, writing to whatever transport
//! it owns (UART, RTT, a test buffer).

use core::fmt::{self, Write};

use crate::channel::EventChannel;
use crate::config::MAX_TASKS;
use crate::platform::Platform;
use crate::scheduler::Scheduler;
use crate::task::TaskStats;

/// Ticks between a task's registration and its first dispatch.
/// Returns 0 when `start_tick` predates the arrival (wrapped counter or
/// invalid input).
pub fn latency_ticks(arrival_tick: u32, start_tick: u32) -> u32 {
    start_tick.saturating_sub(arrival_tick)
}

/// Ticks the task has spent registered but not running: lifetime minus the
/// current burst accumulation, floored at 0.
pub fn waiting_ticks(stats: &TaskStats, now: u32) -> u32 {
    now.wrapping_sub(stats.arrival_tick)
        .saturating_sub(stats.burst_ticks)
}

/// One report line for a task snapshot.
///
/// Format: `handle | Lvl: <ordinal> | Run: <burst> | Qtm: <quantum> |
/// Arr: <arrival> | Wait: <waiting>`.
pub struct StatsLine {
    pub stats: TaskStats,
    /// Current host tick, for the waiting-time column.
    pub now: u32,
}

impl fmt::Display for StatsLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#010x} | Lvl: {} | Run: {:4} | Qtm: {:2} | Arr: {:5} | Wait: {:4}",
            self.stats.handle.into_raw(),
            self.stats.level.ordinal(),
            self.stats.burst_ticks,
            self.stats.quantum_ticks,
            self.stats.arrival_tick,
            waiting_ticks(&self.stats, self.now),
        )
    }
}

/// Write a full queue report (header plus one line per registered task)
/// into `out`.
pub fn write_queue_report<P, C, W>(
    scheduler: &Scheduler<P, C>,
    now: u32,
    out: &mut W,
) -> fmt::Result
where
    P: Platform,
    C: EventChannel,
    W: Write,
{
    out.write_str("Handle     | Lvl | Run  | Qtm | Arr   | Wait\n")?;
    for index in 0..MAX_TASKS {
        if let Some(stats) = scheduler.stats(index) {
            writeln!(out, "{}", StatsLine { stats, now })?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
