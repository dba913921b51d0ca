//! # MLFQ: Multi-Level Feedback Queue Scheduling Policy
//!
//! A feedback-driven scheduling policy that runs *on top of* a preemptive
//! fixed-priority real-time kernel. The policy watches each task's CPU
//! consumption tick by tick and moves tasks between three priority bands,
//! so I/O-bound tasks stay responsive while CPU-bound tasks sink to the
//! background without starving.
//!
//! ## Policy Rules
//!
//! 1. Every registered task enters at the `High` band.
//! 2. A task that consumes a full quantum of CPU in one burst is demoted
//!    one band (quantum ladder: 10 / 20 / 50 ticks by default).
//! 3. Demotion saturates at the `Low` band.
//! 4. Every boost period (500 ms by default), all tasks return to `High`,
//!    which bounds starvation.
//! 5. The host application may promote a task it classifies as
//!    interactive one band at a time.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Application Tasks                     │
//! ├─────────────────────────────────────────────────────────┤
//! │             Control API (scheduler.rs)                  │
//! │   init() · register() · promote() · stats() · ...       │
//! ├───────────────┬────────────────────┬────────────────────┤
//! │ Tick Profiler │   Event Channel    │ Scheduler Manager  │
//! │ profiler.rs   │   channel.rs       │ manager.rs         │
//! │ ─ on_tick()   │   ─ send_from_isr  │ ─ manager_step()   │
//! │   (ISR ctx)   │   ─ receive        │ ─ demote/boost     │
//! ├───────────────┴────────────────────┴────────────────────┤
//! │        Task Table & Data Model (table.rs, task.rs)      │
//! │     Level · TaskHandle · Slot · quantum ladder          │
//! ├─────────────────────────────────────────────────────────┤
//! │            Host Kernel Contract (platform.rs)           │
//! │  priority set · current task · ticks · notify · yield   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flow: the timer ISR calls `on_tick`, which charges the tick to
//! the running task's burst counter; on quantum exhaustion it publishes
//! the handle on the bounded event channel and notifies the manager task.
//! The manager (a dedicated task above all policy bands) drains the
//! channel, demotes offenders, and periodically boosts every task back to
//! the top band. It is the sole writer of level transitions.
//!
//! ## Memory Model
//!
//! - **No heap**: all state is statically sized, pure `core`
//! - **Fixed task table**: `[Slot; MAX_TASKS]`, linear lookup
//! - **ISR-visible fields are atomic words**; compound mutations run in
//!   the platform critical section
//! - **Lock-free event channel**: bounded, drop-on-overflow
//!
//! ## Integration
//!
//! The host kernel is consumed through the [`platform::Platform`] trait;
//! any kernel that can set priorities, report the running task from ISR
//! context, and deliver an ISR-safe notification qualifies. The test
//! suite drives the whole policy against an in-memory mock platform.

#![no_std]

pub mod channel;
pub mod config;
pub mod manager;
pub mod metrics;
pub mod platform;
pub mod profiler;
pub mod scheduler;
pub mod sync;
pub mod table;
pub mod task;

#[cfg(test)]
pub(crate) mod testutil;
