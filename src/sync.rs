//! # Synchronization Primitives
//!
//! Interrupt-safe critical section used as the default implementation of
//! [`Platform::critical_section`](crate::platform::Platform::critical_section).
//! All compound accesses to the shared task table run inside a critical
//! section to prevent races between task context and the tick interrupt.

/// Execute a closure with the tick interrupt masked.
///
/// On ARM bare-metal targets this disables interrupts for the duration of
/// the closure, which is sufficient on the single-core parts this policy
/// targets. Ports whose kernel provides a cheaper scoped critical section
/// (one that masks only kernel-managed interrupts) should override
/// `Platform::critical_section` instead.
///
/// # Performance
/// Keep critical sections short: every masked tick delays both preemption
/// and the profiler's accounting.
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    cortex_m::interrupt::free(|_| f())
}

/// Host build (unit tests, simulation): task context is single-threaded
/// and there is no tick interrupt to mask, so the closure runs directly.
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}
