//! Scoped Timing
//!
//! Wall-clock timing via `std::time::Instant`, paired with the CPU tick
//! counter (RDTSCP on x86_64, CNTVCT_EL0 on AArch64) where available.
//! A [`Timer`] is created around one specific call; there is no shared
//! timer state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Read the CPU cycle/tick counter (platform-specific).
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on all x86_64 CPUs since ~2006.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

/// Read the virtual counter timer on AArch64 (comparable to x86 TSC).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn read_cycles() -> u64 {
    0
}

/// Whether this platform provides real cycle counters.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

/// Time spent in one measured call
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Elapsed {
    /// Wall-clock duration
    pub duration: Duration,
    /// CPU ticks (0 when [`HAS_CYCLE_COUNTER`] is false)
    pub cycles: u64,
}

impl Elapsed {
    /// Elapsed wall-clock time in seconds
    pub fn as_secs_f64(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Elapsed wall-clock time in nanoseconds
    pub fn as_nanos_f64(&self) -> f64 {
        self.duration.as_nanos() as f64
    }
}

/// Scoped timer: start before the call, stop right after it
pub struct Timer {
    start: std::time::Instant,
    cycles_start: u64,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        let cycles_start = read_cycles();
        Self {
            start: std::time::Instant::now(),
            cycles_start,
        }
    }

    /// Stop the timer and return elapsed time and cycles
    #[inline(always)]
    pub fn stop(&self) -> Elapsed {
        let duration = self.start.elapsed();
        let cycles = read_cycles().saturating_sub(self.cycles_start);
        Elapsed { duration, cycles }
    }
}

/// Run `f` inside a scoped timer and return its output with the elapsed time
#[inline]
pub fn timed<T, F>(f: F) -> (T, Elapsed)
where
    F: FnOnce() -> T,
{
    let timer = Timer::start();
    let output = std::hint::black_box(f());
    (output, timer.stop())
}
