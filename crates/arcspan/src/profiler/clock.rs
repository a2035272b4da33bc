//! The cycle clock.
//!
//! `read_cpu_timer` returns the platform's highest-resolution monotonic
//! counter: `rdtsc` on x86_64, the `cntvct_el0` virtual timer on aarch64,
//! and a nanosecond `Instant` offset elsewhere. Units differ per platform;
//! callers pair the raw counts with [`estimate_cpu_frequency`] and treat the
//! result as ticks per second.

use std::time::{Duration, Instant};

/// Reads the cycle counter. Monotonically non-decreasing from any single
/// thread's viewpoint.
#[cfg(target_arch = "x86_64")]
#[inline]
#[must_use]
pub fn read_cpu_timer() -> u64 {
    // SAFETY: rdtsc has no preconditions.
    unsafe { core::arch::x86_64::_rdtsc() }
}

/// Reads the cycle counter. Monotonically non-decreasing from any single
/// thread's viewpoint.
#[cfg(target_arch = "aarch64")]
#[inline]
#[must_use]
pub fn read_cpu_timer() -> u64 {
    let val: u64;
    // SAFETY: cntvct_el0 is readable from EL0 on every OS we target.
    unsafe { core::arch::asm!("mrs {}, cntvct_el0", out(reg) val) };
    val
}

/// Reads the cycle counter. Falls back to nanoseconds since first use when
/// the architecture has no directly readable counter.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
#[must_use]
pub fn read_cpu_timer() -> u64 {
    use std::sync::OnceLock;
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = *EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as u64
}

/// Estimates the counter frequency in ticks per second by spinning for a
/// `wait_millis` wall-clock window and scaling the observed tick delta.
#[must_use]
pub fn estimate_cpu_frequency(wait_millis: u64) -> u64 {
    let window = Duration::from_millis(wait_millis.max(1));

    let os_start = Instant::now();
    let cpu_start = read_cpu_timer();
    while os_start.elapsed() < window {
        core::hint::spin_loop();
    }
    let cpu_end = read_cpu_timer();
    let os_elapsed = os_start.elapsed();

    let cycles = u128::from(cpu_end.wrapping_sub(cpu_start));
    let nanos = os_elapsed.as_nanos().max(1);
    (cycles * 1_000_000_000 / nanos) as u64
}
