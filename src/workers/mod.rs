//! Vendor and Customer Workers: a cancellable periodic task shape, a step
//! function and a cadence, looping until a
//! [`crate::cancellation::CancellationToken`] fires.

pub mod customer;
pub mod vendor;

/// Cadence divisor: a worker sleeps `CADENCE_DIVISOR_MS / rate` milliseconds
/// between iterations. Named rather than left as a magic literal.
pub const CADENCE_DIVISOR_MS: u64 = 40_000;

pub(crate) fn cadence_millis(rate: u32) -> u64 {
    CADENCE_DIVISOR_MS / rate.max(1) as u64
}
