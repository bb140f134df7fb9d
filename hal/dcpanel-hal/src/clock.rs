//! Time source abstraction
//!
//! The driver's response wait is a poll loop with a deadline. Both the
//! deadline check and the inter-poll sleep go through this trait so the
//! loop can run against a fake clock in tests.

use core::time::Duration;

/// Monotonic time source with a blocking sleep
pub trait Clock {
    /// Time elapsed since an arbitrary fixed epoch
    ///
    /// Only differences between two `now()` readings are meaningful.
    fn now(&self) -> Duration;

    /// Block the caller for at least `duration`
    fn sleep(&mut self, duration: Duration);
}
