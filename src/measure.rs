//! Measuring a unit of work with a [`Timer`]
//!
//! The timer is stopped once the work finishes, whether it succeeds, fails,
//! panics or (for futures) is dropped before completion.

use std::future::Future;
use tracing::debug;

use crate::timer::Timer;

/// Stops the timer on drop unless [`StopGuard::finish`] already did.
struct StopGuard<'a> {
    timer: &'a Timer,
    armed: bool,
}

impl<'a> StopGuard<'a> {
    fn start(timer: &'a Timer) -> Self {
        timer.start();
        Self { timer, armed: true }
    }

    fn finish(mut self) -> f64 {
        self.armed = false;
        self.timer.stop()
    }
}

impl Drop for StopGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let interval = self.timer.stop();
            debug!(interval, unit = %self.timer.unit(), "measured work abandoned");
        }
    }
}

impl Timer {
    /// Restart the timer, await `operation`, stop the timer and return the
    /// output together with the measured duration.
    ///
    /// The timer's lock is never held across the await.
    pub async fn measure<F>(&self, operation: F) -> (F::Output, f64)
    where
        F: Future,
    {
        let guard = StopGuard::start(self);
        let output = operation.await;
        let duration = guard.finish();
        (output, duration)
    }

    /// Like [`Timer::measure`] for fallible work.
    ///
    /// An `Err` from `operation` is returned as-is. The timer is stopped in
    /// both cases, so after a failure the measured span can still be read
    /// through [`Timer::total`] or [`Timer::elapsed`].
    pub async fn try_measure<F, T, E>(&self, operation: F) -> Result<(T, f64), E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let (result, duration) = self.measure(operation).await;
        result.map(|value| (value, duration))
    }

    /// Restart the timer, run `f`, stop the timer and return the output
    /// together with the measured duration.
    pub fn measure_sync<F, T>(&self, f: F) -> (T, f64)
    where
        F: FnOnce() -> T,
    {
        let guard = StopGuard::start(self);
        let output = f();
        let duration = guard.finish();
        (output, duration)
    }
}
