//! Lap-recording stopwatch
//!
//! A [`Timer`] keeps an ordered list of monotonic instants and reports the
//! gaps between them in its [`TimeUnit`]. Every reading degrades to `0.0`
//! when there is not enough history to compute it.

use parking_lot::Mutex;
use std::time::Instant;
use tracing::{debug, trace};

use perftimer_units::{TimeUnit, signed_nanos_between};

#[derive(Debug, Default)]
struct TimerState {
    /// Captured instants, non-decreasing
    instants: Vec<Instant>,

    /// Always false while `instants` is empty
    running: bool,
}

/// Stopwatch reporting start/lap/stop intervals in a fixed unit.
///
/// All operations take `&self` and serialize on an internal lock, so a
/// `Timer` can be shared between threads. The lock is held only while an
/// instant is captured and the reading computed.
#[derive(Debug)]
pub struct Timer {
    state: Mutex<TimerState>,
    unit: TimeUnit,
}

impl Timer {
    /// Create an empty, stopped timer reporting in `unit`.
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            state: Mutex::new(TimerState::default()),
            unit,
        }
    }

    /// Reporting unit chosen at construction
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Label of the reporting unit
    pub fn label(&self) -> &'static str {
        self.unit.label()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Number of instants recorded since the last start/reset
    pub fn instant_count(&self) -> usize {
        self.state.lock().instants.len()
    }

    /// Discard previous history, record the start instant and mark the timer running.
    pub fn start(&self) {
        let mut state = self.state.lock();
        state.instants.clear();
        state.instants.push(Instant::now());
        state.running = true;
        debug!(unit = %self.unit, "timer started");
    }

    /// Record a lap instant and return the interval since the previous start/lap.
    ///
    /// Lapping a timer that holds no instants records the first one and
    /// returns `0.0`; the timer is running afterwards either way.
    pub fn lap(&self) -> f64 {
        let mut state = self.state.lock();
        let interval = self.capture(&mut state);
        state.running = true;
        trace!(interval, unit = %self.unit, "lap recorded");
        interval
    }

    /// Record the stop instant, mark the timer stopped and return the
    /// interval since the previous start/lap.
    pub fn stop(&self) -> f64 {
        let mut state = self.state.lock();
        let interval = self.capture(&mut state);
        state.running = false;
        debug!(
            interval,
            laps = state.instants.len().saturating_sub(1),
            unit = %self.unit,
            "timer stopped"
        );
        interval
    }

    /// Stop the timer and clear recorded instants
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.instants.clear();
        state.running = false;
        debug!("timer reset");
    }

    /// Time between the first and the most recent instant
    pub fn total(&self) -> f64 {
        let state = self.state.lock();
        match (state.instants.first(), state.instants.last()) {
            (Some(&first), Some(&last)) if state.instants.len() >= 2 => {
                self.unit.convert(signed_nanos_between(first, last))
            }
            _ => 0.0,
        }
    }

    /// Intervals between consecutive instants, in capture order
    pub fn laps(&self) -> Vec<f64> {
        let state = self.state.lock();
        state
            .instants
            .windows(2)
            .map(|pair| self.unit.convert(signed_nanos_between(pair[0], pair[1])))
            .collect()
    }

    /// Time from the first instant to now while running, or to the last
    /// recorded instant once stopped.
    pub fn elapsed(&self) -> f64 {
        let state = self.state.lock();
        let Some(&first) = state.instants.first() else {
            return 0.0;
        };

        if state.running {
            self.unit.convert(signed_nanos_between(first, Instant::now()))
        } else {
            let last = state.instants.last().copied().unwrap_or(first);
            self.unit.convert(signed_nanos_between(first, last))
        }
    }

    /// Append `now` and return the converted gap to the previous instant.
    ///
    /// The instant is taken under the lock so concurrent laps stay ordered.
    fn capture(&self, state: &mut TimerState) -> f64 {
        let now = Instant::now();
        let interval = match state.instants.last() {
            Some(&previous) => self.unit.convert(signed_nanos_between(previous, now)),
            None => 0.0,
        };
        state.instants.push(now);
        interval
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(TimeUnit::default())
    }
}
