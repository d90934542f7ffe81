//! Stopwatch timer with lap support
//!
//! ```
//! use perftimer::{TimeUnit, Timer};
//!
//! let timer = Timer::new(TimeUnit::Milliseconds);
//! timer.start();
//! let lap = timer.lap();
//! let last = timer.stop();
//! assert_eq!(timer.laps(), vec![lap, last]);
//! assert!(timer.total() >= lap);
//! ```

pub mod config;
mod measure;
pub mod timer;

pub use crate::config::{ConfigError, TimerConfig};
pub use crate::timer::Timer;
pub use perftimer_units::{ParseTimeUnitError, TimeUnit};
pub use perftimer_utils::init_logging;
