pub mod distance;
pub mod unit;

pub use crate::distance::signed_nanos_between;
pub use crate::unit::{ParseTimeUnitError, TimeUnit};
