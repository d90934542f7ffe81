pub mod logger;

pub use logger::{DEFAULT_FILTER, init_logging};
