// Mon Feb 09 2026 - Alex

pub mod logging;

pub use logging::{init_from_env, init_logging, scoped_timer, LoggingUtils, ScopedTimer};
