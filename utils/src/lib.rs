//! Shared utilities for the moo console.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
