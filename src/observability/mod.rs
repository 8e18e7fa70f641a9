//! Observability
//!
//! Logging setup for the `envschema` binary. The library itself only emits
//! `tracing` events; nothing is printed unless a subscriber is installed.

pub mod logging;

pub use logging::{LogFormat, init_logging};
