//! Shared utilities for the roomcast workspace.
//!
//! - `logger`: tracing subscriber bootstrap
//! - `time`: clock abstraction and timestamp formatting

pub mod logger;
pub mod time;
