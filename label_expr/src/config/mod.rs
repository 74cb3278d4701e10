//! Configuration module for the label expression engine
//!
//! Security boundaries are compile-time constants and cannot be changed at
//! runtime. User-facing behaviour (metrics, logging output) is controlled by
//! runtime preferences read from `LEXPR_*` environment variables.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
