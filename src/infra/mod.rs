//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod json_source;
pub mod telemetry;
