//! Short-horizon content query cache for live news feeds.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
