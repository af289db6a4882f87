//! Application services: the content backend contract and cached access to it.

pub mod content;
pub mod error;
pub mod source;
