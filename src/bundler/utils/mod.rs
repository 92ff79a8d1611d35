//! Shared helpers for the bundler stages.

pub mod fs;
pub mod http;
