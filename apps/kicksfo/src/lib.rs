//! # KickSFO application library
//!
//! The HTTP dashboard, its configuration and its renderers, exposed as a
//! library so integration tests can drive the router directly.

pub mod api;
pub mod config;
pub mod render;
