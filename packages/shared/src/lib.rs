//! Shared utilities for Kaiwa.
//!
//! Logger setup and time helpers used by every package in the workspace.

pub mod logger;
pub mod time;
