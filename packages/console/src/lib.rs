//! Interactive console for the Kaiwa chat repository.
//!
//! The console is the caller layer: it keeps every user, group and message
//! it creates and hands them back to the repository by handle.

pub mod command;
pub mod config;
pub mod dto;
pub mod repl;
pub mod session;

pub use config::ConsoleArgs;
pub use repl::run_console;
