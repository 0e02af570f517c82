//! Time source used to stamp newly created messages.

use super::Timestamp;

/// Clock abstraction so message timestamps can be controlled in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current time as Unix milliseconds.
    fn now(&self) -> Timestamp;
}
