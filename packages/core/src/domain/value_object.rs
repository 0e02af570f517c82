//! Value Objects for domain models.
//!
//! Handles are integer identities minted by the repository. Entities are
//! compared by their handle, never by their field values.
//!
//! Every handle carries the origin token of the repository instance that
//! minted it, so handles from two instances never compare equal even when
//! their sequence numbers match.

use std::fmt;

/// User handle.
///
/// Distinct `create_user` calls always yield distinct handles, even for
/// identical name and mobile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId {
    origin: u64,
    value: u64,
}

impl UserId {
    pub(crate) fn new(origin: u64, value: u64) -> Self {
        Self { origin, value }
    }

    /// Sequence number within the minting repository.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Group handle.
///
/// Assigned in creation order, so within one repository ordering by
/// `GroupId` is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId {
    origin: u64,
    value: u64,
}

impl GroupId {
    pub(crate) fn new(origin: u64, value: u64) -> Self {
        Self { origin, value }
    }

    /// Sequence number within the minting repository.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Message id.
///
/// The i-th created message has id i. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId {
    origin: u64,
    value: u64,
}

impl MessageId {
    pub(crate) fn new(origin: u64, value: u64) -> Self {
        Self { origin, value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this timestamp lies strictly between `start` and `end`.
    pub fn is_strictly_between(&self, start: Timestamp, end: Timestamp) -> bool {
        start < *self && *self < end
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
