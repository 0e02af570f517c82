//! Domain factories for minting entity handles.

use std::sync::atomic::{AtomicU64, Ordering};

use super::{GroupId, MessageId, UserId};

/// Next origin token handed to a new factory. Unique per process.
static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(1);

/// Factory for generating sequential handles.
///
/// Each kind of handle has its own counter starting at 1. Every factory
/// takes a process-unique origin token that is stamped into the handles it
/// mints, so handles from different repository instances never collide.
#[derive(Debug)]
pub struct HandleFactory {
    origin: u64,
    last_user_id: u64,
    last_group_id: u64,
    last_message_id: u64,
}

impl HandleFactory {
    pub fn new() -> Self {
        Self {
            origin: NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed),
            last_user_id: 0,
            last_group_id: 0,
            last_message_id: 0,
        }
    }

    /// Generate the next UserId.
    pub fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.origin, self.last_user_id)
    }

    /// Generate the next GroupId.
    pub fn next_group_id(&mut self) -> GroupId {
        self.last_group_id += 1;
        GroupId::new(self.origin, self.last_group_id)
    }

    /// Generate the next MessageId. The counter is incremented before use,
    /// so the first message gets id 1.
    pub fn next_message_id(&mut self) -> MessageId {
        self.last_message_id += 1;
        MessageId::new(self.origin, self.last_message_id)
    }
}

impl Default for HandleFactory {
    fn default() -> Self {
        Self::new()
    }
}
