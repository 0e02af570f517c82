//! Core domain models for the chat repository.
//!
//! Entities have identity semantics: equality and hashing look at the
//! handle only. Constructors are crate-private so handles can only be
//! minted by the repository.

use std::hash::{Hash, Hasher};

use super::value_object::{GroupId, MessageId, Timestamp, UserId};

/// A registered user.
///
/// The repository does not keep users it creates; the caller holds the
/// returned value and passes it back into later operations.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    name: String,
    mobile: String,
}

impl User {
    pub(crate) fn new(id: UserId, name: String, mobile: String) -> Self {
        Self { id, name, mobile }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A personal chat (2 users) or a named group (3+ users).
///
/// Which flavor a group is depends only on how it was created; nothing is
/// stored to tell them apart.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    name: String,
    /// Participant count at creation time. Not updated by removals.
    number_of_participants: usize,
}

impl Group {
    pub(crate) fn new(id: GroupId, name: String, number_of_participants: usize) -> Self {
        Self {
            id,
            name,
            number_of_participants,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number_of_participants(&self) -> usize {
        self.number_of_participants
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A chat message.
#[derive(Debug, Clone)]
pub struct Message {
    /// Sequential message id, doubles as identity
    id: MessageId,
    content: String,
    /// Time the message was created (not sent)
    timestamp: Timestamp,
}

impl Message {
    pub(crate) fn new(id: MessageId, content: String, timestamp: Timestamp) -> Self {
        Self {
            id,
            content,
            timestamp,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
