//! JSON views printed by the `show` command.

use serde::{Deserialize, Serialize};

/// User summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: u64,
    pub name: String,
    pub mobile: String,
}

/// Message in a group detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: u64,
    pub content: String,
    pub created_at: String, // ISO 8601
    /// Sender's user id, `None` once the sender entry has been removed
    pub sender: Option<u64>,
}

/// Group detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDetailDto {
    pub id: u64,
    pub name: String,
    pub number_of_participants: usize,
    pub admin: Option<UserDto>,
    pub members: Vec<UserDto>,
    pub messages: Vec<MessageDto>,
}
