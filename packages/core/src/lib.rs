//! In-memory data-access layer for a simplified messaging application.
//!
//! The domain layer defines entities, handles and the [`ChatRepository`]
//! trait; the infrastructure layer provides [`InMemoryChatRepository`].

pub mod domain;
pub mod infrastructure;

pub use domain::{
    ChatRepository, Clock, Group, GroupId, Message, MessageId, RepositoryError, Timestamp, User,
    UserId,
};
pub use infrastructure::{InMemoryChatRepository, SystemClock};
