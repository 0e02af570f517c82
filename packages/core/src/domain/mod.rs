//! Domain layer for the chat repository.
//!
//! This module contains entities and the repository interface that are
//! independent of any storage concern.

pub mod clock;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use clock::Clock;
pub use entity::{Group, Message, User};
pub use error::RepositoryError;
pub use factory::HandleFactory;
pub use repository::ChatRepository;
pub use value_object::{GroupId, MessageId, Timestamp, UserId};
