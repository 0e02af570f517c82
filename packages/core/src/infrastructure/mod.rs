//! Infrastructure layer: concrete implementations of domain traits.

pub mod clock;
pub mod repository;

pub use clock::SystemClock;
pub use repository::InMemoryChatRepository;
