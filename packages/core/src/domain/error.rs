//! Domain layer error definitions.

use thiserror::Error;

use super::GroupId;

/// Errors returned by [`ChatRepository`](super::ChatRepository) operations.
///
/// Display texts are kept stable; callers should branch on the variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The mobile number is already registered
    #[error("User already exists")]
    DuplicateUser { mobile: String },

    /// Precondition violated by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The group was never created by this repository
    #[error("Group does not exist")]
    GroupNotFound(GroupId),

    /// Sender is not a member of the target group
    #[error("You are not allowed to send message")]
    NotAMember,

    /// Approver is not the current admin of the group
    #[error("Approver does not have rights")]
    NotAuthorized,

    /// New admin candidate is not a member of the group
    #[error("User is not a participant")]
    NotAParticipant,

    /// The user is admin of some group
    #[error("Cannot remove admin")]
    CannotRemoveAdmin,

    /// No group contains the user
    #[error("User not found")]
    UserNotFound,

    /// Fewer than `k` messages fall inside the requested window
    #[error("K is greater than the number of messages")]
    KTooLarge { k: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_stable() {
        // テスト項目: エラーメッセージの文言が変わらない
        assert_eq!(
            RepositoryError::DuplicateUser {
                mobile: "111".to_string()
            }
            .to_string(),
            "User already exists"
        );
        assert_eq!(
            RepositoryError::GroupNotFound(GroupId::new(1, 3)).to_string(),
            "Group does not exist"
        );
        assert_eq!(
            RepositoryError::NotAMember.to_string(),
            "You are not allowed to send message"
        );
        assert_eq!(
            RepositoryError::KTooLarge { k: 3, available: 1 }.to_string(),
            "K is greater than the number of messages"
        );
    }
}
