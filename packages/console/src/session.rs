//! Console session: the caller layer in front of the repository.
//!
//! The repository does not keep the users and messages it creates, so the
//! session holds every entity it receives, indexed by sequence number, and looks
//! them up again when a command refers to an id.

use std::{collections::BTreeMap, sync::Arc};

use kaiwa_core::{ChatRepository, Group, Message, RepositoryError, Timestamp, User};
use kaiwa_shared::time::timestamp_to_jst_rfc3339;
use thiserror::Error;

use crate::{
    command::{Command, HELP},
    dto::{GroupDetailDto, MessageDto, UserDto},
};

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print, then keep reading
    Output(String),
    Quit,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("No user with id {0} in this session")]
    UnknownUser(u64),

    #[error("No group with id {0} in this session")]
    UnknownGroup(u64),

    #[error("No message with id {0} in this session")]
    UnknownMessage(u64),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct Session {
    repository: Arc<dyn ChatRepository>,
    /// Keyed by the sequence number printed to the user
    users: BTreeMap<u64, User>,
    groups: BTreeMap<u64, Group>,
    messages: BTreeMap<u64, Message>,
}

impl Session {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self {
            repository,
            users: BTreeMap::new(),
            groups: BTreeMap::new(),
            messages: BTreeMap::new(),
        }
    }

    /// Execute a parsed command against the repository.
    pub async fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        let output = match command {
            Command::CreateUser { name, mobile } => {
                let user = self.repository.create_user(name, mobile).await?;
                let output = format!(
                    "Created user {}: {} ({})",
                    user.id(),
                    user.name(),
                    user.mobile()
                );
                self.users.insert(user.id().value(), user);
                output
            }
            Command::CreateGroup { user_ids } => {
                let users = user_ids
                    .iter()
                    .map(|id| self.user(*id).cloned())
                    .collect::<Result<Vec<_>, _>>()?;
                let group = self.repository.create_group(&users).await?;
                let output = format!(
                    "Created group {}: '{}' with {} participants",
                    group.id(),
                    group.name(),
                    group.number_of_participants()
                );
                self.groups.insert(group.id().value(), group);
                output
            }
            Command::CreateMessage { content } => {
                let message = self.repository.create_message(content).await;
                let output = format!("Created message {}", message.id());
                self.messages.insert(message.id().value(), message);
                output
            }
            Command::Send {
                message_id,
                user_id,
                group_id,
            } => {
                let message = self.message(message_id)?;
                let sender = self.user(user_id)?;
                let group = self.group(group_id)?;
                let count = self
                    .repository
                    .send_message(message, sender, group)
                    .await?;
                format!(
                    "Sent message {} to '{}' ({} messages)",
                    message.id(),
                    group.name(),
                    count
                )
            }
            Command::ChangeAdmin {
                approver_id,
                user_id,
                group_id,
            } => {
                let approver = self.user(approver_id)?;
                let user = self.user(user_id)?;
                let group = self.group(group_id)?;
                self.repository.change_admin(approver, user, group).await?;
                format!("Admin of '{}' is now {}", group.name(), user.name())
            }
            Command::Remove { user_id } => {
                let user = self.user(user_id)?;
                match self.repository.remove_user(user).await? {
                    Some(size) => format!("Removed user {} ({})", user.id(), size),
                    None => format!(
                        "Removed user {} from its groups; no authored message, no count produced",
                        user.id()
                    ),
                }
            }
            Command::Find { start, end, k } => {
                self.repository
                    .find_message(Timestamp::new(start), Timestamp::new(end), k)
                    .await?
            }
            Command::Show { group_id } => {
                let detail = self.group_detail(group_id).await?;
                serde_json::to_string_pretty(&detail)?
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(output))
    }

    fn user(&self, id: u64) -> Result<&User, SessionError> {
        self.users
            .get(&id)
            .ok_or(SessionError::UnknownUser(id))
    }

    fn group(&self, id: u64) -> Result<&Group, SessionError> {
        self.groups
            .get(&id)
            .ok_or(SessionError::UnknownGroup(id))
    }

    fn message(&self, id: u64) -> Result<&Message, SessionError> {
        self.messages
            .get(&id)
            .ok_or(SessionError::UnknownMessage(id))
    }

    async fn group_detail(&self, id: u64) -> Result<GroupDetailDto, SessionError> {
        let group = self.group(id)?;
        let admin = self.repository.group_admin(group).await?;
        let members = self.repository.group_members(group).await?;
        let mut messages = Vec::new();
        for message in self.repository.group_messages(group).await? {
            let sender = self.repository.sender_of(&message).await;
            messages.push(MessageDto {
                id: message.id().value(),
                content: message.content().to_string(),
                created_at: timestamp_to_jst_rfc3339(message.timestamp().value())
                    .unwrap_or_else(|| message.timestamp().to_string()),
                sender: sender.map(|user| user.id().value()),
            });
        }

        Ok(GroupDetailDto {
            id: group.id().value(),
            name: group.name().to_string(),
            number_of_participants: group.number_of_participants(),
            admin: admin.as_ref().map(user_dto),
            members: members.iter().map(user_dto).collect(),
            messages,
        })
    }
}

fn user_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id().value(),
        name: user.name().to_string(),
        mobile: user.mobile().to_string(),
    }
}
