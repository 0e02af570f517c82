//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! BTreeMap / HashSet をインメモリ DB として使用します。
//!
//! ## 走査順序
//!
//! 「最初に見つかったもの」を選ぶ操作（`remove_user`）の結果が
//! 実行ごとに変わらないよう、以下の順序を固定しています：
//!
//! - グループ: 作成順（`GroupId` 昇順）
//! - 送信者表: メッセージ ID 昇順

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ChatRepository, Clock, Group, GroupId, HandleFactory, Message, MessageId,
        RepositoryError, Timestamp, User,
    },
    infrastructure::clock::SystemClock,
};

/// グループ 1 件分の状態
///
/// メンバー表とメッセージ表を 1 レコードにまとめているため、
/// メンバー表に存在するグループには必ずメッセージ表も存在します。
#[derive(Debug)]
struct GroupRecord {
    group: Group,
    /// 挿入順。重複は除去しない
    members: Vec<User>,
    messages: Vec<Message>,
    /// 名前付きグループのみ
    admin: Option<User>,
}

/// 送信者表のエントリ
#[derive(Debug)]
struct SentMessage {
    message: Message,
    sender: User,
}

#[derive(Debug, Default)]
struct ChatState {
    groups: BTreeMap<GroupId, GroupRecord>,
    senders: BTreeMap<MessageId, SentMessage>,
    mobiles: HashSet<String>,
    named_group_count: u64,
    handles: HandleFactory,
}

impl ChatState {
    fn record(&self, group: &Group) -> Result<&GroupRecord, RepositoryError> {
        self.groups
            .get(&group.id())
            .ok_or(RepositoryError::GroupNotFound(group.id()))
    }

    fn record_mut(&mut self, group: &Group) -> Result<&mut GroupRecord, RepositoryError> {
        self.groups
            .get_mut(&group.id())
            .ok_or(RepositoryError::GroupNotFound(group.id()))
    }

    fn is_admin_anywhere(&self, user: &User) -> bool {
        self.groups
            .values()
            .any(|record| record.admin.as_ref() == Some(user))
    }

    /// 全グループのメンバー数 + 全グループのメッセージ数 + 送信者表の件数
    fn combined_size(&self) -> usize {
        let groups: usize = self
            .groups
            .values()
            .map(|record| record.members.len() + record.messages.len())
            .sum();
        groups + self.senders.len()
    }
}

/// インメモリ Chat Repository 実装
///
/// 全ての状態を 1 つの Mutex で保護します。
/// ドメイン層の ChatRepository trait を実装します（依存性の逆転）。
pub struct InMemoryChatRepository {
    state: Mutex<ChatState>,
    /// メッセージ作成時刻の取得元
    clock: Arc<dyn Clock>,
}

impl InMemoryChatRepository {
    /// システム時計を使う新しい InMemoryChatRepository を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 時計を指定して InMemoryChatRepository を作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(ChatState::default()),
            clock,
        }
    }

    /// これまでに作成された名前付きグループの数
    pub async fn named_group_count(&self) -> u64 {
        self.state.lock().await.named_group_count
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_user(&self, name: String, mobile: String) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        if state.mobiles.contains(&mobile) {
            tracing::debug!("Rejected user '{}': mobile {} already exists", name, mobile);
            return Err(RepositoryError::DuplicateUser { mobile });
        }

        let id = state.handles.next_user_id();
        state.mobiles.insert(mobile.clone());
        tracing::debug!("Created user {} ('{}')", id, name);

        Ok(User::new(id, name, mobile))
    }

    async fn create_group(&self, users: &[User]) -> Result<Group, RepositoryError> {
        let (first, second) = match users {
            [first, second, ..] => (first, second),
            _ => {
                return Err(RepositoryError::InvalidArgument(format!(
                    "a group needs at least 2 users (got {})",
                    users.len()
                )));
            }
        };

        let mut state = self.state.lock().await;
        let id = state.handles.next_group_id();

        let (group, admin) = if users.len() == 2 {
            // パーソナルチャットは名前付きグループのカウンタを進めない
            let group = Group::new(id, second.name().to_string(), 2);
            tracing::info!("Created personal chat '{}'", group.name());
            (group, None)
        } else {
            state.named_group_count += 1;
            let group = Group::new(
                id,
                format!("Group {}", state.named_group_count),
                users.len(),
            );
            tracing::info!(
                "Created group '{}' with {} participants (admin: {})",
                group.name(),
                users.len(),
                first.name()
            );
            (group, Some(first.clone()))
        };

        state.groups.insert(
            id,
            GroupRecord {
                group: group.clone(),
                members: users.to_vec(),
                messages: Vec::new(),
                admin,
            },
        );

        Ok(group)
    }

    async fn create_message(&self, content: String) -> Message {
        let mut state = self.state.lock().await;
        let id = state.handles.next_message_id();
        let message = Message::new(id, content, self.clock.now());
        tracing::debug!("Created message {} at {}", id, message.timestamp());
        message
    }

    async fn send_message(
        &self,
        message: &Message,
        sender: &User,
        group: &Group,
    ) -> Result<usize, RepositoryError> {
        let mut state = self.state.lock().await;
        let record = state.record_mut(group)?;
        if !record.members.contains(sender) {
            tracing::debug!(
                "Rejected message {}: user {} is not a member of '{}'",
                message.id(),
                sender.id(),
                group.name()
            );
            return Err(RepositoryError::NotAMember);
        }

        record.messages.push(message.clone());
        let count = record.messages.len();
        state.senders.insert(
            message.id(),
            SentMessage {
                message: message.clone(),
                sender: sender.clone(),
            },
        );
        tracing::debug!(
            "User {} sent message {} to '{}' ({} messages)",
            sender.id(),
            message.id(),
            group.name(),
            count
        );

        Ok(count)
    }

    async fn change_admin(
        &self,
        approver: &User,
        user: &User,
        group: &Group,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let record = state.record_mut(group)?;
        if record.admin.as_ref() != Some(approver) {
            return Err(RepositoryError::NotAuthorized);
        }
        if !record.members.contains(user) {
            return Err(RepositoryError::NotAParticipant);
        }

        record.admin = Some(user.clone());
        tracing::info!(
            "Admin of '{}' changed from {} to {}",
            group.name(),
            approver.id(),
            user.id()
        );
        Ok(())
    }

    async fn remove_user(&self, user: &User) -> Result<Option<usize>, RepositoryError> {
        let mut state = self.state.lock().await;

        let containing: Vec<GroupId> = state
            .groups
            .iter()
            .filter(|(_, record)| record.members.contains(user))
            .map(|(id, _)| *id)
            .collect();
        if containing.is_empty() {
            return Err(RepositoryError::UserNotFound);
        }
        // 走査中のグループに限らず、どこかの管理者なら削除しない
        if state.is_admin_anywhere(user) {
            return Err(RepositoryError::CannotRemoveAdmin);
        }

        for group_id in containing {
            let authored = state
                .senders
                .iter()
                .find(|(_, sent)| &sent.sender == user)
                .map(|(id, _)| *id);

            let Some(record) = state.groups.get_mut(&group_id) else {
                continue;
            };
            if let Some(position) = record.members.iter().position(|member| member == user) {
                record.members.remove(position);
            }

            let Some(message_id) = authored else {
                tracing::debug!(
                    "Removed user {} from '{}' (no authored messages)",
                    user.id(),
                    record.group.name()
                );
                continue;
            };

            // 送信先が別グループでも、削除対象はこのグループのメッセージ表
            if let Some(position) = record
                .messages
                .iter()
                .position(|message| message.id() == message_id)
            {
                record.messages.remove(position);
            }
            let group_name = record.group.name().to_string();
            state.senders.remove(&message_id);

            let size = state.combined_size();
            tracing::info!(
                "Removed user {} from '{}' and deleted message {}",
                user.id(),
                group_name,
                message_id
            );
            return Ok(Some(size));
        }

        tracing::warn!(
            "Removed user {} from every group but found no authored message; no result produced",
            user.id()
        );
        Ok(None)
    }

    async fn find_message(
        &self,
        start: Timestamp,
        end: Timestamp,
        k: usize,
    ) -> Result<String, RepositoryError> {
        if k == 0 {
            return Err(RepositoryError::InvalidArgument(
                "k must be at least 1".to_string(),
            ));
        }

        let state = self.state.lock().await;
        // BTreeMap の走査順なので ID 昇順に並んでいる
        let in_range: Vec<&Message> = state
            .senders
            .values()
            .map(|sent| &sent.message)
            .filter(|message| message.timestamp().is_strictly_between(start, end))
            .collect();

        if in_range.len() < k {
            return Err(RepositoryError::KTooLarge {
                k,
                available: in_range.len(),
            });
        }

        Ok(in_range[in_range.len() - k].content().to_string())
    }

    async fn group_members(&self, group: &Group) -> Result<Vec<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.record(group)?.members.clone())
    }

    async fn group_messages(&self, group: &Group) -> Result<Vec<Message>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.record(group)?.messages.clone())
    }

    async fn group_admin(&self, group: &Group) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.record(group)?.admin.clone())
    }

    async fn sender_of(&self, message: &Message) -> Option<User> {
        let state = self.state.lock().await;
        state
            .senders
            .get(&message.id())
            .map(|sent| sent.sender.clone())
    }
}
