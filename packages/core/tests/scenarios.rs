//! Repository scenario tests.
//!
//! Drives `InMemoryChatRepository` through the public `ChatRepository`
//! trait the way a caller layer would.

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use kaiwa_core::{
    ChatRepository, Clock, InMemoryChatRepository, RepositoryError, Timestamp, User,
};

/// Clock advancing by a fixed step on every read.
struct SteppingClock {
    now: AtomicI64,
    step: i64,
}

impl SteppingClock {
    fn new(start: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.now.fetch_add(self.step, Ordering::SeqCst) + self.step)
    }
}

fn repository() -> Arc<dyn ChatRepository> {
    Arc::new(InMemoryChatRepository::with_clock(Arc::new(
        SteppingClock::new(1_000, 10),
    )))
}

async fn user(repo: &Arc<dyn ChatRepository>, name: &str, mobile: &str) -> User {
    repo.create_user(name.to_string(), mobile.to_string())
        .await
        .expect("Failed to create user")
}

#[tokio::test]
async fn test_scenario_duplicate_mobile() {
    // テスト項目: 111 を 2 回登録すると 2 回目が DuplicateUser になる
    // given (前提条件):
    let repo = repository();

    // when (操作):
    let alex = repo.create_user("Alex".to_string(), "111".to_string()).await;
    let bob = repo.create_user("Bob".to_string(), "222".to_string()).await;
    let alex2 = repo.create_user("Alex2".to_string(), "111".to_string()).await;

    // then (期待する結果):
    assert!(alex.is_ok());
    assert!(bob.is_ok());
    assert!(matches!(alex2, Err(RepositoryError::DuplicateUser { .. })));
    assert_eq!(alex2.unwrap_err().to_string(), "User already exists");
}

#[tokio::test]
async fn test_scenario_groups_named_in_creation_order() {
    // テスト項目: {Alex, Bob, Charlie}, {Dan, Evan}, {Felix, Graham, Hugh} の順で
    //            "Group 1", "Evan", "Group 2" になる
    // given (前提条件):
    let repo = repository();
    let alex = user(&repo, "Alex", "1").await;
    let bob = user(&repo, "Bob", "2").await;
    let charlie = user(&repo, "Charlie", "3").await;
    let dan = user(&repo, "Dan", "4").await;
    let evan = user(&repo, "Evan", "5").await;
    let felix = user(&repo, "Felix", "6").await;
    let graham = user(&repo, "Graham", "7").await;
    let hugh = user(&repo, "Hugh", "8").await;

    // when (操作):
    let g1 = repo
        .create_group(&[alex.clone(), bob, charlie])
        .await
        .unwrap();
    let chat = repo.create_group(&[dan, evan]).await.unwrap();
    let g2 = repo.create_group(&[felix, graham, hugh]).await.unwrap();

    // then (期待する結果):
    assert_eq!(g1.name(), "Group 1");
    assert_eq!(chat.name(), "Evan");
    assert_eq!(chat.number_of_participants(), 2);
    assert_eq!(g2.name(), "Group 2");
    assert_eq!(repo.group_admin(&g1).await.unwrap(), Some(alex));
    assert_eq!(repo.group_admin(&chat).await.unwrap(), None);
}

#[tokio::test]
async fn test_scenario_non_member_cannot_send() {
    // テスト項目: グループに所属しない Bob の送信は NotAMember
    // given (前提条件):
    let repo = repository();
    let alex = user(&repo, "Alex", "1").await;
    let bob = user(&repo, "Bob", "2").await;
    let charlie = user(&repo, "Charlie", "3").await;
    let dan = user(&repo, "Dan", "4").await;
    let group = repo
        .create_group(&[alex.clone(), charlie, dan])
        .await
        .unwrap();
    let message = repo.create_message("hello".to_string()).await;

    // when (操作):
    let result = repo.send_message(&message, &bob, &group).await;

    // then (期待する結果):
    assert_eq!(result, Err(RepositoryError::NotAMember));
    assert_eq!(repo.send_message(&message, &alex, &group).await, Ok(1));
}

#[tokio::test]
async fn test_scenario_admin_handover_then_removal() {
    // テスト項目: 管理者を移譲すると元の管理者を削除できるようになる
    // given (前提条件):
    let repo = repository();
    let alex = user(&repo, "Alex", "1").await;
    let bob = user(&repo, "Bob", "2").await;
    let charlie = user(&repo, "Charlie", "3").await;
    let group = repo
        .create_group(&[alex.clone(), bob.clone(), charlie.clone()])
        .await
        .unwrap();
    let hello = repo.create_message("hello".to_string()).await;
    repo.send_message(&hello, &alex, &group).await.unwrap();

    // when (操作):
    let before = repo.remove_user(&alex).await;
    repo.change_admin(&alex, &bob, &group).await.unwrap();
    let after = repo.remove_user(&alex).await;

    // then (期待する結果):
    assert_eq!(before, Err(RepositoryError::CannotRemoveAdmin));
    // members 2 + messages 0 + senders 0
    assert_eq!(after, Ok(Some(2)));
    assert_eq!(
        repo.change_admin(&alex, &charlie, &group).await,
        Err(RepositoryError::NotAuthorized)
    );
    assert_eq!(repo.change_admin(&bob, &charlie, &group).await, Ok(()));
}

#[tokio::test]
async fn test_scenario_find_message_across_groups() {
    // テスト項目: 検索はグループをまたいで送信済みメッセージ全体を対象にする
    // given (前提条件): 時刻 1010, 1020, 1030, 1040 のメッセージ
    let repo = repository();
    let alex = user(&repo, "Alex", "1").await;
    let bob = user(&repo, "Bob", "2").await;
    let charlie = user(&repo, "Charlie", "3").await;
    let chat = repo.create_group(&[alex.clone(), bob.clone()]).await.unwrap();
    let group = repo
        .create_group(&[charlie.clone(), alex.clone(), bob.clone()])
        .await
        .unwrap();

    let m1 = repo.create_message("one".to_string()).await;
    let m2 = repo.create_message("two".to_string()).await;
    let m3 = repo.create_message("three".to_string()).await;
    let m4 = repo.create_message("four".to_string()).await;
    repo.send_message(&m1, &alex, &chat).await.unwrap();
    repo.send_message(&m2, &charlie, &group).await.unwrap();
    repo.send_message(&m3, &bob, &chat).await.unwrap();
    repo.send_message(&m4, &bob, &group).await.unwrap();

    let start = Timestamp::new(1_000);
    let end = Timestamp::new(2_000);

    // then (期待する結果):
    assert_eq!(repo.find_message(start, end, 1).await, Ok("four".to_string()));
    assert_eq!(repo.find_message(start, end, 4).await, Ok("one".to_string()));
    assert_eq!(
        repo.find_message(start, end, 5).await,
        Err(RepositoryError::KTooLarge { k: 5, available: 4 })
    );
    assert_eq!(
        repo.find_message(Timestamp::new(1_010), Timestamp::new(1_040), 2)
            .await,
        Ok("two".to_string())
    );
}
