//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{Group, Message, RepositoryError, Timestamp, User};

/// Chat Repository trait
///
/// ユーザー・グループ・メッセージ・管理者権限を管理するデータストアへのインターフェース。
///
/// ## ハンドルの所有
///
/// `create_user` / `create_message` が返す値は Repository 内のどの表にも
/// 登録されません。呼び出し側が値を保持し、以降の操作に渡す必要があります。
/// 検索用の API（携帯番号でユーザーを引く等）は提供しません。
///
/// ## 排他制御
///
/// 各操作は開始から完了まで状態への排他的アクセスを持ちます。
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// ユーザーを作成
    ///
    /// # Errors
    ///
    /// * `DuplicateUser` - `mobile` が登録済み
    async fn create_user(&self, name: String, mobile: String) -> Result<User, RepositoryError>;

    /// グループを作成
    ///
    /// 2 人ならパーソナルチャット（名前は 2 人目のユーザー名、管理者なし）、
    /// 3 人以上なら `"Group N"`（先頭ユーザーが管理者）。
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - ユーザーが 2 人未満
    async fn create_group(&self, users: &[User]) -> Result<Group, RepositoryError>;

    /// メッセージを作成
    ///
    /// 採番した ID と現在時刻を持つメッセージを返します。送信されるまで
    /// Repository には保存されません。
    async fn create_message(&self, content: String) -> Message;

    /// メッセージを送信し、グループ内のメッセージ数を返す
    ///
    /// # Errors
    ///
    /// * `GroupNotFound` - グループが存在しない
    /// * `NotAMember` - 送信者がグループのメンバーでない
    async fn send_message(
        &self,
        message: &Message,
        sender: &User,
        group: &Group,
    ) -> Result<usize, RepositoryError>;

    /// 管理者を `approver` から `user` に移譲
    ///
    /// # Errors
    ///
    /// * `GroupNotFound` - グループが存在しない
    /// * `NotAuthorized` - `approver` が現在の管理者でない（パーソナルチャットは常にこれ）
    /// * `NotAParticipant` - `user` がメンバーでない
    async fn change_admin(
        &self,
        approver: &User,
        user: &User,
        group: &Group,
    ) -> Result<(), RepositoryError>;

    /// ユーザーをグループから削除
    ///
    /// 作成順にグループを走査し、ユーザーを含むグループから順に削除します。
    /// ユーザーが送信したメッセージ（ID 昇順で最初の 1 件）を削除できた時点で
    /// 全グループのメンバー数 + 全グループのメッセージ数 + 送信者表の件数を返します。
    /// 送信メッセージが 1 件もなければメンバーからの削除のみ行い `Ok(None)` を返します。
    ///
    /// 返す件数の集計範囲は要件上あいまいなため、この実装では「走査中のグループ」ではなく
    /// 全グループ・送信者表の合計という解釈を採用しています。
    ///
    /// # Errors
    ///
    /// * `CannotRemoveAdmin` - いずれかのグループの管理者である
    /// * `UserNotFound` - どのグループにも所属していない
    async fn remove_user(&self, user: &User) -> Result<Option<usize>, RepositoryError>;

    /// `(start, end)` の範囲（両端含まず）に作成された送信済みメッセージのうち、
    /// ID が k 番目に大きいものの内容を返す
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - `k == 0`
    /// * `KTooLarge` - 範囲内のメッセージが k 件未満
    async fn find_message(
        &self,
        start: Timestamp,
        end: Timestamp,
        k: usize,
    ) -> Result<String, RepositoryError>;

    /// グループのメンバー一覧を取得
    async fn group_members(&self, group: &Group) -> Result<Vec<User>, RepositoryError>;

    /// グループのメッセージ一覧を取得
    async fn group_messages(&self, group: &Group) -> Result<Vec<Message>, RepositoryError>;

    /// グループの管理者を取得（パーソナルチャットは `None`）
    async fn group_admin(&self, group: &Group) -> Result<Option<User>, RepositoryError>;

    /// メッセージの送信者を取得
    async fn sender_of(&self, message: &Message) -> Option<User>;
}
