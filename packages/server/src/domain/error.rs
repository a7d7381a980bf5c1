//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::{MessageId, RoomName};

/// 値オブジェクトの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 必須フィールドがない
    #[error("{0} is required")]
    Missing(&'static str),

    /// 必須テキストが空または空白のみ
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// テキストが最大長（文字数）を超えている
    #[error("{field} exceeds {max} characters (got {actual})")]
    TooLong {
        /// フィールド名
        field: &'static str,
        /// 許容される最大文字数
        max: usize,
        /// 実際の文字数
        actual: usize,
    },

    /// 本文も画像もないメッセージ
    #[error("message must carry text or an image")]
    EmptyMessage,
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 参照したメッセージがルームのログに存在しない
    #[error("message {message_id} not found in room '{room}'")]
    MessageNotFound {
        /// 検索したルーム
        room: RoomName,
        /// 検索したメッセージ ID
        message_id: MessageId,
    },
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 対象の接続にチャンネルが登録されていない
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// チャンネルが閉じている、またはペイロードをエンコードできない
    #[error("push failed: {0}")]
    PushFailed(String),
}
