//! UseCase 層のエラー定義
//!
//! いずれも致命的ではありません。dispatcher はエラーをログに残してコマンドを破棄します。

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, ValueObjectError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// 必須フィールドの欠落または不正
    #[error("invalid command: {0}")]
    InvalidCommand(#[from] ValueObjectError),

    /// 参照先のルーム・メッセージ・宛先ユーザーが存在しない
    #[error("not found: {0}")]
    NotFound(String),

    /// 要求元の接続への送信に失敗
    #[error("delivery failed: {0}")]
    Push(#[from] MessagePushError),
}

impl From<RepositoryError> for CommandError {
    fn from(error: RepositoryError) -> Self {
        Self::NotFound(error.to_string())
    }
}
