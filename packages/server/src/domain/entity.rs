//! ドメインエンティティ

use super::{
    error::ValueObjectError,
    value_object::{ImagePayload, MessageId, Reaction, RoomName, Timestamp, Username},
};

/// 保存前の検証済みメッセージ
///
/// 本文と画像は併用できるが、少なくとも一方が必要。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub room: RoomName,
    pub sender: Username,
    pub body: String,
    pub image: Option<ImagePayload>,
}

impl NewMessage {
    pub fn new(
        room: RoomName,
        sender: Username,
        body: String,
        image: Option<ImagePayload>,
    ) -> Result<Self, ValueObjectError> {
        if body.trim().is_empty() && image.is_none() {
            return Err(ValueObjectError::EmptyMessage);
        }
        Ok(Self {
            room,
            sender,
            body,
            image,
        })
    }
}

/// 保存済みのルームメッセージ
///
/// `id`, `room`, `sender`, `body`, `image`, `timestamp` は追加後に変わらない。
/// `reactions` と `read_by` は [`ReactionReadLedger`] 経由で増えるだけ。
///
/// [`ReactionReadLedger`]: super::ledger::ReactionReadLedger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub room: RoomName,
    pub sender: Username,
    pub body: String,
    pub image: Option<ImagePayload>,
    pub timestamp: Timestamp,
    /// Reaction symbol → users who applied it, both in first-applied order
    pub reactions: Vec<(Reaction, Vec<Username>)>,
    /// 既読にしたユーザー（既読順）
    pub read_by: Vec<Username>,
}

impl Message {
    pub(crate) fn stored(new: NewMessage, id: MessageId, timestamp: Timestamp) -> Self {
        Self {
            id,
            room: new.room,
            sender: new.sender,
            body: new.body,
            image: new.image,
            timestamp,
            reactions: Vec::new(),
            read_by: Vec::new(),
        }
    }

    /// `reaction` を付けたユーザー（いなければ空）
    pub fn reactors(&self, reaction: &Reaction) -> &[Username] {
        self.reactions
            .iter()
            .find(|(symbol, _)| symbol == reaction)
            .map(|(_, users)| users.as_slice())
            .unwrap_or_default()
    }

    /// リアクションのユーザー集合に追加。既に含まれていれば `false`
    pub(crate) fn add_reaction(&mut self, reaction: Reaction, username: Username) -> bool {
        match self.reactions.iter_mut().find(|(symbol, _)| *symbol == reaction) {
            Some((_, users)) if users.contains(&username) => false,
            Some((_, users)) => {
                users.push(username);
                true
            }
            None => {
                self.reactions.push((reaction, vec![username]));
                true
            }
        }
    }

    /// 既読集合に追加。既に含まれていれば `false`
    pub(crate) fn mark_read(&mut self, username: Username) -> bool {
        if self.read_by.contains(&username) {
            return false;
        }
        self.read_by.push(username);
        true
    }
}

/// リアクションの結果（`message-reaction` の差分配信に使う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionUpdate {
    pub message_id: MessageId,
    pub reaction: Reaction,
    pub username: Username,
    /// 更新後にこのリアクションを付けているユーザー数
    pub count: usize,
    /// 既に同じリアクションを付けていた場合は `false`
    pub changed: bool,
}

/// 既読の結果（`message-read-update` の差分配信に使う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadUpdate {
    pub message_id: MessageId,
    pub username: Username,
    /// 更新後の既読集合全体
    pub read_by: Vec<Username>,
    /// 既に既読だった場合は `false`
    pub changed: bool,
}

/// HTTP API 用のルーム概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: RoomName,
    pub member_count: usize,
    pub message_count: usize,
    pub created_at: Timestamp,
}
