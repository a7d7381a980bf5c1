//! リアクションと既読の台帳
//!
//! 保存済みメッセージの可変フィールドを書き換える唯一の場所です。どちらの操作もユーザーごとに冪等で、
//! 指定ルームのログにメッセージがなければ [`RepositoryError::MessageNotFound`] を返します。
//! 送信者が自分のメッセージを既読にできるかは呼び出し側が決めます。

use super::{
    entity::{ReactionUpdate, ReadUpdate},
    error::RepositoryError,
    message_store::MessageStore,
    value_object::{MessageId, Reaction, RoomName, Username},
};

pub struct ReactionReadLedger<'a> {
    store: &'a mut MessageStore,
}

impl<'a> ReactionReadLedger<'a> {
    pub fn new(store: &'a mut MessageStore) -> Self {
        Self { store }
    }

    pub fn add_reaction(
        &mut self,
        room: &RoomName,
        message_id: MessageId,
        reaction: Reaction,
        username: Username,
    ) -> Result<ReactionUpdate, RepositoryError> {
        let message = self
            .store
            .get_mut(room, message_id)
            .ok_or_else(|| not_found(room, message_id))?;

        let changed = message.add_reaction(reaction.clone(), username.clone());
        let count = message.reactors(&reaction).len();
        Ok(ReactionUpdate {
            message_id,
            reaction,
            username,
            count,
            changed,
        })
    }

    pub fn mark_read(
        &mut self,
        room: &RoomName,
        message_id: MessageId,
        username: Username,
    ) -> Result<ReadUpdate, RepositoryError> {
        let message = self
            .store
            .get_mut(room, message_id)
            .ok_or_else(|| not_found(room, message_id))?;

        let changed = message.mark_read(username.clone());
        Ok(ReadUpdate {
            message_id,
            username,
            read_by: message.read_by.clone(),
            changed,
        })
    }
}

fn not_found(room: &RoomName, message_id: MessageId) -> RepositoryError {
    RepositoryError::MessageNotFound {
        room: room.clone(),
        message_id,
    }
}
