//! ルームごとの追記専用メッセージログと offset/limit によるページング
//!
//! ID は全ルーム共通の一つのカウンターから払い出すため、ルーム内だけでなく
//! プロセス全体で一意かつ増加します。

use std::collections::HashMap;

use super::{
    entity::{Message, NewMessage},
    value_object::{MessageId, RoomName, Timestamp},
};

#[derive(Debug)]
pub struct MessageStore {
    logs: HashMap<RoomName, Vec<Message>>,
    next_id: u64,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self {
            logs: HashMap::new(),
            next_id: 1,
        }
    }
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次の ID と `timestamp` を割り当ててルームのログ（必要なら作成）に追加し、
    /// 保存したメッセージを返す
    pub fn append(&mut self, new: NewMessage, timestamp: Timestamp) -> Message {
        let id = MessageId::new(self.next_id);
        self.next_id += 1;

        let message = Message::stored(new, id, timestamp);
        self.logs
            .entry(message.room.clone())
            .or_default()
            .push(message.clone());
        message
    }

    /// 最新から `offset` 件手前で終わる最大 `limit` 件の範囲を古い順で返す
    ///
    /// `n` 件のとき範囲は `[max(0, n - offset - limit), n - offset)`。
    /// `offset >= n` なら空で、ログの先頭で切り詰める。
    pub fn paginate(&self, room: &RoomName, offset: usize, limit: usize) -> Vec<Message> {
        let Some(log) = self.logs.get(room) else {
            return Vec::new();
        };
        let end = log.len().saturating_sub(offset);
        let start = end.saturating_sub(limit);
        log[start..end].to_vec()
    }

    pub fn get(&self, room: &RoomName, message_id: MessageId) -> Option<&Message> {
        let log = self.logs.get(room)?;
        // Ids are appended in increasing order.
        log.binary_search_by_key(&message_id, |m| m.id)
            .ok()
            .map(|index| &log[index])
    }

    pub(crate) fn get_mut(
        &mut self,
        room: &RoomName,
        message_id: MessageId,
    ) -> Option<&mut Message> {
        let log = self.logs.get_mut(room)?;
        let index = log.binary_search_by_key(&message_id, |m| m.id).ok()?;
        log.get_mut(index)
    }

    pub fn len_of(&self, room: &RoomName) -> usize {
        self.logs.get(room).map_or(0, Vec::len)
    }

    pub fn first_timestamp_of(&self, room: &RoomName) -> Option<Timestamp> {
        self.logs.get(room)?.first().map(|m| m.timestamp)
    }

    pub fn room_names(&self) -> impl Iterator<Item = &RoomName> {
        self.logs.keys()
    }
}
