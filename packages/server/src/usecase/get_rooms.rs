//! UseCase: ルーム一覧・詳細取得

use std::{collections::BTreeMap, sync::Arc};

use crate::domain::{MessageRepository, RoomName, RoomRepository, RoomSummary, Timestamp};

/// ルーム一覧・詳細取得のユースケース
pub struct GetRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl GetRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, messages: Arc<dyn MessageRepository>) -> Self {
        Self { rooms, messages }
    }

    /// 参加または書き込みのあった全ルームを名前順で返す
    pub async fn execute(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.room_overview().await;
        let logs = self.messages.log_overview().await;
        summarize_rooms(rooms, logs)
    }

    pub async fn detail(&self, room: &RoomName) -> Option<RoomSummary> {
        self.execute().await.into_iter().find(|summary| &summary.name == room)
    }
}

/// メンバー情報とログ情報をルームごとのサマリーに統合し、名前順で返す
///
/// ログだけがあるルーム（参加者なしで書き込まれた）は最初のメッセージの時刻を作成時刻とする。
pub fn summarize_rooms(
    rooms: Vec<(RoomName, usize, Timestamp)>,
    logs: Vec<(RoomName, usize, Option<Timestamp>)>,
) -> Vec<RoomSummary> {
    let mut summaries: BTreeMap<RoomName, RoomSummary> = rooms
        .into_iter()
        .map(|(name, member_count, created_at)| {
            let summary = RoomSummary {
                name: name.clone(),
                member_count,
                message_count: 0,
                created_at,
            };
            (name, summary)
        })
        .collect();

    for (name, message_count, first_at) in logs {
        summaries
            .entry(name.clone())
            .and_modify(|summary| summary.message_count = message_count)
            .or_insert_with(|| RoomSummary {
                name,
                member_count: 0,
                message_count,
                created_at: first_at.unwrap_or(Timestamp::new(0)),
            });
    }

    summaries.into_values().collect()
}
