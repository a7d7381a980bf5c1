//! HTTP API レスポンス DTO

use serde::{Deserialize, Serialize};

/// ルーム一覧の要素（`GET /api/rooms`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub members: usize,
    pub messages: usize,
}

/// ルーム詳細（`GET /api/rooms/{room}`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub name: String,
    pub members: usize,
    pub messages: usize,
    pub created_at: String,
}
