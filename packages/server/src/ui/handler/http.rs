//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use roomcast_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{RoomName, Username},
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get online usernames, sorted
pub async fn get_users(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let users = state.get_online_users_usecase.execute().await;
    Json(users.into_iter().map(Username::into_string).collect())
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            name: room.name.into_string(),
            members: room.member_count,
            messages: room.message_count,
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room = RoomName::new(room).map_err(|_| StatusCode::NOT_FOUND)?;
    let summary = state
        .get_rooms_usecase
        .detail(&room)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    // Domain Model から DTO への変換
    Ok(Json(RoomDetailDto {
        name: summary.name.into_string(),
        members: summary.member_count,
        messages: summary.message_count,
        created_at: timestamp_to_rfc3339(summary.created_at.value()),
    }))
}
