//! Infrastructure 層：インメモリ Repository、WebSocket 送信、ワイヤー DTO

pub mod dto;
pub mod message_pusher;
pub mod repository;
