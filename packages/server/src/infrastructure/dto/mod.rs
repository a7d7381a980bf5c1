//! チャットサーバーの DTO（Data Transfer Object）
//!
//! プロトコルごとに分けています：
//! - `websocket`: WebSocket のイベントエンベロープとペイロード
//! - `http`: HTTP API のレスポンス DTO

pub mod conversion;
pub mod http;
pub mod websocket;
