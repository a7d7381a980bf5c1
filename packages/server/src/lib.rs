//! Real-time group messaging server.
//!
//! Clients connect over WebSocket, pick a username, join rooms and exchange room
//! messages, reactions, read receipts and private messages. All state lives in memory.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
