//! Development producer for the live summary dashboard: replays snapshot
//! payloads over a WebSocket.

pub mod config;
pub mod script;
pub mod stream;
