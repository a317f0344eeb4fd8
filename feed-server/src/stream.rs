use crate::config::FeedConfig;
use crate::script::ReplayScript;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct FeedState {
    pub script: ReplayScript,
    pub interval: Duration,
    pub repeat: bool,
}

impl FeedState {
    pub fn new(script: ReplayScript, config: &FeedConfig) -> Self {
        Self {
            script,
            interval: config.interval,
            repeat: config.repeat,
        }
    }

    /// Frame to send on the given tick, or `None` once a one-shot replay has
    /// run out.
    pub fn frame_at(&self, tick: usize) -> Option<&str> {
        let frames = self.script.frames();
        if frames.is_empty() {
            return None;
        }
        let idx = if self.repeat { tick % frames.len() } else { tick };
        frames.get(idx).map(String::as_str)
    }
}

pub fn feed_router(state: FeedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/live-summary", get(live_summary))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn live_summary(ws: WebSocketUpgrade, State(state): State<FeedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| replay(socket, state))
}

/// Each client gets its own replay from the first frame. The socket stays
/// open after a one-shot replay until the client leaves.
async fn replay(mut socket: WebSocket, state: FeedState) {
    info!("dashboard connected");
    let mut interval = tokio::time::interval(state.interval);
    let mut tick = 0usize;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let Some(frame) = state.frame_at(tick) else {
                    continue;
                };
                tick += 1;
                debug!(tick, "sending frame");
                if socket.send(Message::Text(frame.to_string())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                None | Some(Err(_)) | Some(Ok(Message::Close(_))) => break,
                Some(Ok(_)) => {}
            },
        }
    }

    info!(frames_sent = tick, "dashboard disconnected");
}
