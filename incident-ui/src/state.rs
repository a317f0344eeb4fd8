use crate::dto::Snapshot;
use leptos::logging;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Error => "error",
        }
    }
}

/// Everything the feed can tell the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    Connecting,
    Opened,
    Closed,
    Failed(String),
    Message(String),
}

/// Status and snapshot travel together and are only ever replaced whole,
/// so a render cannot see a status from one update and a snapshot from
/// another.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub status: ConnectionStatus,
    pub snapshot: Option<Rc<Snapshot>>,
}

impl DashboardState {
    pub fn apply(&self, event: FeedEvent) -> Self {
        match event {
            FeedEvent::Connecting => self.with_status(ConnectionStatus::Connecting),
            FeedEvent::Opened => self.with_status(ConnectionStatus::Connected),
            FeedEvent::Closed => self.with_status(ConnectionStatus::Disconnected),
            FeedEvent::Failed(_) => self.with_status(ConnectionStatus::Error),
            FeedEvent::Message(text) => match Snapshot::parse(&text) {
                Ok(snapshot) => Self {
                    status: self.status,
                    snapshot: Some(Rc::new(snapshot)),
                },
                Err(e) => {
                    logging::error!("invalid JSON from live feed: {e}");
                    self.clone()
                }
            },
        }
    }

    fn with_status(&self, status: ConnectionStatus) -> Self {
        Self {
            status,
            snapshot: self.snapshot.clone(),
        }
    }
}
