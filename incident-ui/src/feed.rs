//! Connection lifecycle for the live feed.
//!
//! A [`LiveFeed`] owns the single open connection for one endpoint address.
//! Dropping it closes the connection, so whoever holds the guard decides how
//! long the connection lives.

use crate::config::Endpoint;
use crate::state::{DashboardState, FeedEvent};
use leptos::{
    create_effect, create_memo, logging, on_cleanup, Effect, RwSignal, SignalGet, SignalUpdate,
};
use std::cell::Cell;
use std::rc::Rc;

pub type EventSink = Rc<dyn Fn(FeedEvent)>;

pub trait Connection {
    fn close(&mut self);
}

/// Opens connections that report open/close/error/message through `sink`.
pub trait Transport {
    type Connection: Connection;

    fn open(&self, address: &str, sink: EventSink) -> Result<Self::Connection, String>;
}

pub struct LiveFeed<C: Connection> {
    connection: Option<C>,
    live: Rc<Cell<bool>>,
}

impl<C: Connection> LiveFeed<C> {
    /// Closes the connection. Later calls, and events the transport delivers
    /// afterwards, are ignored.
    pub fn close(&mut self) {
        self.live.set(false);
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }
}

impl<C: Connection> Drop for LiveFeed<C> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Starts a connection to `endpoint`, or does nothing when no address is
/// configured.
pub fn connect<T, F>(
    transport: &T,
    endpoint: &Endpoint,
    dispatch: F,
) -> Option<LiveFeed<T::Connection>>
where
    T: Transport,
    F: Fn(FeedEvent) + 'static,
{
    if !endpoint.is_configured() {
        return None;
    }

    let dispatch = Rc::new(dispatch);
    let live = Rc::new(Cell::new(true));
    let sink: EventSink = {
        let dispatch = dispatch.clone();
        let live = live.clone();
        Rc::new(move |event| {
            if live.get() {
                dispatch(event);
            }
        })
    };

    dispatch(FeedEvent::Connecting);
    match transport.open(endpoint.as_str(), sink) {
        Ok(connection) => Some(LiveFeed {
            connection: Some(connection),
            live,
        }),
        Err(e) => {
            live.set(false);
            logging::warn!("live feed {} failed to open: {e}", endpoint.as_str());
            dispatch(FeedEvent::Failed(e));
            None
        }
    }
}

/// Keeps one feed open for the current value of `endpoint`.
///
/// The feed is reopened only when the address actually changes; the old
/// connection is closed first. Disposing the returned effect closes the
/// last connection and leaves the status `Disconnected`.
pub fn bind_feed<T>(
    transport: T,
    endpoint: RwSignal<Endpoint>,
    state: RwSignal<DashboardState>,
) -> Effect<()>
where
    T: Transport + 'static,
{
    let address = create_memo(move |_| endpoint.get());

    create_effect(move |_| {
        let live = connect(&transport, &address.get(), move |event| {
            state.update(|s| *s = s.apply(event));
        });
        on_cleanup(move || {
            drop(live);
            state.try_update(|s| *s = s.apply(FeedEvent::Closed));
        });
    })
}
