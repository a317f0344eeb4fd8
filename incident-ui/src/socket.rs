use crate::feed::{Connection, EventSink, Transport};
use crate::state::FeedEvent;
use leptos::logging;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

/// Browser WebSocket transport.
pub struct BrowserSocket;

pub struct SocketConnection {
    ws: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl Transport for BrowserSocket {
    type Connection = SocketConnection;

    fn open(&self, address: &str, sink: EventSink) -> Result<SocketConnection, String> {
        let ws = WebSocket::new(address).map_err(|e| format!("websocket open failed: {e:?}"))?;

        let open_sink = sink.clone();
        let on_open = Closure::wrap(Box::new(move |_e: Event| {
            logging::log!("live feed connected");
            open_sink(FeedEvent::Opened);
        }) as Box<dyn FnMut(Event)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let message_sink = sink.clone();
        let on_message = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Some(event) = frame_event(e.data().as_string()) {
                message_sink(event);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let error_sink = sink.clone();
        // Browsers fire a plain `Event` here, so there is no message to read.
        let on_error = Closure::wrap(Box::new(move |e: Event| {
            logging::warn!("live feed transport error ({})", e.type_());
            error_sink(FeedEvent::Failed("websocket error".into()));
        }) as Box<dyn FnMut(Event)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let close_sink = sink;
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            logging::log!("live feed closed (code {})", e.code());
            close_sink(FeedEvent::Closed);
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(SocketConnection {
            ws,
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
        })
    }
}

impl Connection for SocketConnection {
    fn close(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        if let Err(e) = self.ws.close() {
            logging::warn!("live feed close failed: {e:?}");
        }
    }
}

/// Binary frames are not part of the feed; they are reported and dropped.
fn frame_event(text: Option<String>) -> Option<FeedEvent> {
    match text {
        Some(text) => Some(FeedEvent::Message(text)),
        None => {
            logging::warn!("live feed sent a non-text frame; ignoring it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_frames_become_messages() {
        assert_eq!(
            frame_event(Some("{\"priority\": 1}".into())),
            Some(FeedEvent::Message("{\"priority\": 1}".into()))
        );
    }

    #[test]
    fn binary_frames_are_dropped() {
        assert_eq!(frame_event(None), None);
    }
}
