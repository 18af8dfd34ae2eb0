//! Blocking websocket client for the tracking service's message stream.

use std::net::TcpStream;

use log::{debug, info, warn};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::{SourceError, TrackingListener};
use crate::schema::Frame;

/// Default endpoint of the local tracking daemon.
pub const DEFAULT_SOCKET_URL: &str = "ws://localhost:6437";

/// A connected message-stream client delivering one decoded frame per text
/// message.
///
/// The client is strictly synchronous: [`run`](SocketSource::run) blocks
/// its caller and invokes the listener inline, one message at a time, which
/// is exactly the cooperative model the recorder's writer assumes.
pub struct SocketSource {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
    url: String,
}

impl SocketSource {
    /// Connect to the tracking service.
    pub fn connect(url: &str) -> Result<Self, SourceError> {
        let (socket, _response) =
            tungstenite::connect(url).map_err(|source| SourceError::Connection {
                url: url.to_string(),
                source,
            })?;
        info!("connected to tracking service at {url}");
        Ok(Self {
            socket,
            url: url.to_string(),
        })
    }

    /// Endpoint this source is connected to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pump messages until the peer closes the stream, delivering each
    /// decoded frame to `listener`.
    ///
    /// Malformed messages are reported through
    /// [`on_error`](TrackingListener::on_error) and skipped; they never
    /// terminate the stream. Socket failures do, after notifying
    /// [`on_close`](TrackingListener::on_close).
    pub fn run(&mut self, listener: &mut dyn TrackingListener) -> Result<(), SourceError> {
        listener.on_connect();
        loop {
            let message = match self.socket.read() {
                Ok(message) => message,
                Err(tungstenite::Error::ConnectionClosed) => break,
                Err(err) => {
                    listener.on_close();
                    return Err(err.into());
                }
            };

            match message {
                Message::Text(text) => match Frame::from_message(text.as_str()) {
                    Ok(frame) => listener.on_frame(frame),
                    Err(err) => {
                        warn!("skipping malformed tracking message: {err}");
                        listener.on_error(&SourceError::Message(err));
                    }
                },
                Message::Close(_) => {
                    debug!("tracking service closed the stream");
                    break;
                }
                // Ping/pong is answered inside tungstenite; binary frames
                // are not part of the tracking protocol.
                _ => {}
            }
        }
        listener.on_close();
        Ok(())
    }

    /// Close the connection to the tracking service.
    pub fn close(&mut self) {
        if let Err(err) = self.socket.close(None) {
            debug!("error closing tracking socket to {}: {err}", self.url);
        }
    }
}
