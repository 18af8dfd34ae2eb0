//! Live frame acquisition.
//!
//! The tracking service exposes two acquisition paths: a local websocket
//! endpoint serving one JSON message per device frame, and the native SDK
//! callback chain delivering in-memory snapshots. Both feed decoded
//! [`Frame`](crate::schema::Frame)s to a [`TrackingListener`]; which path
//! drives the listener is chosen once at construction, not branched on per
//! callback.

mod device;
mod socket;

pub use device::{
    DeviceFrame, DeviceGesture, DeviceHand, DeviceInteractionBox, DevicePointable,
    drive_device_frames,
};
pub use socket::{DEFAULT_SOCKET_URL, SocketSource};

use crate::schema::Frame;

/// Errors raised while acquiring live frames.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The tracking service endpoint could not be reached. Fatal: there is
    /// nothing to capture without a live stream.
    #[error("cannot reach tracking service at {url}: {source}")]
    Connection {
        /// Endpoint that refused the connection.
        url: String,
        /// Underlying websocket error.
        #[source]
        source: tungstenite::Error,
    },
    /// The established socket failed mid-stream.
    #[error("tracking socket error: {0}")]
    Socket(#[from] tungstenite::Error),
    /// A live message could not be decoded into a frame.
    #[error("malformed tracking message: {0}")]
    Message(#[from] serde_json::Error),
}

/// Capability interface for consumers of the live frame stream.
///
/// Only [`on_frame`](TrackingListener::on_frame) is mandatory; lifecycle
/// notifications default to no-ops.
pub trait TrackingListener {
    /// The source established its connection and is about to deliver
    /// frames.
    fn on_connect(&mut self) {}

    /// One decoded frame arrived.
    fn on_frame(&mut self, frame: Frame);

    /// The source shut down, by remote close or local request.
    fn on_close(&mut self) {}

    /// A non-fatal acquisition error occurred; the stream continues.
    fn on_error(&mut self, _error: &SourceError) {}
}
