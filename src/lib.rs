//! Record and replay of hand-tracking frame streams.
//!
//! This crate captures the stream of structured snapshots ("frames") a
//! motion-tracking device produces, persists them to a compressed file,
//! and replays them later as if they were arriving live. Consumers of the
//! frame stream (renderers, IK solvers, gesture logic) are downstream of
//! this crate and receive decoded [`Frame`](schema::Frame) values only.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: the frame data model (hands, pointables, gestures, the
//!   interaction box)
//! - `recording`: the binary stream format, the file writer and reader,
//!   and the mode-gated [`Recorder`] facade
//! - `source`: live acquisition from the tracking service's websocket or
//!   from SDK snapshots
//!
//! # Example
//!
//! ```rust,no_run
//! use leapstream::{Mode, Recorder, RecorderOptions};
//!
//! // Capture: write every live frame, replay nothing.
//! let mut recorder = Recorder::new(Mode::Record, "capture.lsr", RecorderOptions::default())?;
//! recorder.enable();
//! // ... recorder.write(&frame) once per live frame ...
//! recorder.close()?;
//!
//! // Replay: read the capture back as if it were live.
//! let mut replay = Recorder::new(Mode::Replay, "capture.lsr", RecorderOptions::default())?;
//! replay.enable();
//! let frame = replay.next_frame()?;
//! println!("{frame}");
//! # Ok::<(), leapstream::recording::Error>(())
//! ```

pub mod recording;
pub mod schema;
pub mod source;

// Re-export commonly used types
pub use recording::{FrameReader, FrameWriter, Mode, Recorder, RecorderOptions};
pub use schema::Frame;
pub use source::{SocketSource, TrackingListener};
