//! Frame stream recording and replay.
//!
//! This module persists a live stream of [`Frame`](crate::schema::Frame)s
//! to a file and replays it later as if it were arriving live.
//!
//! # File Format
//!
//! A recording is a flat stream of frame records, optionally wrapped
//! end-to-end in a gzip envelope:
//!
//! ```text
//! ┌──────────────────────────┐
//! │ Magic "LSFR" (4 bytes)   │
//! │ Format version (1 byte)  │
//! ├──────────────────────────┤
//! │ Record 0                 │  u32 LE payload length + bincode Frame
//! │ Record 1                 │
//! │ ...                      │
//! └──────────────────────────┘
//! ```
//!
//! Whether a file is compressed is not stored out-of-band: the reader
//! detects the gzip envelope from its two magic bytes and reads anything
//! else raw, so the writer's compression choice never needs to be
//! remembered.

mod format;
mod reader;
mod recorder;
mod writer;

pub use format::{RECORDING_MAGIC, RECORDING_VERSION, read_record, write_record};
pub use reader::FrameReader;
pub use recorder::{Mode, Recorder, RecorderOptions};
pub use writer::FrameWriter;

use std::io;
use std::path::PathBuf;

/// Errors raised by the recording subsystem.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The recording file could not be created or opened. Fatal to the
    /// session.
    #[error("cannot open recording {}: {source}", .path.display())]
    Open {
        /// Target file.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The file does not start with a recognizable stream header.
    #[error("not a frame recording: {0}")]
    Format(String),
    /// The recording contains no frame records at all.
    #[error("recording contains no frames")]
    Empty,
    /// A frame record could not be serialized or deserialized.
    #[error("malformed frame record: {0}")]
    Decode(String),
    /// I/O failure while streaming records.
    #[error("recording stream error: {0}")]
    Io(#[from] io::Error),
    /// Write or read attempted after `close()`.
    #[error("recording stream already closed")]
    Closed,
    /// The facade was asked for an operation its mode does not support.
    #[error("{operation} requires {required:?} mode, recorder is in {actual:?} mode")]
    Mode {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Mode the operation needs.
        required: Mode,
        /// Mode the recorder was constructed in.
        actual: Mode,
    },
    /// Replay was attempted before `enable()`.
    #[error("recorder is not enabled")]
    Disabled,
}
