//! Stream writer: serializes a live frame stream to a recording file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use log::{debug, info};

use super::{Error, format};
use crate::schema::Frame;

/// Output layering: records pass through an optional gzip envelope before
/// hitting the buffered file.
enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

/// Writes a sequence of frame records to a file, optionally compressed.
///
/// Usage:
/// ```ignore
/// let mut writer = FrameWriter::create("capture.lsr", true)?;
/// for frame in frames {
///     writer.write(&frame)?;
/// }
/// writer.close()?;
/// ```
///
/// [`close`](FrameWriter::close) must be called when capture ends: it
/// flushes the layers innermost-first, so the gzip trailer lands in the
/// file before the handle is released. Writing after close is an error.
pub struct FrameWriter {
    sink: Option<Sink>,
    path: PathBuf,
    frames_written: u64,
}

impl FrameWriter {
    /// Create the recording file and write the stream header.
    pub fn create<P: AsRef<Path>>(path: P, compress: bool) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        let buffered = BufWriter::new(file);

        let mut sink = if compress {
            Sink::Gzip(GzEncoder::new(buffered, Compression::default()))
        } else {
            Sink::Plain(buffered)
        };
        format::write_stream_header(&mut sink)?;

        debug!(
            "recording to {} (compressed: {compress})",
            path.display()
        );
        Ok(Self {
            sink: Some(sink),
            path,
            frames_written: 0,
        })
    }

    /// Append one frame record.
    pub fn write(&mut self, frame: &Frame) -> Result<(), Error> {
        let sink = self.sink.as_mut().ok_or(Error::Closed)?;
        format::write_record(sink, frame)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Path of the recording file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush every layer in order and release the file handle.
    ///
    /// Idempotent: closing an already closed writer is a no-op.
    pub fn close(&mut self) -> Result<(), Error> {
        let Some(sink) = self.sink.take() else {
            return Ok(());
        };

        let mut buffered = match sink {
            Sink::Plain(buffered) => buffered,
            // finish() drains the encoder and writes the gzip trailer.
            Sink::Gzip(encoder) => encoder.finish()?,
        };
        buffered.flush()?;

        info!(
            "closed recording {} ({} frames)",
            self.path.display(),
            self.frames_written
        );
        Ok(())
    }
}
