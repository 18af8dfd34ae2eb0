//! Mode-gated facade unifying the stream writer and reader.

use std::path::{Path, PathBuf};

use log::info;

use super::{Error, FrameReader, FrameWriter};
use crate::schema::Frame;

/// Operating mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Capture live frames to the target file.
    Record,
    /// Replay frames from the target file.
    Replay,
}

/// Construction-time options for a [`Recorder`].
#[derive(Debug, Clone, Copy)]
pub struct RecorderOptions {
    /// Gzip-compress the stream when recording.
    pub compress: bool,
    /// Restart from the first frame when replay reaches the end.
    pub looping: bool,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            compress: true,
            looping: true,
        }
    }
}

enum Backend {
    Record(FrameWriter),
    Replay(FrameReader),
}

/// Single entry point for recording or replaying a frame stream.
///
/// A recorder owns exactly one of a [`FrameWriter`] or a [`FrameReader`],
/// selected by its mode, and does nothing until
/// [`enable`](Recorder::enable) is called. That latch lets the surrounding
/// application call [`write`](Recorder::write) unconditionally on every
/// live frame while a single `enable()` call at startup decides whether
/// anything is actually persisted; an enabled recorder cannot be disabled
/// again.
///
/// Each recorder is an independent session object: constructing several,
/// e.g. one per test, never makes them share state.
pub struct Recorder {
    mode: Mode,
    path: PathBuf,
    enabled: bool,
    backend: Backend,
}

impl Recorder {
    /// Construct a recorder owning a writer (`Record`) or reader
    /// (`Replay`) for the target file.
    pub fn new<P: AsRef<Path>>(mode: Mode, path: P, options: RecorderOptions) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let backend = match mode {
            Mode::Record => Backend::Record(FrameWriter::create(&path, options.compress)?),
            Mode::Replay => Backend::Replay(FrameReader::open(&path, options.looping)?),
        };

        info!("recorder ready: {mode:?} {}", path.display());
        Ok(Self {
            mode,
            path,
            enabled: false,
            backend,
        })
    }

    /// Arm the recorder. One-way: there is no disable.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Whether the recorder has been armed.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The mode this recorder was constructed in.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist one frame.
    ///
    /// A silent no-op until [`enable`](Recorder::enable) is called;
    /// rejected outright in `Replay` mode.
    pub fn write(&mut self, frame: &Frame) -> Result<(), Error> {
        let Backend::Record(writer) = &mut self.backend else {
            return Err(Error::Mode {
                operation: "write",
                required: Mode::Record,
                actual: self.mode,
            });
        };
        if !self.enabled {
            return Ok(());
        }
        writer.write(frame)
    }

    /// Pull the next replay frame.
    ///
    /// Rejected in `Record` mode and before [`enable`](Recorder::enable);
    /// the recorder never synthesizes frames while disabled.
    pub fn next_frame(&mut self) -> Result<Frame, Error> {
        let Backend::Replay(reader) = &mut self.backend else {
            return Err(Error::Mode {
                operation: "next_frame",
                required: Mode::Replay,
                actual: self.mode,
            });
        };
        if !self.enabled {
            return Err(Error::Disabled);
        }
        reader.next_frame()
    }

    /// Change replay looping; no effect in `Record` mode.
    pub fn set_looping(&mut self, looping: bool) {
        if let Backend::Replay(reader) = &mut self.backend {
            reader.set_looping(looping);
        }
    }

    /// Close the owned writer or reader. Idempotent.
    pub fn close(&mut self) -> Result<(), Error> {
        match &mut self.backend {
            Backend::Record(writer) => writer.close(),
            Backend::Replay(reader) => {
                reader.close();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Hand;
    use tempfile::tempdir;

    fn frame(id: i64) -> Frame {
        Frame {
            id,
            timestamp: id * 1000,
            hands: vec![Hand {
                id: id as i32,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_recorder_persists_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("disabled.lsr");

        let mut recorder = Recorder::new(Mode::Record, &path, RecorderOptions::default()).unwrap();
        assert!(!recorder.is_enabled());
        for id in 0..50 {
            recorder.write(&frame(id)).unwrap();
        }
        recorder.close().unwrap();

        // Nothing was persisted: the file holds a header and no records.
        assert!(matches!(
            Recorder::new(Mode::Replay, &path, RecorderOptions::default()),
            Err(Error::Empty)
        ));
    }

    #[test]
    fn test_mode_exclusivity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modes.lsr");

        let mut recorder = Recorder::new(Mode::Record, &path, RecorderOptions::default()).unwrap();
        recorder.enable();
        recorder.write(&frame(0)).unwrap();
        assert!(matches!(recorder.next_frame(), Err(Error::Mode { .. })));
        recorder.close().unwrap();

        let mut replay = Recorder::new(Mode::Replay, &path, RecorderOptions::default()).unwrap();
        replay.enable();
        assert!(matches!(replay.write(&frame(1)), Err(Error::Mode { .. })));
        assert_eq!(replay.next_frame().unwrap().id, 0);
    }

    #[test]
    fn test_replay_requires_enable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gated.lsr");

        let mut recorder = Recorder::new(Mode::Record, &path, RecorderOptions::default()).unwrap();
        recorder.enable();
        recorder.write(&frame(0)).unwrap();
        recorder.close().unwrap();

        let mut replay = Recorder::new(Mode::Replay, &path, RecorderOptions::default()).unwrap();
        assert!(matches!(replay.next_frame(), Err(Error::Disabled)));
        replay.enable();
        assert_eq!(replay.next_frame().unwrap().id, 0);
    }

    #[test]
    fn test_enable_is_one_way() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latch.lsr");

        let mut recorder = Recorder::new(Mode::Record, &path, RecorderOptions::default()).unwrap();
        recorder.enable();
        recorder.enable();
        assert!(recorder.is_enabled());
        assert_eq!(recorder.mode(), Mode::Record);
        assert_eq!(recorder.path(), path.as_path());
    }

    // Write 100 frames, replay without looping, and check the stream
    // freezes on the final frame for the 50 reads past the end.
    #[test]
    fn test_record_then_replay_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.lsr");

        let mut recorder = Recorder::new(Mode::Record, &path, RecorderOptions::default()).unwrap();
        recorder.enable();
        for id in 0..100 {
            recorder.write(&frame(id)).unwrap();
        }
        recorder.close().unwrap();

        let options = RecorderOptions {
            looping: false,
            ..Default::default()
        };
        let mut replay = Recorder::new(Mode::Replay, &path, options).unwrap();
        replay.enable();

        for id in 0..100 {
            let replayed = replay.next_frame().unwrap();
            assert_eq!(replayed.id, id);
            assert_eq!(replayed.timestamp, id * 1000);
            assert_eq!(replayed.hands.len(), 1);
        }
        for _ in 0..50 {
            assert_eq!(replay.next_frame().unwrap().id, 99);
        }
        replay.close().unwrap();
    }

    #[test]
    fn test_set_looping_is_noop_when_recording() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noop.lsr");

        let mut recorder = Recorder::new(Mode::Record, &path, RecorderOptions::default()).unwrap();
        recorder.set_looping(false);
        recorder.enable();
        recorder.write(&frame(0)).unwrap();
        recorder.close().unwrap();
    }
}
