//! Stream reader: replays recorded frames with loop and freeze semantics.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::debug;

use super::{Error, format};
use crate::schema::Frame;

/// First two bytes of a gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Input layering, mirroring the writer's sink.
enum Source {
    Plain(BufReader<File>),
    Gzip(GzDecoder<BufReader<File>>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Plain(r) => r.read(buf),
            Source::Gzip(r) => r.read(buf),
        }
    }
}

/// Replays frame records from a recording file.
///
/// Compression is detected from the file itself: a gzip envelope announces
/// itself with two magic bytes, anything else is read raw. A gzip decoder
/// does not pass uncompressed input through unchanged, so detection rather
/// than blind wrapping is what makes the writer's compression choice
/// transparent here.
///
/// End-of-stream behavior is driven by the looping flag. Looping replays
/// close the file and reopen it from the first frame; non-looping replays
/// freeze, returning the final frame from every subsequent call without
/// ever re-parsing the file.
pub struct FrameReader {
    source: Option<Source>,
    path: PathBuf,
    looping: bool,
    exhausted: bool,
    /// Staged by (re)open so exhaustion can never be the first observable
    /// event on a readable file.
    pending: Option<Frame>,
    last_good: Option<Frame>,
}

impl FrameReader {
    /// Open a recording for replay.
    ///
    /// A file that is missing, has no valid stream header, or contains no
    /// frame records at all is rejected here rather than on the first
    /// read.
    pub fn open<P: AsRef<Path>>(path: P, looping: bool) -> Result<Self, Error> {
        let mut reader = Self {
            source: None,
            path: path.as_ref().to_path_buf(),
            looping,
            exhausted: false,
            pending: None,
            last_good: None,
        };
        reader.reopen()?;
        debug!("replaying {} (looping: {looping})", reader.path.display());
        Ok(reader)
    }

    /// Read the next frame.
    ///
    /// At end of stream this either restarts the file (looping) or returns
    /// the last successfully read frame forever (non-looping). Malformed
    /// records away from the stream tail surface as [`Error::Decode`]
    /// without disturbing the cached frame.
    pub fn next_frame(&mut self) -> Result<Frame, Error> {
        if self.exhausted {
            if !self.looping {
                // Frozen: never parse again.
                return self.last_frame();
            }
            self.reopen()?;
        }
        self.read_streaming()
    }

    /// Change loop behavior; takes effect at the next end of stream.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Whether replay restarts at end of stream.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Path of the recording file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the file handle and drop all replay state. Every subsequent
    /// [`next_frame`](FrameReader::next_frame) returns [`Error::Closed`].
    pub fn close(&mut self) {
        self.source = None;
        self.pending = None;
        self.last_good = None;
        self.exhausted = false;
    }

    fn read_streaming(&mut self) -> Result<Frame, Error> {
        if let Some(frame) = self.pending.take() {
            self.last_good = Some(frame.clone());
            return Ok(frame);
        }

        let source = self.source.as_mut().ok_or(Error::Closed)?;
        match format::read_record(source)? {
            Some(frame) => {
                self.last_good = Some(frame.clone());
                Ok(frame)
            }
            None => {
                debug!("reached end of recording {}", self.path.display());
                self.exhausted = true;
                if self.looping {
                    // Recursion depth is bounded: reopen stages a frame, so
                    // the retry returns from the pending branch.
                    self.reopen()?;
                    self.read_streaming()
                } else {
                    self.last_frame()
                }
            }
        }
    }

    /// Open the file, validate the header and stage the first record.
    /// Closes any previous handle first so loop cycles never hold two.
    fn reopen(&mut self) -> Result<(), Error> {
        self.source = None;

        let file = File::open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })?;
        let mut buffered = BufReader::new(file);

        let is_gzip = buffered.fill_buf()?.starts_with(&GZIP_MAGIC);
        let mut source = if is_gzip {
            Source::Gzip(GzDecoder::new(buffered))
        } else {
            Source::Plain(buffered)
        };
        format::read_stream_header(&mut source)?;

        let first = format::read_record(&mut source)?.ok_or(Error::Empty)?;
        self.source = Some(source);
        self.pending = Some(first);
        self.exhausted = false;
        Ok(())
    }

    fn last_frame(&self) -> Result<Frame, Error> {
        // Streaming always caches a frame before exhaustion can be
        // observed, so a frozen reader has one to hand back.
        self.last_good.clone().ok_or(Error::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::FrameWriter;
    use crate::schema::Hand;
    use std::fs;
    use std::path::Path;
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

    fn record(path: &Path, ids: &[i64], compress: bool) {
        let mut writer = FrameWriter::create(path, compress).unwrap();
        for &id in ids {
            writer.write(&frame(id)).unwrap();
        }
        writer.close().unwrap();
    }

    #[test]
    fn test_looping_restarts_from_first_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loop.lsr");
        record(&path, &[0, 1, 2], true);

        let mut reader = FrameReader::open(&path, true).unwrap();
        let ids: Vec<i64> = (0..6).map(|_| reader.next_frame().unwrap().id).collect();
        assert_eq!(ids, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_non_looping_freezes_on_last_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("freeze.lsr");
        record(&path, &[0, 1, 2], true);

        let mut reader = FrameReader::open(&path, false).unwrap();
        let ids: Vec<i64> = (0..5).map(|_| reader.next_frame().unwrap().id).collect();
        assert_eq!(ids, vec![0, 1, 2, 2, 2]);
    }

    #[test]
    fn test_compression_transparency() {
        let dir = tempdir().unwrap();
        let ids = [10, 20, 30];

        let mut replayed = Vec::new();
        for compress in [true, false] {
            let path = dir.path().join(format!("transparent-{compress}.lsr"));
            record(&path, &ids, compress);

            let mut reader = FrameReader::open(&path, false).unwrap();
            let frames: Vec<Frame> = (0..ids.len()).map(|_| reader.next_frame().unwrap()).collect();
            replayed.push(frames);
        }

        assert_eq!(replayed[0], replayed[1]);
        assert_eq!(
            replayed[0].iter().map(|f| f.id).collect::<Vec<_>>(),
            ids.to_vec()
        );
    }

    #[test]
    fn test_looping_toggle_after_freeze_resumes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toggle.lsr");
        record(&path, &[0, 1], true);

        let mut reader = FrameReader::open(&path, false).unwrap();
        assert_eq!(reader.next_frame().unwrap().id, 0);
        assert_eq!(reader.next_frame().unwrap().id, 1);
        assert_eq!(reader.next_frame().unwrap().id, 1);

        // Flipping the flag on an exhausted reader restarts it on the
        // next read.
        reader.set_looping(true);
        assert_eq!(reader.next_frame().unwrap().id, 0);
    }

    #[test]
    fn test_replayed_frames_are_valid_and_complete() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fields.lsr");
        record(&path, &[42], true);

        let mut reader = FrameReader::open(&path, false).unwrap();
        let replayed = reader.next_frame().unwrap();
        assert!(replayed.is_valid());
        assert_eq!(replayed, frame(42));
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(matches!(
            FrameReader::open("/definitely/not/here.lsr", true),
            Err(Error::Open { .. })
        ));
    }

    #[test]
    fn test_open_empty_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.lsr");
        fs::write(&path, b"").unwrap();
        assert!(matches!(
            FrameReader::open(&path, true),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_open_garbage_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.lsr");
        fs::write(&path, b"these are not the frames you are looking for").unwrap();
        assert!(matches!(
            FrameReader::open(&path, true),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_open_recording_without_frames_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("headeronly.lsr");
        let mut writer = FrameWriter::create(&path, false).unwrap();
        writer.close().unwrap();

        assert!(matches!(FrameReader::open(&path, true), Err(Error::Empty)));
    }

    #[test]
    fn test_read_after_close_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("closed.lsr");
        record(&path, &[0, 1], true);

        let mut reader = FrameReader::open(&path, true).unwrap();
        assert_eq!(reader.next_frame().unwrap().id, 0);
        reader.close();
        assert!(matches!(reader.next_frame(), Err(Error::Closed)));
    }

    #[test]
    fn test_truncated_tail_freezes_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("truncated.lsr");
        record(&path, &[0, 1, 2], false);

        // Lop off the tail of the last record, as a killed capture would.
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 5]).unwrap();

        let mut reader = FrameReader::open(&path, false).unwrap();
        assert_eq!(reader.next_frame().unwrap().id, 0);
        assert_eq!(reader.next_frame().unwrap().id, 1);
        // The truncated third record reads as end of stream.
        assert_eq!(reader.next_frame().unwrap().id, 1);
    }
}
