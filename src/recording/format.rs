//! Binary stream format for frame recordings.

use std::io::{self, Read, Write};

use log::warn;

use super::Error;
use crate::schema::Frame;

/// Magic bytes opening every recording stream (inside the gzip envelope,
/// if one is used).
pub const RECORDING_MAGIC: &[u8; 4] = b"LSFR";

/// Current stream format version.
pub const RECORDING_VERSION: u8 = 1;

/// Upper bound on a single record's payload, as a corruption guard.
///
/// A frame with dozens of hands and gestures encodes to a few kilobytes;
/// a length anywhere near this limit is a mangled prefix, not real data.
pub const MAX_RECORD_BYTES: u32 = 16 * 1024 * 1024;

/// Write the stream header: magic bytes plus format version.
pub fn write_stream_header<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(RECORDING_MAGIC)?;
    w.write_all(&[RECORDING_VERSION])?;
    Ok(())
}

/// Read and validate the stream header.
pub fn read_stream_header<R: Read>(r: &mut R) -> Result<(), Error> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)
        .map_err(|_| Error::Format("missing stream header".into()))?;
    if &magic != RECORDING_MAGIC {
        return Err(Error::Format("bad magic bytes".into()));
    }

    let mut version = [0u8; 1];
    r.read_exact(&mut version)
        .map_err(|_| Error::Format("missing format version".into()))?;
    if version[0] != RECORDING_VERSION {
        return Err(Error::Format(format!(
            "unsupported format version {}",
            version[0]
        )));
    }
    Ok(())
}

/// Append one frame record: a `u32` little-endian payload length followed
/// by the bincode-encoded frame.
pub fn write_record<W: Write>(w: &mut W, frame: &Frame) -> Result<(), Error> {
    let payload =
        bincode::serialize(frame).map_err(|err| Error::Decode(format!("encode failed: {err}")))?;
    w.write_all(&(payload.len() as u32).to_le_bytes())?;
    w.write_all(&payload)?;
    Ok(())
}

/// Read the next frame record, or `Ok(None)` on end of stream.
///
/// A stream truncated mid-record also counts as end of stream: records are
/// appended until shutdown, so a partial tail is how a capture session
/// that was killed ends, not a reason to fail the whole replay. Corruption
/// that is not at the tail (an implausible length prefix, an undecodable
/// payload) surfaces as [`Error::Decode`].
pub fn read_record<R: Read>(r: &mut R) -> Result<Option<Frame>, Error> {
    let mut len_bytes = [0u8; 4];
    match read_fully(r, &mut len_bytes)? {
        ReadStatus::Complete => {}
        ReadStatus::Eof => return Ok(None),
        ReadStatus::Truncated => {
            warn!("recording ends with a truncated length prefix");
            return Ok(None);
        }
    }

    let len = u32::from_le_bytes(len_bytes);
    if len > MAX_RECORD_BYTES {
        return Err(Error::Decode(format!(
            "record length {len} exceeds {MAX_RECORD_BYTES} byte limit"
        )));
    }

    let mut payload = vec![0u8; len as usize];
    match read_fully(r, &mut payload)? {
        ReadStatus::Complete => {}
        ReadStatus::Eof | ReadStatus::Truncated => {
            warn!("recording ends with a truncated record");
            return Ok(None);
        }
    }

    let frame = bincode::deserialize(&payload).map_err(|err| Error::Decode(err.to_string()))?;
    Ok(Some(frame))
}

enum ReadStatus {
    Complete,
    Eof,
    Truncated,
}

/// Fill `buf` completely, distinguishing a clean end of stream (no bytes
/// at all) from a truncated one (some bytes, then end of stream).
fn read_fully<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<ReadStatus> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => {
                return Ok(if filled == 0 {
                    ReadStatus::Eof
                } else {
                    ReadStatus::Truncated
                });
            }
            Ok(n) => filled += n,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            // A gzip layer reports a truncated deflate stream this way.
            Err(ref err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(ReadStatus::Truncated);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(ReadStatus::Complete)
}
