//! Binary core stream.
//!
//! A well-formed archive is `(false ‖ lps-blob)* ‖ true`. The `is_done`
//! flag is fixed at 8 bits — never widened — which is why
//! `ArchiveWriter`/`ArchiveReader` hide the flag behind `save`/`done`/
//! `read_next` rather than exposing the byte directly.

use std::io::{Read, Write};

use crate::error::GenomeError;
use crate::lcp::LcpParse;

const CONTINUE: u8 = 0;
const DONE: u8 = 1;

/// Writes a core archive: zero or more `save` calls followed by exactly
/// one `done` call.
pub struct ArchiveWriter<W: Write> {
    sink: W,
}

impl<W: Write> ArchiveWriter<W> {
    pub fn new(sink: W) -> Self {
        ArchiveWriter { sink }
    }

    /// Write one non-terminator record.
    pub fn save<P: LcpParse>(&mut self, lps: &P) -> std::io::Result<()> {
        self.sink.write_all(&[CONTINUE])?;
        lps.write(&mut self.sink)
    }

    /// Write the terminator record. Must be called exactly once, after
    /// all `save` calls, to mark the archive complete.
    pub fn done(&mut self) -> std::io::Result<()> {
        self.sink.write_all(&[DONE])
    }
}

/// Reads a core archive written by [`ArchiveWriter`].
pub struct ArchiveReader<R: Read> {
    source: R,
    path: String,
    finished: bool,
}

impl<R: Read> ArchiveReader<R> {
    pub fn new(source: R, path: impl Into<String>) -> Self {
        ArchiveReader {
            source,
            path: path.into(),
            finished: false,
        }
    }

    /// Read the next record. Returns `Ok(None)` once the terminator has
    /// been consumed; further calls after that always return `Ok(None)`.
    /// Returns [`GenomeError::MissingTerminator`] if EOF is reached before
    /// a terminator record.
    pub fn read_next<P: LcpParse>(&mut self) -> Result<Option<P>, GenomeError> {
        if self.finished {
            return Ok(None);
        }

        let mut flag = [0u8; 1];
        match self.source.read_exact(&mut flag) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(GenomeError::MissingTerminator {
                    path: self.path.clone(),
                });
            }
            Err(e) => {
                return Err(GenomeError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        }

        if flag[0] == DONE {
            self.finished = true;
            return Ok(None);
        }

        let lps = P::read(&mut self.source).map_err(|e| GenomeError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(lps))
    }

    /// Whether the terminator record has been consumed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
