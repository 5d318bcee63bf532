// Temporary spill buffers.
//
// The reader must see the whole map before the first body line, and the
// writer must hold both map and body until close; either side may be
// arbitrarily large. A spill keeps lines in memory up to a byte
// threshold, then migrates to an anonymous temporary file. The file is
// unlinked on creation, so the resource is reclaimed on every exit path,
// including error unwinding.
//
// Life cycle: fill with `push_line`, then `rewind` once into a
// `SpillReader` and drain sequentially.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};

use weft_core::error::WeftError;

/// Bytes buffered in memory before migrating to disk.
const SPILL_THRESHOLD: usize = 1 << 20;

enum Backing {
    Memory(Vec<u8>),
    Disk(BufWriter<File>),
}

/// Fill-phase spill buffer.
pub struct Spill {
    backing: Backing,
    lines: usize,
}

impl Spill {
    pub fn new() -> Self {
        Self {
            backing: Backing::Memory(Vec::new()),
            lines: 0,
        }
    }

    /// Number of lines pushed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn push_line(&mut self, line: &str) -> Result<(), WeftError> {
        self.lines += 1;
        if let Backing::Memory(buf) = &mut self.backing {
            if buf.len() + line.len() + 1 > SPILL_THRESHOLD {
                let mut file = BufWriter::new(tempfile::tempfile()?);
                file.write_all(buf)?;
                self.backing = Backing::Disk(file);
            }
        }
        match &mut self.backing {
            Backing::Memory(buf) => {
                buf.extend_from_slice(line.as_bytes());
                buf.push(b'\n');
                Ok(())
            }
            Backing::Disk(file) => {
                file.write_all(line.as_bytes())?;
                file.write_all(b"\n")?;
                Ok(())
            }
        }
    }

    /// Seal the buffer and rewind to the start for draining.
    pub fn rewind(self) -> Result<SpillReader, WeftError> {
        match self.backing {
            Backing::Memory(buf) => Ok(SpillReader {
                source: Source::Memory { buf, pos: 0 },
            }),
            Backing::Disk(writer) => {
                let mut file = writer
                    .into_inner()
                    .map_err(|e| WeftError::Io(e.into_error()))?;
                file.seek(SeekFrom::Start(0))?;
                Ok(SpillReader {
                    source: Source::Disk(BufReader::new(file)),
                })
            }
        }
    }
}

impl Default for Spill {
    fn default() -> Self {
        Self::new()
    }
}

enum Source {
    Memory { buf: Vec<u8>, pos: usize },
    Disk(BufReader<File>),
}

/// Drain-phase view of a spill.
pub struct SpillReader {
    source: Source,
}

impl SpillReader {
    pub fn next_line(&mut self) -> Result<Option<String>, WeftError> {
        let bytes = match &mut self.source {
            Source::Memory { buf, pos } => {
                if *pos >= buf.len() {
                    return Ok(None);
                }
                let rest = &buf[*pos..];
                let end = rest
                    .iter()
                    .position(|&b| b == b'\n')
                    .unwrap_or(rest.len());
                let line = rest[..end].to_vec();
                *pos += end + 1;
                line
            }
            Source::Disk(reader) => {
                let mut line = Vec::new();
                let n = reader.read_until(b'\n', &mut line)?;
                if n == 0 {
                    return Ok(None);
                }
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                line
            }
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| WeftError::Encoding("spill corrupted".to_string()))
    }
}
