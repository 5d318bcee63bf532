// Codepoint line I/O.
//
// Input is a UTF-8 byte stream split on LF or CRLF. A CR not immediately
// followed by LF is an error. Character counts everywhere in the pipeline
// are codepoints, so lines are handed out as `String`s and sliced by
// `char` position, never by byte offset.

use std::io::{BufRead, Write};

use crate::error::WeftError;

/// Streaming line reader over a UTF-8 byte source.
///
/// Two reading disciplines are offered:
///
/// - [`next_line`](LineReader::next_line) implements text-file semantics:
///   an empty trailing line is reported if and only if the input ends with
///   a line break (or the input is totally empty). Sources use this.
/// - [`next_terminated_line`](LineReader::next_terminated_line) implements
///   container semantics: only LF/CRLF-terminated lines are returned and a
///   trailing unterminated chunk is an error. The WEFT reader uses this,
///   which also lets it stop mid-stream and ignore trailing bytes.
pub struct LineReader<R> {
    input: R,
    strip_bom: bool,
    started: bool,
    last_terminated: bool,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Reader for text input: a single leading U+FEFF is discarded.
    pub fn new(input: R) -> Self {
        Self {
            input,
            strip_bom: true,
            started: false,
            last_terminated: true,
            done: false,
        }
    }

    /// Reader for container input: every byte is significant, no BOM
    /// handling.
    pub fn verbatim(input: R) -> Self {
        Self {
            input,
            strip_bom: false,
            started: false,
            last_terminated: true,
            done: false,
        }
    }

    /// Next line under text-file semantics.
    pub fn next_line(&mut self) -> Result<Option<String>, WeftError> {
        if self.done {
            return Ok(None);
        }
        match self.read_chunk()? {
            Some((line, terminated)) => {
                self.last_terminated = terminated;
                if !terminated {
                    self.done = true;
                }
                Ok(Some(line))
            }
            None => {
                self.done = true;
                if self.last_terminated {
                    // Input ended with a break (or was empty): one final
                    // empty line.
                    Ok(Some(String::new()))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Next line under container semantics. Unterminated trailing bytes
    /// are a `Truncated` error; end of input is `None`.
    pub fn next_terminated_line(&mut self) -> Result<Option<String>, WeftError> {
        if self.done {
            return Ok(None);
        }
        match self.read_chunk()? {
            Some((line, true)) => Ok(Some(line)),
            Some((_, false)) => Err(WeftError::Truncated(
                "line not terminated by LF".to_string(),
            )),
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }

    /// Read one raw chunk up to and including LF. Returns the decoded line
    /// without its terminator and whether a terminator was present.
    fn read_chunk(&mut self) -> Result<Option<(String, bool)>, WeftError> {
        let mut buf = Vec::new();
        let n = self.input.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let mut line = String::from_utf8(buf)
            .map_err(|_| WeftError::Encoding("invalid UTF-8 in input".to_string()))?;
        if line.contains('\r') {
            return Err(WeftError::Encoding(
                "CR not followed by LF".to_string(),
            ));
        }
        if !self.started {
            self.started = true;
            if self.strip_bom {
                if let Some(rest) = line.strip_prefix('\u{FEFF}') {
                    line = rest.to_string();
                }
            }
        }
        Ok(Some((line, terminated)))
    }
}

/// Line writer: UTF-8, no BOM, every line terminated by a lone LF.
pub struct LineWriter<W> {
    out: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), WeftError> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Write text without a terminator (used for the final unpacked line).
    pub fn write_str(&mut self, text: &str) -> Result<(), WeftError> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), WeftError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Codepoint length of a string.
pub fn cp_len(s: &str) -> usize {
    s.chars().count()
}
