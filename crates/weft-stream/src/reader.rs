// WEFT reader.
//
// `accept` consumes the entire input stream: signature, declaration,
// then the declared number of map lines and body lines, each buffered
// in its own spill (map before body in the stream, so the map spill is
// filled, rewound, and drained in lock-step with the body). Bytes after
// the last body line are ignored.
//
// `read_line` yields one tuple per body line, validating as it goes:
// record-type order, the codepoint accounting between map and body, and
// -- on the last line -- the terminating EOF record.

use std::io::BufRead;

use weft_core::error::WeftError;
use weft_core::lines::LineReader;

use crate::format;
use crate::record::MapRecord;
use crate::spill::{Spill, SpillReader};

pub struct WeftReader {
    map: SpillReader,
    body: SpillReader,
    line_count: usize,
    lines_read: usize,
}

impl WeftReader {
    /// Consume the whole input stream and validate its framing.
    pub fn accept<R: BufRead>(input: R) -> Result<Self, WeftError> {
        let mut lines = LineReader::verbatim(input);
        let signature = lines
            .next_terminated_line()?
            .ok_or_else(|| WeftError::WeftSignature("empty input".to_string()))?;
        format::parse_signature(&signature)?;
        let declaration = lines
            .next_terminated_line()?
            .ok_or_else(|| WeftError::Truncated("missing declaration".to_string()))?;
        let (map_lines, body_lines) = format::parse_declaration(&declaration)?;
        if body_lines == 0 {
            return Err(WeftError::WeftHeader(
                "body must have at least one line".to_string(),
            ));
        }

        let mut map = Spill::new();
        for index in 0..map_lines {
            let line = lines.next_terminated_line()?.ok_or_else(|| {
                WeftError::Truncated(format!("map ends after {index} of {map_lines} lines"))
            })?;
            map.push_line(&line)?;
        }
        let mut body = Spill::new();
        for index in 0..body_lines {
            let line = lines.next_terminated_line()?.ok_or_else(|| {
                WeftError::Truncated(format!("body ends after {index} of {body_lines} lines"))
            })?;
            body.push_line(&line)?;
        }

        Ok(Self {
            map: map.rewind()?,
            body: body.rewind()?,
            line_count: body_lines,
            lines_read: 0,
        })
    }

    /// Number of body lines; `read_line` may be called exactly this often.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Yield the tuple `S0, W1, S1, ..., WN, SN` for the next body line.
    pub fn read_line(&mut self) -> Result<Vec<String>, WeftError> {
        if self.lines_read >= self.line_count {
            return Err(WeftError::Truncated(
                "read past the last body line".to_string(),
            ));
        }
        let body_line = self.body.next_line()?.ok_or_else(|| {
            WeftError::Truncated("body spill exhausted early".to_string())
        })?;

        // Gather this line's records: NL, then W*, ending at read == 0.
        let mut fields = Vec::new();
        loop {
            let record = self.next_record()?;
            let first = fields.is_empty();
            let (skip, read) = match record {
                MapRecord::Nl { skip, read } if first => (skip, read),
                MapRecord::W { skip, read } if !first => (skip, read),
                MapRecord::Eof => {
                    return Err(WeftError::Truncated(
                        "map ended before the last body line".to_string(),
                    ))
                }
                MapRecord::Nl { .. } => {
                    return Err(WeftError::MapMismatch(
                        "NL record in the middle of a line".to_string(),
                    ))
                }
                MapRecord::W { .. } => {
                    return Err(WeftError::MapMismatch(
                        "line starts with a W record".to_string(),
                    ))
                }
            };
            fields.push((skip, read));
            if read == 0 {
                break;
            }
        }

        let chars: Vec<char> = body_line.chars().collect();
        let declared: usize = fields.iter().map(|&(s, r)| s + r).sum();
        if declared != chars.len() {
            return Err(WeftError::MapMismatch(format!(
                "map declares {declared} codepoints, body line has {}",
                chars.len()
            )));
        }

        let mut tuple = Vec::with_capacity(fields.len() * 2 - 1);
        let mut pos = 0;
        for &(skip, read) in &fields {
            tuple.push(chars[pos..pos + skip].iter().collect::<String>());
            pos += skip;
            if read > 0 {
                tuple.push(chars[pos..pos + read].iter().collect::<String>());
                pos += read;
            }
        }

        self.lines_read += 1;
        if self.lines_read == self.line_count {
            self.finish()?;
        }
        Ok(tuple)
    }

    fn next_record(&mut self) -> Result<MapRecord, WeftError> {
        let line = self
            .map
            .next_line()?
            .ok_or_else(|| WeftError::Truncated("map records exhausted".to_string()))?;
        MapRecord::parse(&line)
    }

    /// After the last body line: exactly one EOF record and nothing else.
    fn finish(&mut self) -> Result<(), WeftError> {
        match self.next_record()? {
            MapRecord::Eof => {}
            _ => {
                return Err(WeftError::MapMismatch(
                    "map continues past the last body line".to_string(),
                ))
            }
        }
        if self.map.next_line()?.is_some() {
            return Err(WeftError::MapMismatch(
                "map records after the EOF record".to_string(),
            ));
        }
        Ok(())
    }
}
