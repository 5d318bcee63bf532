// WEFT writer.
//
// Accepts one line tuple per body line and emits the complete container
// on close: signature, declaration, all map records, the EOF record,
// then all body lines. Map and body are buffered in spills until close;
// the full map always precedes the full body in the output.

use std::io::Write;

use weft_core::error::WeftError;
use weft_core::lines::LineWriter;

use crate::format;
use crate::record::{records_for_tuple, MapRecord};
use crate::spill::Spill;

pub struct WeftWriter<W: Write> {
    out: LineWriter<W>,
    map: Spill,
    body: Spill,
    body_lines: usize,
}

impl<W: Write> WeftWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: LineWriter::new(out),
            map: Spill::new(),
            body: Spill::new(),
            body_lines: 0,
        }
    }

    /// Buffer one body line given as its tuple `S0, W1, S1, ..., WN, SN`.
    ///
    /// The tuple must have odd length; words (odd indices) must be
    /// non-empty; no element may contain CR or LF.
    pub fn write_line(&mut self, tuple: &[String]) -> Result<(), WeftError> {
        if tuple.len() % 2 == 0 {
            return Err(WeftError::MapMismatch(format!(
                "tuple has even length {}",
                tuple.len()
            )));
        }
        for (index, element) in tuple.iter().enumerate() {
            if index % 2 == 1 && element.is_empty() {
                return Err(WeftError::MapMismatch(format!(
                    "empty content word at tuple index {index}"
                )));
            }
            if element.contains('\n') || element.contains('\r') {
                return Err(WeftError::Encoding(
                    "line break inside tuple element".to_string(),
                ));
            }
        }
        for record in records_for_tuple(tuple) {
            self.map.push_line(&record.emit())?;
        }
        self.body.push_line(&tuple.concat())?;
        self.body_lines += 1;
        Ok(())
    }

    /// Emit the buffered container and flush.
    pub fn close(mut self) -> Result<(), WeftError> {
        self.out.write_line(format::SIGNATURE)?;
        let map_lines = self.map.lines() + 1; // + EOF record line
        self.out
            .write_line(&format::emit_declaration(map_lines, self.body_lines))?;
        let mut map = self.map.rewind()?;
        while let Some(line) = map.next_line()? {
            self.out.write_line(&line)?;
        }
        self.out.write_line(&MapRecord::Eof.emit())?;
        let mut body = self.body.rewind()?;
        while let Some(line) = body.next_line()? {
            self.out.write_line(&line)?;
        }
        self.out.flush()
    }
}
