// Targets: unpack and JSON diagnostic.
//
// Unpack reconstructs the original body: tuples are concatenated per
// line and lines are joined with LF. A source that saw a terminated
// input produced a final empty body line, so the reconstruction ends
// with LF exactly when the original did. Optionally the embedded map is
// re-emitted, in canonical record form, to a separate file.
//
// The JSON target renders the parsed lines as an array of arrays of
// strings for diagnostics. Its escaping is pinned by the format:
// dedicated escapes where JSON defines them, `\uXXXX` for the other
// control codes and DEL, and surrogate pairs for supplementary
// codepoints -- which is why this is not delegated to a JSON library.

use std::io::{BufRead, Write};

use weft_core::error::WeftError;
use weft_core::lines::LineWriter;
use weft_stream::record::{records_for_tuple, MapRecord};
use weft_stream::WeftReader;

/// Unpack a WEFT back to its body. With `map_out`, also write the map
/// records.
pub fn unpack<R: BufRead, W: Write, M: Write>(
    input: R,
    output: W,
    mut map_out: Option<M>,
) -> Result<(), WeftError> {
    let mut reader = WeftReader::accept(input)?;
    let mut out = LineWriter::new(output);
    for index in 0..reader.line_count() {
        let tuple = reader.read_line()?;
        if index > 0 {
            out.write_str("\n")?;
        }
        out.write_str(&tuple.concat())?;
        if let Some(map) = map_out.as_mut() {
            let mut map = LineWriter::new(map);
            for record in records_for_tuple(&tuple) {
                map.write_line(&record.emit())?;
            }
        }
    }
    if let Some(map) = map_out.as_mut() {
        let mut map = LineWriter::new(map);
        map.write_line(&MapRecord::Eof.emit())?;
        map.flush()?;
    }
    out.flush()
}

/// Emit the parsed lines as a JSON array of arrays of strings.
pub fn emit_json<R: BufRead, W: Write>(input: R, output: W) -> Result<(), WeftError> {
    let mut reader = WeftReader::accept(input)?;
    let mut out = LineWriter::new(output);
    out.write_str("[")?;
    for index in 0..reader.line_count() {
        let tuple = reader.read_line()?;
        out.write_str(if index > 0 { ",\n" } else { "\n" })?;
        let mut line = String::from("[");
        for (element_index, element) in tuple.iter().enumerate() {
            if element_index > 0 {
                line.push(',');
            }
            escape_json_string(element, &mut line);
        }
        line.push(']');
        out.write_str(&line)?;
    }
    out.write_str("\n]\n")?;
    out.flush()
}

/// Append `text` to `out` as a quoted JSON string.
fn escape_json_string(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c if (c as u32) > 0xFFFF => {
                let v = c as u32 - 0x10000;
                let high = 0xD800 + (v >> 10);
                let low = 0xDC00 + (v & 0x3FF);
                out.push_str(&format!("\\u{high:04X}\\u{low:04X}"));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
