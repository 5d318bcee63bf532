// Plain-text source.
//
// Content words are maximal runs of codepoints outside {SP, HT, CR, LF};
// everything between them is skip. CR and LF never reach the splitter
// because the line reader already consumed them.

use std::io::{BufRead, Write};

use weft_core::charclass::is_blank;
use weft_core::error::WeftError;
use weft_core::lines::LineReader;
use weft_stream::WeftWriter;

/// Package a plain-text stream as a WEFT.
pub fn package<R: BufRead, W: Write>(input: R, output: W) -> Result<(), WeftError> {
    let mut lines = LineReader::new(input);
    let mut writer = WeftWriter::new(output);
    while let Some(line) = lines.next_line()? {
        writer.write_line(&split_line(&line))?;
    }
    writer.close()
}

/// Decompose one line into its `S0, W1, S1, ..., WN, SN` tuple.
pub fn split_line(line: &str) -> Vec<String> {
    let mut tuple = Vec::new();
    let mut piece = String::new();
    let mut in_word = false;
    for c in line.chars() {
        if is_blank(c) == in_word {
            tuple.push(piece);
            piece = String::new();
            in_word = !in_word;
        }
        piece.push(c);
    }
    tuple.push(piece);
    if in_word {
        tuple.push(String::new());
    }
    tuple
}
