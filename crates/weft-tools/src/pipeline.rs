// Filter drivers: read a WEFT, transform, write a WEFT.
//
// Filters come in two shapes: word filters replace each content word
// with one string of any length; tuple filters may reshape the whole
// tuple (the word splitter). Both preserve the skip runs they do not
// touch, which keeps the filter-preservation property for free.

use std::io::{BufRead, Write};

use weft_core::error::WeftError;
use weft_stream::{WeftReader, WeftWriter};

/// Run a word-for-word filter over a WEFT stream.
pub fn filter_words<R, W, F>(input: R, output: W, mut filter: F) -> Result<(), WeftError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<String, WeftError>,
{
    filter_tuples(input, output, |tuple| {
        let mut out = tuple.to_vec();
        for (index, element) in out.iter_mut().enumerate() {
            if index % 2 == 1 {
                *element = filter(element)?;
            }
        }
        Ok(out)
    })
}

/// Run a tuple-reshaping filter over a WEFT stream.
pub fn filter_tuples<R, W, F>(input: R, output: W, mut filter: F) -> Result<(), WeftError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&[String]) -> Result<Vec<String>, WeftError>,
{
    let mut reader = WeftReader::accept(input)?;
    let mut writer = WeftWriter::new(output);
    for _ in 0..reader.line_count() {
        let tuple = reader.read_line()?;
        writer.write_line(&filter(&tuple)?)?;
    }
    writer.close()
}
