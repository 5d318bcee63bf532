// weft-split: split mixed content words into linguistic and
// non-linguistic sub-words.

use std::io::{self, BufWriter};

use weft_core::error::WeftError;
use weft_tools::pipeline::filter_tuples;
use weft_tools::splitter;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    weft_cli::exit_on_error(run(args));
}

fn run(args: Vec<String>) -> Result<(), WeftError> {
    weft_cli::reject_remaining(&args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    filter_tuples(stdin.lock(), BufWriter::new(stdout.lock()), |tuple| {
        Ok(splitter::split_tuple(tuple))
    })
}
