// weft-plain: package plain text from stdin as a WEFT on stdout.
// Content words are the maximal non-whitespace runs.

use std::io::{self, BufWriter};

use weft_core::error::WeftError;
use weft_tools::plain;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    weft_cli::exit_on_error(run(args));
}

fn run(args: Vec<String>) -> Result<(), WeftError> {
    weft_cli::reject_remaining(&args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    plain::package(stdin.lock(), BufWriter::new(stdout.lock()))
}
