// weft-json: emit a JSON array-of-arrays view of a WEFT for diagnostics.

use std::io::{self, BufWriter};

use weft_core::error::WeftError;
use weft_tools::unpack;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    weft_cli::exit_on_error(run(args));
}

fn run(args: Vec<String>) -> Result<(), WeftError> {
    weft_cli::reject_remaining(&args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    unpack::emit_json(stdin.lock(), BufWriter::new(stdout.lock()))
}
