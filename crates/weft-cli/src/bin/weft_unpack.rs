// weft-unpack: reconstruct the original body of a WEFT.
//
// Usage: weft-unpack [-map PATH]
//
// With -map, the embedded map is also written to PATH in canonical
// record form.

use std::fs::File;
use std::io::{self, BufWriter};

use weft_core::error::WeftError;
use weft_tools::unpack;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    weft_cli::exit_on_error(run(args));
}

fn run(mut args: Vec<String>) -> Result<(), WeftError> {
    let map_path = weft_cli::take_flag_value(&mut args, "-map")?;
    weft_cli::reject_remaining(&args)?;
    let map_out = match map_path {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    unpack::unpack(stdin.lock(), BufWriter::new(stdout.lock()), map_out)
}
