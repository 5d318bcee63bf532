// weft-markup: package XML/HTML from stdin as a WEFT on stdout.
//
// Usage: weft-markup [-begin STATE]
//
// STATE is one of the eleven tokenizer locations (default `char`), so
// fragments can be processed starting mid-markup.

use std::io::{self, BufWriter};

use weft_core::error::WeftError;
use weft_tools::markup::{self, Location};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    weft_cli::exit_on_error(run(args));
}

fn run(mut args: Vec<String>) -> Result<(), WeftError> {
    let begin = match weft_cli::take_flag_value(&mut args, "-begin")? {
        Some(name) => Location::parse(&name).ok_or_else(|| {
            WeftError::Arg(format!(
                "unknown state {name:?} (expected one of: {})",
                Location::NAMES.join(", ")
            ))
        })?,
        None => Location::Char,
    };
    weft_cli::reject_remaining(&args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    markup::package(stdin.lock(), BufWriter::new(stdout.lock()), begin)
}
