// weft-woof: apply a Woof escape table to the content words of a WEFT.
//
// Usage: weft-woof -table PATH

use std::io::{self, BufWriter};

use weft_core::error::WeftError;
use weft_tools::pipeline::filter_words;
use weft_tools::woof::WoofTable;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    weft_cli::exit_on_error(run(args));
}

fn run(mut args: Vec<String>) -> Result<(), WeftError> {
    let path = weft_cli::take_flag_value(&mut args, "-table")?
        .ok_or_else(|| WeftError::Arg("-table is required".to_string()))?;
    weft_cli::reject_remaining(&args)?;

    let bytes = weft_cli::read_table_file(&path)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| WeftError::WoofSyntax("table is not US-ASCII".to_string()))?;
    let table = WoofTable::parse(&text)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    filter_words(stdin.lock(), BufWriter::new(stdout.lock()), |word| {
        table.translate_word(word)
    })
}
