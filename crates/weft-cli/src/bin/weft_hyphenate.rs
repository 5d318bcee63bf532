// weft-hyphenate: insert soft hyphens into the linguistic content words
// of a WEFT.
//
// Usage: weft-hyphenate [-load PATTERNS] [-style utf8|czech|german]
//                       [-special WORDLIST] [-list PATH]
//
// -load     TeX hyphenation pattern file
// -style    pattern file encoding (default utf8)
// -special  specialized word list consulted before the patterns
// -list     write the sorted word list of all decisions to PATH

use std::fs::File;
use std::io::{self, BufWriter};

use weft_core::error::WeftError;
use weft_tools::hyphenator::{wordlist, Hyphenator, PatternStyle, TexPatterns};
use weft_tools::pipeline::filter_words;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    weft_cli::exit_on_error(run(args));
}

fn run(mut args: Vec<String>) -> Result<(), WeftError> {
    let load = weft_cli::take_flag_value(&mut args, "-load")?;
    let style = weft_cli::take_flag_value(&mut args, "-style")?;
    let special = weft_cli::take_flag_value(&mut args, "-special")?;
    let list = weft_cli::take_flag_value(&mut args, "-list")?;
    weft_cli::reject_remaining(&args)?;

    let style = match style {
        Some(name) => PatternStyle::parse(&name).ok_or_else(|| {
            WeftError::Arg(format!(
                "unknown style {name:?} (expected utf8, czech, or german)"
            ))
        })?,
        None => PatternStyle::Utf8,
    };
    let patterns = match load {
        Some(path) => Some(TexPatterns::parse_bytes(
            &weft_cli::read_table_file(&path)?,
            style,
        )?),
        None => None,
    };
    let special = match special {
        Some(path) => Some(wordlist::load(
            &weft_cli::read_table_file(&path)?[..],
        )?),
        None => None,
    };

    let mut hyphenator = Hyphenator::new(patterns, special);
    let stdin = io::stdin();
    let stdout = io::stdout();
    filter_words(stdin.lock(), BufWriter::new(stdout.lock()), |word| {
        hyphenator.hyphenate_word(word)
    })?;

    if let Some(path) = list {
        wordlist::export(hyphenator.cache(), BufWriter::new(File::create(path)?))?;
    }
    Ok(())
}
