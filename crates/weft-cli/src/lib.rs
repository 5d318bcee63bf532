// Shared plumbing for the WEFT binaries.
//
// Every tool is a stdin-to-stdout stream processor: flags are parsed by
// hand from the single-dash surface, diagnostics go to stderr as one
// line, and the exit code is 0 or 1. Nothing here touches stdout except
// the tools' own data.

use std::path::Path;
use std::process;

use weft_core::error::WeftError;

/// Remove `flag VALUE` from `args` and return the value.
///
/// Errors when the flag is present without a value.
pub fn take_flag_value(args: &mut Vec<String>, flag: &str) -> Result<Option<String>, WeftError> {
    match args.iter().position(|a| a == flag) {
        Some(position) => {
            if position + 1 >= args.len() {
                return Err(WeftError::Arg(format!("{flag} requires a value")));
            }
            let value = args.remove(position + 1);
            args.remove(position);
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// After all known flags are taken, anything left is an error.
pub fn reject_remaining(args: &[String]) -> Result<(), WeftError> {
    match args.first() {
        Some(unknown) => Err(WeftError::Arg(format!("unknown argument {unknown:?}"))),
        None => Ok(()),
    }
}

/// Read a table file named on the command line.
pub fn read_table_file(path: &str) -> Result<Vec<u8>, WeftError> {
    if !Path::new(path).is_file() {
        return Err(WeftError::TableMissing(path.to_string()));
    }
    Ok(std::fs::read(path)?)
}

/// Print a one-line diagnostic and exit non-zero.
pub fn fatal(error: &WeftError) -> ! {
    eprintln!("error: {error}");
    process::exit(1);
}

/// Unwrap a tool's result into its exit status.
pub fn exit_on_error(result: Result<(), WeftError>) {
    if let Err(error) = result {
        fatal(&error);
    }
}
