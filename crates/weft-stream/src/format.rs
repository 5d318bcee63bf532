// Signature and declaration lines of the container.
//
// Line 1: `%WEFT;` plus optional SP/HT padding. Byte 0 of any WEFT is
// the ASCII `%`; a BOM is not permitted. Line 2: `N,M` -- map line count
// and body line count, optional SP/HT padding.

use weft_core::error::WeftError;

/// The fixed signature, without padding or terminator.
pub const SIGNATURE: &str = "%WEFT;";

pub fn parse_signature(line: &str) -> Result<(), WeftError> {
    let rest = line.strip_prefix(SIGNATURE).ok_or_else(|| {
        WeftError::WeftSignature(format!("expected {SIGNATURE:?}, got {line:?}"))
    })?;
    if !rest.chars().all(|c| c == ' ' || c == '\t') {
        return Err(WeftError::WeftSignature(format!(
            "garbage after signature: {rest:?}"
        )));
    }
    Ok(())
}

/// Parse the declaration into `(map_line_count, body_line_count)`.
pub fn parse_declaration(line: &str) -> Result<(usize, usize), WeftError> {
    let bad = || WeftError::WeftHeader(format!("expected N,M declaration, got {line:?}"));
    let (n, rest) = take_integer(line).ok_or_else(bad)?;
    let rest = rest.strip_prefix(',').ok_or_else(bad)?;
    let (m, rest) = take_integer(rest).ok_or_else(bad)?;
    if !rest.chars().all(|c| c == ' ' || c == '\t') {
        return Err(bad());
    }
    Ok((n, m))
}

pub fn emit_declaration(map_lines: usize, body_lines: usize) -> String {
    format!("{map_lines},{body_lines}")
}

fn take_integer(text: &str) -> Option<(usize, &str)> {
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if digits == 0 {
        return None;
    }
    let value = text[..digits].parse::<usize>().ok()?;
    Some((value, &text[digits..]))
}
