// Map records and their line codec.
//
// Record grammar: one of `+` (NL), `.` (W), `$` (EOF), then
// `digits+ ',' digits+`, then optional trailing SP/HT. Integers carry no
// sign and may have leading zeros. The EOF record requires both fields
// to be zero.

use weft_core::error::WeftError;

/// One map record.
///
/// `Nl` opens a body line, `W` continues it, `Eof` closes the whole map.
/// Within a line, the final record has `read == 0`; every earlier record
/// has `read > 0`. `skip` may be zero anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapRecord {
    Nl { skip: usize, read: usize },
    W { skip: usize, read: usize },
    Eof,
}

impl MapRecord {
    /// Parse one map record line (without its terminator).
    pub fn parse(line: &str) -> Result<MapRecord, WeftError> {
        let mut chars = line.chars();
        let op = chars
            .next()
            .ok_or_else(|| WeftError::MapSyntax("empty record line".to_string()))?;
        let rest = chars.as_str();
        let (first, rest) = take_integer(rest, line)?;
        let rest = rest
            .strip_prefix(',')
            .ok_or_else(|| WeftError::MapSyntax(format!("missing ',' in {line:?}")))?;
        let (second, rest) = take_integer(rest, line)?;
        if !rest.chars().all(|c| c == ' ' || c == '\t') {
            return Err(WeftError::MapSyntax(format!(
                "trailing garbage in {line:?}"
            )));
        }
        match op {
            '+' => Ok(MapRecord::Nl {
                skip: first,
                read: second,
            }),
            '.' => Ok(MapRecord::W {
                skip: first,
                read: second,
            }),
            '$' => {
                if first != 0 || second != 0 {
                    return Err(WeftError::MapSyntax(format!(
                        "EOF record with non-zero fields: {line:?}"
                    )));
                }
                Ok(MapRecord::Eof)
            }
            _ => Err(WeftError::MapSyntax(format!(
                "unknown record op {op:?}"
            ))),
        }
    }

    /// Canonical line form (no trailing padding).
    pub fn emit(&self) -> String {
        match *self {
            MapRecord::Nl { skip, read } => format!("+{skip},{read}"),
            MapRecord::W { skip, read } => format!(".{skip},{read}"),
            MapRecord::Eof => "$0,0".to_string(),
        }
    }

    /// Skip/read fields of a line record; `None` for EOF.
    pub fn fields(&self) -> Option<(usize, usize)> {
        match *self {
            MapRecord::Nl { skip, read } | MapRecord::W { skip, read } => Some((skip, read)),
            MapRecord::Eof => None,
        }
    }
}

/// Consume a run of ASCII digits (no sign, leading zeros allowed) and
/// parse it; returns the value and the remaining text.
fn take_integer<'a>(text: &'a str, line: &str) -> Result<(usize, &'a str), WeftError> {
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if digits == 0 {
        return Err(WeftError::MapSyntax(format!("missing integer in {line:?}")));
    }
    let value = text[..digits]
        .parse::<usize>()
        .map_err(|_| WeftError::MapSyntax(format!("integer out of range in {line:?}")))?;
    Ok((value, &text[digits..]))
}

/// The record sequence the writer emits for one line tuple
/// `S0, W1, S1, ..., WN, SN`: an `Nl` for the first (skip, read) pair,
/// `W` records for the rest, and a terminating record with `read == 0`.
pub fn records_for_tuple(tuple: &[String]) -> Vec<MapRecord> {
    let words = tuple.len() / 2;
    let len = |s: &String| s.chars().count();
    let mut records = Vec::with_capacity(words + 1);
    if words == 0 {
        records.push(MapRecord::Nl {
            skip: len(&tuple[0]),
            read: 0,
        });
        return records;
    }
    for k in 0..words {
        let skip = len(&tuple[2 * k]);
        let read = len(&tuple[2 * k + 1]);
        records.push(if k == 0 {
            MapRecord::Nl { skip, read }
        } else {
            MapRecord::W { skip, read }
        });
    }
    records.push(MapRecord::W {
        skip: len(&tuple[2 * words]),
        read: 0,
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_records() {
        assert_eq!(
            MapRecord::parse("+0,3").unwrap(),
            MapRecord::Nl { skip: 0, read: 3 }
        );
        assert_eq!(
            MapRecord::parse(".1,5").unwrap(),
            MapRecord::W { skip: 1, read: 5 }
        );
        assert_eq!(MapRecord::parse("$0,0").unwrap(), MapRecord::Eof);
    }

    #[test]
    fn trailing_blanks_allowed() {
        assert_eq!(
            MapRecord::parse("+2,4 \t ").unwrap(),
            MapRecord::Nl { skip: 2, read: 4 }
        );
    }

    #[test]
    fn leading_zeros_allowed() {
        assert_eq!(
            MapRecord::parse(".007,00").unwrap(),
            MapRecord::W { skip: 7, read: 0 }
        );
        assert_eq!(MapRecord::parse("$00,000").unwrap(), MapRecord::Eof);
    }

    #[test]
    fn eof_fields_must_be_zero() {
        assert!(matches!(
            MapRecord::parse("$0,1"),
            Err(WeftError::MapSyntax(_))
        ));
        assert!(matches!(
            MapRecord::parse("$1,0"),
            Err(WeftError::MapSyntax(_))
        ));
    }

    #[test]
    fn malformed_records_rejected() {
        for bad in ["", "x1,2", "+1", "+1,", "+,2", "+1;2", "+1,2x", "+ 1,2", "++1,2", "+-1,2", "+1,2 x"] {
            assert!(
                matches!(MapRecord::parse(bad), Err(WeftError::MapSyntax(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn huge_integer_rejected() {
        assert!(matches!(
            MapRecord::parse("+99999999999999999999999999,0"),
            Err(WeftError::MapSyntax(_))
        ));
    }

    #[test]
    fn emit_round_trips() {
        for rec in [
            MapRecord::Nl { skip: 0, read: 3 },
            MapRecord::W { skip: 10, read: 0 },
            MapRecord::Eof,
        ] {
            assert_eq!(MapRecord::parse(&rec.emit()).unwrap(), rec);
        }
    }

    #[test]
    fn records_for_wordless_tuple() {
        let tuple = vec!["   ".to_string()];
        assert_eq!(
            records_for_tuple(&tuple),
            vec![MapRecord::Nl { skip: 3, read: 0 }]
        );
    }

    #[test]
    fn records_for_word_tuple() {
        // "The quick brown fox" split on single spaces.
        let tuple: Vec<String> = ["", "The", " ", "quick", " ", "brown", " ", "fox", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            records_for_tuple(&tuple),
            vec![
                MapRecord::Nl { skip: 0, read: 3 },
                MapRecord::W { skip: 1, read: 5 },
                MapRecord::W { skip: 1, read: 5 },
                MapRecord::W { skip: 1, read: 3 },
                MapRecord::W { skip: 0, read: 0 },
            ]
        );
    }

    #[test]
    fn record_lengths_count_codepoints() {
        let tuple: Vec<String> = ["\u{00A0}", "\u{00E4}\u{1F600}", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            records_for_tuple(&tuple),
            vec![
                MapRecord::Nl { skip: 1, read: 2 },
                MapRecord::W { skip: 0, read: 0 },
            ]
        );
    }
}
