// Word-list files.
//
// One word per line; grave accents mark hyphen points. A grave may not
// be the first or last character and two graves may not be adjacent.
// Entries are trimmed of SP/HT and NFC-normalized before use. The same
// format serves as the specialized-list input (`-special`) and the
// sorted export (`-list`).

use std::io::{BufRead, Write};

use hashbrown::HashMap;
use icu_collator::{Collator, CollatorOptions};
use icu_normalizer::ComposingNormalizer;

use weft_core::charclass::{GRAVE_ACCENT, SOFT_HYPHEN};
use weft_core::error::WeftError;
use weft_core::lines::{LineReader, LineWriter};

/// Parse a specialized word list.
///
/// Keys are the NFC entries without graves; values are the same
/// codepoints with each grave replaced by a soft hyphen. Repeated
/// entries must agree.
pub fn load<R: BufRead>(input: R) -> Result<HashMap<String, String>, WeftError> {
    let nfc = ComposingNormalizer::new_nfc();
    let mut list = HashMap::new();
    let mut lines = LineReader::new(input);
    while let Some(line) = lines.next_line()? {
        let entry = line.trim_matches(|c| c == ' ' || c == '\t');
        if entry.is_empty() {
            continue;
        }
        let entry = nfc.normalize(entry);
        validate_graves(&entry)?;
        let key: String = entry.chars().filter(|&c| c != GRAVE_ACCENT).collect();
        let value: String = entry
            .chars()
            .map(|c| if c == GRAVE_ACCENT { SOFT_HYPHEN } else { c })
            .collect();
        if let Some(previous) = list.get(&key) {
            if *previous != value {
                return Err(WeftError::WordSyntax(format!(
                    "conflicting word-list entries for {key:?}"
                )));
            }
            continue;
        }
        list.insert(key, value);
    }
    Ok(list)
}

fn validate_graves(entry: &str) -> Result<(), WeftError> {
    let chars: Vec<char> = entry.chars().collect();
    let first_or_last =
        chars[0] == GRAVE_ACCENT || chars[chars.len() - 1] == GRAVE_ACCENT;
    let adjacent = chars
        .windows(2)
        .any(|pair| pair[0] == GRAVE_ACCENT && pair[1] == GRAVE_ACCENT);
    if first_or_last || adjacent {
        return Err(WeftError::WordSyntax(format!(
            "misplaced grave accent in word-list entry {entry:?}"
        )));
    }
    Ok(())
}

/// Write the hyphen cache as a sorted word list.
///
/// Each cache value is rendered with soft hyphens turned back into
/// graves. Entries are ordered by descending codepoint length (hyphen
/// marks not counted), then by the Unicode Collation Algorithm over the
/// bare key.
pub fn export<W: Write>(cache: &HashMap<String, String>, output: W) -> Result<(), WeftError> {
    let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
        .expect("collation data is compiled in");

    let mut entries: Vec<(&String, &String)> = cache.iter().collect();
    entries.sort_by(|(key_a, _), (key_b, _)| {
        let len_a = key_a.chars().count();
        let len_b = key_b.chars().count();
        len_b
            .cmp(&len_a)
            .then_with(|| collator.compare(key_a, key_b))
    });

    let mut out = LineWriter::new(output);
    for (_, value) in entries {
        let rendered: String = value
            .chars()
            .map(|c| if c == SOFT_HYPHEN { GRAVE_ACCENT } else { c })
            .collect();
        out.write_line(&rendered)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_basic_list() {
        let list = load(&b"hy`phen\nfox\n"[..]).unwrap();
        assert_eq!(list.get("hyphen").unwrap(), "hy\u{00AD}phen");
        assert_eq!(list.get("fox").unwrap(), "fox");
    }

    #[test]
    fn load_trims_and_skips_blank_lines() {
        let list = load(&b"  a`b \t\n\n\t\n"[..]).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("ab").unwrap(), "a\u{00AD}b");
    }

    #[test]
    fn load_normalizes_nfc() {
        // "e" + combining acute composes to é.
        let input = "e\u{0301}tude\n".as_bytes();
        let list = load(input).unwrap();
        assert_eq!(list.get("\u{00E9}tude").unwrap(), "\u{00E9}tude");
    }

    #[test]
    fn load_rejects_misplaced_graves() {
        for bad in &["`ab\n", "ab`\n", "a``b\n"] {
            assert!(
                matches!(load(bad.as_bytes()), Err(WeftError::WordSyntax(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn duplicate_entries_must_agree() {
        assert!(load(&b"a`b\na`b\n"[..]).is_ok());
        assert!(matches!(
            load(&b"a`b\nab\n"[..]),
            Err(WeftError::WordSyntax(_))
        ));
    }

    #[test]
    fn export_renders_and_sorts() {
        let mut cache = HashMap::new();
        cache.insert(
            "hyphenation".to_string(),
            "hy\u{00AD}phen\u{00AD}a\u{00AD}tion".to_string(),
        );
        cache.insert("fox".to_string(), "fox".to_string());
        cache.insert("box".to_string(), "box".to_string());
        let mut out = Vec::new();
        export(&cache, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // Longest first; equal lengths in collation order.
        assert_eq!(text, "hy`phen`a`tion\nbox\nfox\n");
    }

    #[test]
    fn export_length_ignores_hyphen_marks() {
        // "ab" with a hyphen point is still shorter than "abc".
        let mut cache = HashMap::new();
        cache.insert("ab".to_string(), "a\u{00AD}b".to_string());
        cache.insert("abc".to_string(), "abc".to_string());
        let mut out = Vec::new();
        export(&cache, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "abc\na`b\n");
    }
}
