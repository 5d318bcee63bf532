// Character/entity reference rewriting.
//
// Decoding is a pure function over a text span plus the location it was
// found in; it never touches the tokenizer's cursor. After decoding, the
// span is re-escaped so that the WEFT body stays safe markup: `&`, `<`,
// `>` always, plus the quote character that would close the surrounding
// attribute value.

use weft_core::charclass::valid_codep;
use weft_core::entities;
use weft_core::error::WeftError;

use super::Location;

/// Decode every `&name;` / `&#N;` / `&#xH;` reference in `text`.
///
/// Only `char`, `tag`, and the two attribute-value locations decode;
/// inside a tag (outside quotes) any raw `&` is fatal. Every resulting
/// codepoint must satisfy the output codepoint policy.
pub fn decode(text: &[char], location: Location) -> Result<String, WeftError> {
    if location == Location::Tag {
        if text.contains(&'&') {
            return Err(WeftError::AmpersandInTag);
        }
        return Ok(text.iter().collect());
    }
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        if text[i] != '&' {
            out.push(text[i]);
            i += 1;
            continue;
        }
        // &name; with name in [A-Za-z0-9#]+
        let mut j = i + 1;
        while j < text.len() && is_name_char(text[j]) {
            j += 1;
        }
        if j == i + 1 || j >= text.len() || text[j] != ';' {
            let shown: String = text[i..text.len().min(i + 12)].iter().collect();
            return Err(WeftError::EntityUnknown(format!(
                "malformed reference at {shown:?}"
            )));
        }
        let name: String = text[i + 1..j].iter().collect();
        let value = resolve(&name)?;
        for c in value.chars() {
            if !valid_codep(c as u32) {
                return Err(WeftError::EntityInvalidCodepoint(c as u32));
            }
        }
        out.push_str(&value);
        i = j + 1;
    }
    Ok(out)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '#'
}

/// Resolve one reference name (the text between `&` and `;`).
fn resolve(name: &str) -> Result<String, WeftError> {
    if let Some(number) = name.strip_prefix('#') {
        let cp = if let Some(hex) = number
            .strip_prefix('x')
            .or_else(|| number.strip_prefix('X'))
        {
            if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(WeftError::EntityUnknown(format!("&#{number};")));
            }
            u32::from_str_radix(hex, 16)
                .map_err(|_| WeftError::EntityInvalidCodepoint(u32::MAX))?
        } else {
            if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(WeftError::EntityUnknown(format!("&#{number};")));
            }
            number
                .parse::<u32>()
                .map_err(|_| WeftError::EntityInvalidCodepoint(u32::MAX))?
        };
        let c = char::from_u32(cp).ok_or(WeftError::EntityInvalidCodepoint(cp))?;
        Ok(c.to_string())
    } else {
        match entities::lookup(name)? {
            Some(value) => Ok(value.to_string()),
            None => Err(WeftError::EntityUnknown(format!("&{name};"))),
        }
    }
}

/// Re-encode the decoded text for insertion into the WEFT body.
pub fn reescape(text: &str, location: Location) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' if location == Location::TagAttSq => out.push_str("&apos;"),
            '"' if location == Location::TagAttDq => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn decode_char(s: &str) -> Result<String, WeftError> {
        decode(&chars(s), Location::Char)
    }

    #[test]
    fn literal_text_passes_through() {
        assert_eq!(decode_char("plain text").unwrap(), "plain text");
        assert_eq!(decode_char("").unwrap(), "");
    }

    #[test]
    fn named_references() {
        assert_eq!(decode_char("A &amp; B").unwrap(), "A & B");
        assert_eq!(decode_char("&AElig;ther").unwrap(), "\u{00C6}ther");
    }

    #[test]
    fn numeric_references() {
        assert_eq!(decode_char("&#65;&#x41;&#X41;").unwrap(), "AAA");
        assert_eq!(decode_char("&#x1F600;").unwrap(), "\u{1F600}");
        assert_eq!(decode_char("&#0065;").unwrap(), "A");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(matches!(
            decode_char("&Amp;"),
            Err(WeftError::EntityUnknown(_))
        ));
    }

    #[test]
    fn malformed_references_rejected() {
        for bad in ["&", "& ", "&;", "&abc", "&a b;", "&#;", "&#x;", "&#q2;"] {
            assert!(
                matches!(decode_char(bad), Err(WeftError::EntityUnknown(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn invalid_codepoints_rejected() {
        assert!(matches!(
            decode_char("&#0;"),
            Err(WeftError::EntityInvalidCodepoint(0))
        ));
        assert!(matches!(
            decode_char("&#xD800;"),
            Err(WeftError::EntityInvalidCodepoint(0xD800))
        ));
        assert!(matches!(
            decode_char("&#xFFFE;"),
            Err(WeftError::EntityInvalidCodepoint(0xFFFE))
        ));
        assert!(matches!(
            decode_char("&#x110000;"),
            Err(WeftError::EntityInvalidCodepoint(0x110000))
        ));
    }

    #[test]
    fn tag_location_forbids_ampersand() {
        assert!(matches!(
            decode(&chars("a=b&amp;c"), Location::Tag),
            Err(WeftError::AmpersandInTag)
        ));
        assert_eq!(decode(&chars("a=b c"), Location::Tag).unwrap(), "a=b c");
    }

    #[test]
    fn attribute_locations_decode() {
        assert_eq!(
            decode(&chars("x&quot;y"), Location::TagAttDq).unwrap(),
            "x\"y"
        );
        assert_eq!(
            decode(&chars("it&apos;s"), Location::TagAttSq).unwrap(),
            "it's"
        );
    }

    #[test]
    fn reescape_always_covers_amp_lt_gt() {
        assert_eq!(reescape("a&b<c>d", Location::Char), "a&amp;b&lt;c&gt;d");
        assert_eq!(reescape("a'b\"c", Location::Char), "a'b\"c");
    }

    #[test]
    fn reescape_quotes_by_location() {
        assert_eq!(reescape("a'b", Location::TagAttSq), "a&apos;b");
        assert_eq!(reescape("a\"b", Location::TagAttSq), "a\"b");
        assert_eq!(reescape("a\"b", Location::TagAttDq), "a&quot;b");
        assert_eq!(reescape("a'b", Location::TagAttDq), "a'b");
    }

    #[test]
    fn decode_then_reescape_keeps_unsafe_text_escaped() {
        let decoded = decode_char("A &amp; B").unwrap();
        assert_eq!(reescape(&decoded, Location::Char), "A &amp; B");
    }
}
