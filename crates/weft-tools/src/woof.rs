// Woof escape tables.
//
// A table maps escape sequences (a one-codepoint lead plus an ASCII
// key) to arbitrary codepoint sequences. Keys are stored in a prefix
// tree; insertion rejects any key that duplicates, prefixes, or is
// prefixed by an existing key, so a scan that stops at the first
// terminal node is unambiguous.
//
// Table file grammar (US-ASCII): the first meaningful line holds the
// escape lead (`H` standing in for `#`, which would read as a comment);
// every further line is `hex(,hex)*:key`. `#` opens a comment at line
// start or after whitespace. Blank lines are ignored.

use hashbrown::HashMap;

use weft_core::charclass::valid_codep;
use weft_core::error::WeftError;

#[derive(Default)]
struct Node {
    next: HashMap<char, usize>,
    value: Option<String>,
    /// The full key ending here, kept for diagnostics.
    key: Option<String>,
}

pub struct WoofTable {
    lead: char,
    nodes: Vec<Node>,
}

impl WoofTable {
    /// Parse a table file's text.
    pub fn parse(text: &str) -> Result<WoofTable, WeftError> {
        if let Some(bad) = text.chars().find(|&c| !c.is_ascii()) {
            return Err(WeftError::WoofSyntax(format!(
                "non-ASCII codepoint U+{:04X} in table",
                bad as u32
            )));
        }
        let mut lead = None;
        let mut table = WoofTable {
            lead: '\0',
            nodes: vec![Node::default()],
        };
        for raw_line in text.lines() {
            let line = strip_comment(raw_line);
            let line = line.trim_matches(|c| c == ' ' || c == '\t');
            if line.is_empty() {
                continue;
            }
            if lead.is_none() {
                lead = Some(parse_lead(line)?);
                continue;
            }
            let (value, key) = parse_record(line)?;
            table.insert(&key, value)?;
        }
        match lead {
            Some(lead) => {
                table.lead = lead;
                Ok(table)
            }
            None => Err(WeftError::WoofSyntax("empty table".to_string())),
        }
    }

    pub fn lead(&self) -> char {
        self.lead
    }

    fn insert(&mut self, key: &str, value: String) -> Result<(), WeftError> {
        let mut node = 0;
        for c in key.chars() {
            if let Some(existing) = &self.nodes[node].key {
                // An existing key ends along our path.
                return Err(WeftError::WoofAmbiguous(existing.clone(), key.to_string()));
            }
            node = match self.nodes[node].next.get(&c).copied() {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].next.insert(c, next);
                    next
                }
            };
        }
        if self.nodes[node].key.is_some() || !self.nodes[node].next.is_empty() {
            // Duplicate, or we are a prefix of an existing key.
            let existing = self.nodes[node]
                .key
                .clone()
                .unwrap_or_else(|| key.to_string());
            return Err(WeftError::WoofAmbiguous(existing, key.to_string()));
        }
        self.nodes[node].value = Some(value);
        self.nodes[node].key = Some(key.to_string());
        Ok(())
    }

    /// Replace every escape sequence in one content word.
    pub fn translate_word(&self, word: &str) -> Result<String, WeftError> {
        let chars: Vec<char> = word.chars().collect();
        let mut out = String::with_capacity(word.len());
        let mut i = 0;
        while i < chars.len() {
            if chars[i] != self.lead {
                out.push(chars[i]);
                i += 1;
                continue;
            }
            // First match over growing lengths; prefix-freedom makes it
            // the only match.
            let mut node = 0;
            let mut j = i + 1;
            let matched = loop {
                let Some(&next) = (j < chars.len())
                    .then(|| self.nodes[node].next.get(&chars[j]))
                    .flatten()
                else {
                    break None;
                };
                node = next;
                j += 1;
                if let Some(value) = &self.nodes[node].value {
                    break Some(value);
                }
            };
            match matched {
                Some(value) => {
                    out.push_str(value);
                    i = j;
                }
                None => {
                    let shown: String = chars[i..chars.len().min(i + 8)].iter().collect();
                    return Err(WeftError::WoofSyntax(format!(
                        "no escape sequence matches {shown:?}"
                    )));
                }
            }
        }
        Ok(out)
    }
}

/// Cut a `#` comment: only at line start or after SP/HT.
fn strip_comment(line: &str) -> &str {
    let mut previous = None;
    for (index, c) in line.char_indices() {
        if c == '#' && matches!(previous, None | Some(' ') | Some('\t')) {
            return &line[..index];
        }
        previous = Some(c);
    }
    line
}

fn parse_lead(line: &str) -> Result<char, WeftError> {
    let mut chars = line.chars();
    let lead = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(WeftError::WoofSyntax(format!(
                "header must be one escape-lead character, got {line:?}"
            )))
        }
    };
    // `H` denotes `#`, which could not be written literally.
    let lead = if lead == 'H' { '#' } else { lead };
    if !lead.is_ascii_graphic() || lead.is_ascii_alphanumeric() {
        return Err(WeftError::WoofSyntax(format!(
            "escape lead {lead:?} is not printable ASCII punctuation"
        )));
    }
    Ok(lead)
}

/// One record: `hex(,hex)*:key`.
fn parse_record(line: &str) -> Result<(String, String), WeftError> {
    let (hexes, key) = line
        .split_once(':')
        .ok_or_else(|| WeftError::WoofSyntax(format!("missing ':' in record {line:?}")))?;
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_graphic()) {
        return Err(WeftError::WoofSyntax(format!(
            "key must be visible ASCII in record {line:?}"
        )));
    }
    let mut value = String::new();
    for hex in hexes.split(',') {
        let cp = u32::from_str_radix(hex.trim_matches(|c| c == ' ' || c == '\t'), 16)
            .map_err(|_| WeftError::WoofSyntax(format!("bad hex codepoint in {line:?}")))?;
        if !valid_codep(cp) {
            return Err(WeftError::WoofSyntax(format!(
                "invalid codepoint U+{cp:04X} in {line:?}"
            )));
        }
        let c = char::from_u32(cp).ok_or_else(|| {
            WeftError::WoofSyntax(format!("invalid codepoint U+{cp:04X} in {line:?}"))
        })?;
        value.push(c);
    }
    Ok((value, key.to_string()))
}
