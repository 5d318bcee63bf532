// TeX hyphenation patterns.
//
// A pattern like `a1b2c` carries odd/even weights for the gaps between
// its letters; `.` anchors a pattern to a word edge. Lookup walks every
// suffix of the dotted word through a trie, takes the per-gap maximum
// of all matching pattern weights, and allows a split wherever the
// final weight is odd. Splits closer than two codepoints to either
// edge of the word are suppressed.
//
// The rest of the pipeline treats a pattern set as an opaque
// `word -> sorted split offsets` function; that contract is the
// `PatternSet` trait, which tests implement with fixed tables.

use hashbrown::HashMap;

use weft_core::error::WeftError;

/// Anything that can propose hyphen points for a word.
///
/// Offsets are codepoint positions strictly inside the word, ascending.
pub trait PatternSet {
    fn split_offsets(&self, word: &[char]) -> Vec<usize>;
}

/// Minimum codepoints before the first and after the last split.
const EDGE_MIN: usize = 2;

/// How the bytes of a pattern file map to codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternStyle {
    /// UTF-8 (the default).
    Utf8,
    /// ISO-8859-2, the classic distribution encoding of the Czech set.
    Czech,
    /// ISO-8859-1, the classic distribution encoding of the German set.
    German,
}

impl PatternStyle {
    pub fn parse(name: &str) -> Option<PatternStyle> {
        match name {
            "utf8" => Some(PatternStyle::Utf8),
            "czech" => Some(PatternStyle::Czech),
            "german" => Some(PatternStyle::German),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Node {
    next: HashMap<char, usize>,
    /// `(gap offset within the pattern, weight)` for non-zero weights.
    weights: Vec<(usize, u8)>,
}

/// A compiled TeX pattern set.
pub struct TexPatterns {
    nodes: Vec<Node>,
}

impl TexPatterns {
    /// Compile a pattern file's text.
    pub fn parse(text: &str) -> Result<TexPatterns, WeftError> {
        let mut patterns = TexPatterns {
            nodes: vec![Node::default()],
        };
        for token in pattern_tokens(text) {
            patterns.insert(&token)?;
        }
        Ok(patterns)
    }

    /// Decode raw file bytes according to `style`, then compile.
    pub fn parse_bytes(bytes: &[u8], style: PatternStyle) -> Result<TexPatterns, WeftError> {
        let text = match style {
            PatternStyle::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|_| WeftError::Encoding("pattern file is not UTF-8".to_string()))?,
            PatternStyle::Czech => bytes.iter().map(|&b| latin2_char(b)).collect(),
            PatternStyle::German => bytes.iter().map(|&b| char::from(b)).collect(),
        };
        Self::parse(&text)
    }

    fn insert(&mut self, pattern: &str) -> Result<(), WeftError> {
        let mut letters: Vec<char> = Vec::new();
        let mut weights: Vec<(usize, u8)> = Vec::new();
        for c in pattern.chars() {
            if let Some(d) = c.to_digit(10) {
                weights.push((letters.len(), d as u8));
            } else {
                letters.push(c);
            }
        }
        if letters.is_empty() {
            return Err(WeftError::WordSyntax(format!(
                "pattern {pattern:?} has no letters"
            )));
        }
        let mut node = 0;
        for &c in &letters {
            node = match self.nodes[node].next.get(&c).copied() {
                Some(existing) => existing,
                None => {
                    let next_index = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].next.insert(c, next_index);
                    next_index
                }
            };
        }
        self.nodes[node].weights = weights;
        Ok(())
    }
}

impl PatternSet for TexPatterns {
    fn split_offsets(&self, word: &[char]) -> Vec<usize> {
        let n = word.len();
        if n < 2 * EDGE_MIN {
            return Vec::new();
        }
        let mut dotted: Vec<char> = Vec::with_capacity(n + 2);
        dotted.push('.');
        dotted.extend(word.iter().map(|&c| fold_case(c)));
        dotted.push('.');

        // levels[g] is the weight of the gap before word[g].
        let mut levels = vec![0u8; n + 1];
        for start in 0..dotted.len() {
            let mut node = 0;
            for &c in &dotted[start..] {
                node = match self.nodes[node].next.get(&c) {
                    Some(&next) => next,
                    None => break,
                };
                for &(offset, weight) in &self.nodes[node].weights {
                    // Gap g of the word corresponds to dotted gap g + 1.
                    let dotted_gap = start + offset;
                    if dotted_gap >= 1 && dotted_gap <= n + 1 {
                        let g = dotted_gap - 1;
                        if g <= n && levels[g] < weight {
                            levels[g] = weight;
                        }
                    }
                }
            }
        }

        (EDGE_MIN..=n - EDGE_MIN)
            .filter(|&g| levels[g] % 2 == 1)
            .collect()
    }
}

/// Lowercase a codepoint when that is a single-codepoint operation.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Extract pattern tokens from a TeX pattern file.
///
/// `%` starts a comment. Patterns live in a `\patterns{...}` group when
/// one is present, otherwise every bare token is a pattern. Other
/// control sequences and a `\hyphenation{...}` exception group are
/// skipped.
fn pattern_tokens(text: &str) -> Vec<String> {
    #[derive(PartialEq)]
    enum Group {
        None,
        Patterns,
        Skip,
    }

    let mut tokens: Vec<String> = Vec::new();
    let mut group = Group::None;
    let mut saw_patterns_group = false;
    let mut bare: Vec<String> = Vec::new();
    let mut pending_macro: Option<String> = None;

    for raw_line in text.lines() {
        let line = match raw_line.find('%') {
            Some(p) => &raw_line[..p],
            None => raw_line,
        };
        let mut word = String::new();
        let mut flush = |word: &mut String,
                         group: &mut Group,
                         pending: &mut Option<String>,
                         tokens: &mut Vec<String>,
                         bare: &mut Vec<String>| {
            if word.is_empty() {
                return;
            }
            let token = std::mem::take(word);
            if let Some(name) = token.strip_prefix('\\') {
                *pending = Some(name.to_string());
            } else if *group == Group::Patterns {
                tokens.push(token);
            } else if *group == Group::None && pending.is_none() {
                bare.push(token);
            }
        };
        for c in line.chars() {
            match c {
                '{' => {
                    flush(&mut word, &mut group, &mut pending_macro, &mut tokens, &mut bare);
                    group = match pending_macro.take().as_deref() {
                        Some("patterns") => {
                            saw_patterns_group = true;
                            Group::Patterns
                        }
                        _ => Group::Skip,
                    };
                }
                '}' => {
                    flush(&mut word, &mut group, &mut pending_macro, &mut tokens, &mut bare);
                    group = Group::None;
                }
                c if c.is_whitespace() => {
                    flush(&mut word, &mut group, &mut pending_macro, &mut tokens, &mut bare);
                }
                c => word.push(c),
            }
        }
        flush(&mut word, &mut group, &mut pending_macro, &mut tokens, &mut bare);
    }

    if saw_patterns_group {
        tokens
    } else {
        bare
    }
}

/// ISO-8859-2 byte to codepoint.
fn latin2_char(b: u8) -> char {
    if b < 0xA0 {
        return char::from(b);
    }
    LATIN2_HIGH[(b - 0xA0) as usize]
}

/// The 0xA0..=0xFF half of ISO-8859-2.
const LATIN2_HIGH: [char; 96] = [
    '\u{00A0}', '\u{0104}', '\u{02D8}', '\u{0141}', '\u{00A4}', '\u{013D}', '\u{015A}', '\u{00A7}',
    '\u{00A8}', '\u{0160}', '\u{015E}', '\u{0164}', '\u{0179}', '\u{00AD}', '\u{017D}', '\u{017B}',
    '\u{00B0}', '\u{0105}', '\u{02DB}', '\u{0142}', '\u{00B4}', '\u{013E}', '\u{015B}', '\u{02C7}',
    '\u{00B8}', '\u{0161}', '\u{015F}', '\u{0165}', '\u{017A}', '\u{02DD}', '\u{017E}', '\u{017C}',
    '\u{0154}', '\u{00C1}', '\u{00C2}', '\u{0102}', '\u{00C4}', '\u{0139}', '\u{0106}', '\u{00C7}',
    '\u{010C}', '\u{00C9}', '\u{0118}', '\u{00CB}', '\u{011A}', '\u{00CD}', '\u{00CE}', '\u{010E}',
    '\u{0110}', '\u{0143}', '\u{0147}', '\u{00D3}', '\u{00D4}', '\u{0150}', '\u{00D6}', '\u{00D7}',
    '\u{0158}', '\u{016E}', '\u{00DA}', '\u{0170}', '\u{00DC}', '\u{00DD}', '\u{0162}', '\u{00DF}',
    '\u{0155}', '\u{00E1}', '\u{00E2}', '\u{0103}', '\u{00E4}', '\u{013A}', '\u{0107}', '\u{00E7}',
    '\u{010D}', '\u{00E9}', '\u{0119}', '\u{00EB}', '\u{011B}', '\u{00ED}', '\u{00EE}', '\u{010F}',
    '\u{0111}', '\u{0144}', '\u{0148}', '\u{00F3}', '\u{00F4}', '\u{0151}', '\u{00F6}', '\u{00F7}',
    '\u{0159}', '\u{016F}', '\u{00FA}', '\u{0171}', '\u{00FC}', '\u{00FD}', '\u{0163}', '\u{02D9}',
];
