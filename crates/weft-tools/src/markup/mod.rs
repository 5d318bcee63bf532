// Markup-aware source.
//
// A line-spanning state machine classifies every codepoint of an
// XML/HTML stream into one of eleven locations. Content words are
// emitted only from raw character data (`char`); every other codepoint
// -- markup, comments, attribute values, processing instructions --
// accumulates into the skip run between words. Entity references are
// decoded, validated against the output codepoint policy, and
// re-escaped, so the packaged body is itself safe markup.
//
// The location survives line breaks; the skip buffer does not (each
// line closes its own tuple). The initial location is configurable so
// fragments can be processed starting mid-markup.

pub mod entity;

use std::io::{BufRead, Write};

use weft_core::charclass::{is_blank, valid_codep};
use weft_core::error::WeftError;
use weft_core::lines::LineReader;
use weft_stream::WeftWriter;

/// The classifier state: where in the markup the cursor currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Raw character data. The only location that emits content words.
    Char,
    /// Inside `<...>`, outside any quoted attribute value.
    Tag,
    /// Single-quoted attribute value.
    TagAttSq,
    /// Double-quoted attribute value.
    TagAttDq,
    /// `<!-- ... -->`
    Comment,
    /// `<![CDATA[ ... ]]>`
    Cdata,
    /// `<!DOCTYPE ...>`
    Doctype,
    /// Single-quoted literal inside a doctype.
    DoctypeAttSq,
    /// Double-quoted literal inside a doctype.
    DoctypeAttDq,
    /// `<? ... ?>`
    Pi,
    /// `<?xml ... ?>`
    XmlDecl,
}

impl Location {
    /// All location names, as accepted by `-begin`.
    pub const NAMES: [&'static str; 11] = [
        "char",
        "tag",
        "tag-att-sq",
        "tag-att-dq",
        "comment",
        "CDATA",
        "doctype",
        "doctype-att-sq",
        "doctype-att-dq",
        "pi",
        "xml-decl",
    ];

    pub fn parse(name: &str) -> Option<Location> {
        match name {
            "char" => Some(Location::Char),
            "tag" => Some(Location::Tag),
            "tag-att-sq" => Some(Location::TagAttSq),
            "tag-att-dq" => Some(Location::TagAttDq),
            "comment" => Some(Location::Comment),
            "CDATA" => Some(Location::Cdata),
            "doctype" => Some(Location::Doctype),
            "doctype-att-sq" => Some(Location::DoctypeAttSq),
            "doctype-att-dq" => Some(Location::DoctypeAttDq),
            "pi" => Some(Location::Pi),
            "xml-decl" => Some(Location::XmlDecl),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Location::Char => "char",
            Location::Tag => "tag",
            Location::TagAttSq => "tag-att-sq",
            Location::TagAttDq => "tag-att-dq",
            Location::Comment => "comment",
            Location::Cdata => "CDATA",
            Location::Doctype => "doctype",
            Location::DoctypeAttSq => "doctype-att-sq",
            Location::DoctypeAttDq => "doctype-att-dq",
            Location::Pi => "pi",
            Location::XmlDecl => "xml-decl",
        }
    }
}

/// Package a markup stream as a WEFT, starting in `begin`.
pub fn package<R: BufRead, W: Write>(
    input: R,
    output: W,
    begin: Location,
) -> Result<(), WeftError> {
    let mut lines = LineReader::new(input);
    let mut tokenizer = MarkupTokenizer::new(begin);
    let mut writer = WeftWriter::new(output);
    while let Some(line) = lines.next_line()? {
        writer.write_line(&tokenizer.tokenize_line(&line)?)?;
    }
    writer.close()
}

/// The line-spanning tokenizer. Feed it one line at a time; it keeps
/// only the location across lines.
pub struct MarkupTokenizer {
    location: Location,
}

/// One line being decomposed: the growing tuple and the skip buffer all
/// non-word material accumulates into.
struct LineBuilder {
    tuple: Vec<String>,
    skip: String,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            tuple: Vec::new(),
            skip: String::new(),
        }
    }

    fn push_word(&mut self, word: String) {
        self.tuple.push(std::mem::take(&mut self.skip));
        self.tuple.push(word);
    }

    fn finish(mut self) -> Vec<String> {
        self.tuple.push(self.skip);
        self.tuple
    }
}

impl MarkupTokenizer {
    pub fn new(begin: Location) -> Self {
        Self { location: begin }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Decompose one line into its tuple, advancing the location.
    pub fn tokenize_line(&mut self, line: &str) -> Result<Vec<String>, WeftError> {
        let chars: Vec<char> = line.chars().collect();
        for &c in &chars {
            if !valid_codep(c as u32) {
                return Err(WeftError::Encoding(format!(
                    "input codepoint U+{:04X} outside the output policy",
                    c as u32
                )));
            }
        }

        let mut out = LineBuilder::new();
        let mut i = 0;
        while i < chars.len() {
            i = match self.location {
                Location::Char => self.step_char(&chars, i, &mut out)?,
                Location::Tag => self.step_tag(&chars, i, &mut out)?,
                Location::TagAttSq => self.step_attribute(&chars, i, &mut out, '\'')?,
                Location::TagAttDq => self.step_attribute(&chars, i, &mut out, '"')?,
                Location::Comment => self.step_opaque(&chars, i, &mut out, &['-', '-', '>']),
                Location::Cdata => self.step_opaque(&chars, i, &mut out, &[']', ']', '>']),
                Location::Doctype => self.step_doctype(&chars, i, &mut out),
                Location::DoctypeAttSq => self.step_doctype_attribute(&chars, i, &mut out, '\''),
                Location::DoctypeAttDq => self.step_doctype_attribute(&chars, i, &mut out, '"'),
                Location::Pi | Location::XmlDecl => {
                    self.step_opaque(&chars, i, &mut out, &['?', '>'])
                }
            };
        }
        Ok(out.finish())
    }

    /// Raw character data up to the next `<` (or end of line).
    fn step_char(
        &mut self,
        chars: &[char],
        start: usize,
        out: &mut LineBuilder,
    ) -> Result<usize, WeftError> {
        let end = chars[start..]
            .iter()
            .position(|&c| c == '<')
            .map(|p| start + p)
            .unwrap_or(chars.len());
        let decoded = entity::decode(&chars[start..end], Location::Char)?;

        // Words are maximal non-blank runs of the decoded text; blanks
        // stay in the skip buffer.
        let mut run = String::new();
        let mut run_is_word = false;
        for c in decoded.chars() {
            let word_char = !is_blank(c);
            if word_char != run_is_word && !run.is_empty() {
                flush_run(out, &run, run_is_word);
                run.clear();
            }
            run_is_word = word_char;
            run.push(c);
        }
        if !run.is_empty() {
            flush_run(out, &run, run_is_word);
        }

        if end == chars.len() {
            return Ok(end);
        }
        let (length, next) = opener(&chars[end..]);
        out.skip.extend(&chars[end..end + length]);
        self.location = next;
        Ok(end + length)
    }

    /// Tag text up to a quote or `>`.
    fn step_tag(
        &mut self,
        chars: &[char],
        start: usize,
        out: &mut LineBuilder,
    ) -> Result<usize, WeftError> {
        let end = chars[start..]
            .iter()
            .position(|&c| matches!(c, '\'' | '"' | '>'))
            .map(|p| start + p)
            .unwrap_or(chars.len());
        let decoded = entity::decode(&chars[start..end], Location::Tag)?;
        out.skip.push_str(&entity::reescape(&decoded, Location::Tag));
        if end == chars.len() {
            return Ok(end);
        }
        out.skip.push(chars[end]);
        self.location = match chars[end] {
            '\'' => Location::TagAttSq,
            '"' => Location::TagAttDq,
            _ => Location::Char,
        };
        Ok(end + 1)
    }

    /// Quoted attribute value up to the matching quote.
    fn step_attribute(
        &mut self,
        chars: &[char],
        start: usize,
        out: &mut LineBuilder,
        quote: char,
    ) -> Result<usize, WeftError> {
        let location = self.location;
        let end = chars[start..]
            .iter()
            .position(|&c| c == quote)
            .map(|p| start + p)
            .unwrap_or(chars.len());
        let decoded = entity::decode(&chars[start..end], location)?;
        out.skip.push_str(&entity::reescape(&decoded, location));
        if end == chars.len() {
            return Ok(end);
        }
        out.skip.push(chars[end]);
        self.location = Location::Tag;
        Ok(end + 1)
    }

    /// Comment / CDATA / PI body: raw text up to the closing delimiter.
    /// Delimiters do not span line breaks.
    fn step_opaque(
        &mut self,
        chars: &[char],
        start: usize,
        out: &mut LineBuilder,
        delimiter: &[char],
    ) -> usize {
        if let Some(p) = find_subsequence(&chars[start..], delimiter) {
            let end = start + p + delimiter.len();
            out.skip.extend(&chars[start..end]);
            self.location = Location::Char;
            end
        } else {
            out.skip.extend(&chars[start..]);
            chars.len()
        }
    }

    /// Doctype text up to a quote or `>`.
    fn step_doctype(&mut self, chars: &[char], start: usize, out: &mut LineBuilder) -> usize {
        let end = chars[start..]
            .iter()
            .position(|&c| matches!(c, '\'' | '"' | '>'))
            .map(|p| start + p)
            .unwrap_or(chars.len());
        out.skip.extend(&chars[start..end]);
        if end == chars.len() {
            return end;
        }
        out.skip.push(chars[end]);
        self.location = match chars[end] {
            '\'' => Location::DoctypeAttSq,
            '"' => Location::DoctypeAttDq,
            _ => Location::Char,
        };
        end + 1
    }

    /// Quoted doctype literal: raw text up to the matching quote.
    fn step_doctype_attribute(
        &mut self,
        chars: &[char],
        start: usize,
        out: &mut LineBuilder,
        quote: char,
    ) -> usize {
        let end = chars[start..]
            .iter()
            .position(|&c| c == quote)
            .map(|p| start + p)
            .unwrap_or(chars.len());
        out.skip.extend(&chars[start..end]);
        if end == chars.len() {
            return end;
        }
        out.skip.push(chars[end]);
        self.location = Location::Doctype;
        end + 1
    }
}

/// A decoded character-data run enters the tuple as a word or joins
/// the skip buffer.
fn flush_run(out: &mut LineBuilder, run: &str, is_word: bool) {
    if is_word {
        out.push_word(entity::reescape(run, Location::Char));
    } else {
        out.skip.push_str(run);
    }
}

/// Recognize the construct opened by the `<` at the start of `rest`.
/// Returns the opener length and the location it enters. The opener
/// itself belongs to the skip run.
fn opener(rest: &[char]) -> (usize, Location) {
    if starts_with_ci(rest, "<?xml") {
        (5, Location::XmlDecl)
    } else if starts_with(rest, "<?") {
        (2, Location::Pi)
    } else if starts_with_ci(rest, "<!DOCTYPE") {
        (9, Location::Doctype)
    } else if starts_with(rest, "<![CDATA[") {
        (9, Location::Cdata)
    } else if starts_with(rest, "<!--") {
        (4, Location::Comment)
    } else {
        (1, Location::Tag)
    }
}

fn starts_with(text: &[char], prefix: &str) -> bool {
    let prefix: Vec<char> = prefix.chars().collect();
    text.len() >= prefix.len() && text[..prefix.len()] == prefix[..]
}

fn starts_with_ci(text: &[char], prefix: &str) -> bool {
    let prefix: Vec<char> = prefix.chars().collect();
    text.len() >= prefix.len()
        && text[..prefix.len()]
            .iter()
            .zip(&prefix)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

fn find_subsequence(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}
