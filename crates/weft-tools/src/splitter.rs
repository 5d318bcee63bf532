// Word splitter.
//
// Splits each content word into alternating non-linguistic and
// linguistic pieces. A linguistic piece is a maximal run of category
// L/M codepoints, where an apostrophe (U+0027) or right single quote
// (U+2019) counts as letter-like only when both its neighbours in the
// original word are L/M. Letter-likeness is decided per position
// before the runs are gathered, so a contextual apostrophe never
// splits a word and every other codepoint keeps its own class.
//
// Every piece re-enters the tuple as a content word, with empty skip
// strings between adjacent pieces, so the tuple keeps its
// skip/word/skip alternation. Applying the splitter to its own output
// changes nothing.

use weft_core::charclass::is_letter_or_mark;

/// Split one content word into its pieces (each non-empty, alternating
/// letter-like / not).
pub fn split_word(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let letterish: Vec<bool> = (0..chars.len())
        .map(|i| {
            if is_letter_or_mark(chars[i]) {
                return true;
            }
            matches!(chars[i], '\u{0027}' | '\u{2019}')
                && i > 0
                && i + 1 < chars.len()
                && is_letter_or_mark(chars[i - 1])
                && is_letter_or_mark(chars[i + 1])
        })
        .collect();

    let mut pieces = Vec::new();
    let mut run = String::new();
    let mut run_is_letter = false;
    for (i, &c) in chars.iter().enumerate() {
        if letterish[i] != run_is_letter && !run.is_empty() {
            pieces.push(run);
            run = String::new();
        }
        run_is_letter = letterish[i];
        run.push(c);
    }
    if !run.is_empty() {
        pieces.push(run);
    }
    pieces
}

/// Rebuild a line tuple with every content word replaced by its split
/// expansion.
pub fn split_tuple(tuple: &[String]) -> Vec<String> {
    let words = tuple.len() / 2;
    let mut out = Vec::with_capacity(tuple.len());
    out.push(tuple[0].clone());
    for k in 0..words {
        for (index, piece) in split_word(&tuple[2 * k + 1]).into_iter().enumerate() {
            if index > 0 {
                out.push(String::new());
            }
            out.push(piece);
        }
        out.push(tuple[2 * k + 2].clone());
    }
    out
}
