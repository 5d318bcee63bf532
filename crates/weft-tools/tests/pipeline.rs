//! End-to-end pipeline tests: source -> filters -> target, all through
//! real WEFT streams.

use weft_tools::hyphenator::{Hyphenator, PatternSet, TexPatterns};
use weft_tools::markup::{self, Location};
use weft_tools::pipeline::{filter_tuples, filter_words};
use weft_tools::splitter;
use weft_tools::unpack;
use weft_tools::woof::WoofTable;
use weft_tools::{plain, hyphenator::wordlist};

fn unpack_to_string(weft: &[u8]) -> String {
    let mut out = Vec::new();
    unpack::unpack(weft, &mut out, None::<Vec<u8>>).unwrap();
    String::from_utf8(out).unwrap()
}

// ---------------------------------------------------------------------------
// Round-trip identity
// ---------------------------------------------------------------------------

#[test]
fn plain_source_then_unpack_is_identity() {
    let input = "The quick brown fox\njumps over the lazy dog.\n";
    let mut weft = Vec::new();
    plain::package(input.as_bytes(), &mut weft).unwrap();
    assert_eq!(unpack_to_string(&weft), input);
}

#[test]
fn markup_source_preserves_safe_text() {
    // No & < > and no entities: content words equal the plain words.
    let input = "only safe words here\n";
    let mut weft = Vec::new();
    markup::package(input.as_bytes(), &mut weft, Location::Char).unwrap();
    assert_eq!(unpack_to_string(&weft), input);
}

// ---------------------------------------------------------------------------
// Filters through real streams
// ---------------------------------------------------------------------------

#[test]
fn splitter_over_markup_stream() {
    let input = "<p>don't,stop! now</p>\n";
    let mut weft = Vec::new();
    markup::package(input.as_bytes(), &mut weft, Location::Char).unwrap();

    let mut split = Vec::new();
    filter_tuples(&weft[..], &mut split, |tuple| {
        Ok(splitter::split_tuple(tuple))
    })
    .unwrap();

    // Reshaping words must not change the reconstruction.
    assert_eq!(unpack_to_string(&split), input);

    // Idempotence over the stream.
    let mut again = Vec::new();
    filter_tuples(&split[..], &mut again, |tuple| {
        Ok(splitter::split_tuple(tuple))
    })
    .unwrap();
    assert_eq!(split, again);
}

#[test]
fn hyphenator_over_stream_with_tex_patterns() {
    let patterns =
        TexPatterns::parse("hy3ph\nhe2n\nhen5at\n1na\nn2at\n1tio\n2io\no2n").unwrap();
    let word: Vec<char> = "hyphenation".chars().collect();
    assert_eq!(patterns.split_offsets(&word), vec![2, 6, 7]);

    let mut weft = Vec::new();
    plain::package(&b"hyphenation rules\n"[..], &mut weft).unwrap();

    let mut hyphenator = Hyphenator::new(Some(patterns), None);
    let mut out = Vec::new();
    filter_words(&weft[..], &mut out, |word| hyphenator.hyphenate_word(word)).unwrap();

    assert_eq!(
        unpack_to_string(&out),
        "hy\u{00AD}phen\u{00AD}a\u{00AD}tion rules\n"
    );

    // The exported word list renders soft hyphens as graves, longest
    // entries first.
    let mut list = Vec::new();
    wordlist::export(hyphenator.cache(), &mut list).unwrap();
    assert_eq!(
        String::from_utf8(list).unwrap(),
        "hy`phen`a`tion\nrules\n"
    );
}

#[test]
fn specialized_list_overrides_patterns_over_stream() {
    let special = wordlist::load(&b"hyphen`ation\n"[..]).unwrap();
    let patterns = TexPatterns::parse("hy3ph").unwrap();
    let mut hyphenator = Hyphenator::new(Some(patterns), Some(special));

    let mut weft = Vec::new();
    plain::package(&b"hyphenation\n"[..], &mut weft).unwrap();
    let mut out = Vec::new();
    filter_words(&weft[..], &mut out, |word| hyphenator.hyphenate_word(word)).unwrap();
    assert_eq!(unpack_to_string(&out), "hyphen\u{00AD}ation\n");
}

#[test]
fn woof_over_stream() {
    let table = WoofTable::parse(";\n61,65:ae\nC6:AE\n").unwrap();
    let mut weft = Vec::new();
    plain::package(&b";AEther and ;aether\n"[..], &mut weft).unwrap();
    let mut out = Vec::new();
    filter_words(&weft[..], &mut out, |word| table.translate_word(word)).unwrap();
    assert_eq!(unpack_to_string(&out), "\u{00C6}ther and aether\n");
}

#[test]
fn skip_runs_survive_any_word_filter() {
    let input = "  <b>two words</b>  \n";
    let mut weft = Vec::new();
    markup::package(input.as_bytes(), &mut weft, Location::Char).unwrap();

    let mut out = Vec::new();
    filter_words(&weft[..], &mut out, |word| Ok(format!("[{word}]"))).unwrap();
    assert_eq!(unpack_to_string(&out), "  <b>[two] [words]</b>  \n");
}

// ---------------------------------------------------------------------------
// Entity handling end to end
// ---------------------------------------------------------------------------

#[test]
fn entity_scenario_words() {
    let input = "A &amp; B &#x41;&#65; C&apos;D\n";
    let mut weft = Vec::new();
    markup::package(input.as_bytes(), &mut weft, Location::Char).unwrap();
    let text = String::from_utf8(weft.clone()).unwrap();
    let body_line = text.lines().nth_back(1).unwrap();
    assert_eq!(body_line, "A &amp; B AA C'D");

    // The words as a filter sees them.
    let mut words = Vec::new();
    filter_words(&weft[..], &mut Vec::new(), |word| {
        words.push(word.to_string());
        Ok(word.to_string())
    })
    .unwrap();
    assert_eq!(words, vec!["A", "&amp;", "B", "AA", "C'D"]);
}
