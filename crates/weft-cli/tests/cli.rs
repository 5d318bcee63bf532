//! End-to-end binary tests: the tools piped the way users pipe them.

use assert_cmd::Command;
use predicates::prelude::*;

fn tool(name: &str) -> Command {
    Command::cargo_bin(name).expect("binary built")
}

#[test]
fn plain_source_scenario() {
    tool("weft-plain")
        .write_stdin("The quick brown fox\n")
        .assert()
        .success()
        .stdout("%WEFT;\n7,2\n+0,3\n.1,5\n.1,5\n.1,3\n.0,0\n+0,0\n$0,0\nThe quick brown fox\n\n");
}

#[test]
fn plain_then_unpack_is_identity() {
    let input = "The quick brown fox\njumps over the lazy dog.\n";
    let weft = tool("weft-plain")
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    tool("weft-unpack")
        .write_stdin(weft)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn markup_source_and_unpack() {
    let input = "<p>The quick brown <i>fox</i><br/>\njumps over the <b>lazy</b> dog.</p>\n";
    let weft = tool("weft-markup")
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    tool("weft-unpack")
        .write_stdin(weft)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn markup_begin_state() {
    tool("weft-markup")
        .args(["-begin", "comment"])
        .write_stdin("still --> word\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("still --> word"));

    tool("weft-markup")
        .args(["-begin", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad argument"));
}

#[test]
fn unpack_writes_map_file() {
    let dir = tempfile::tempdir().unwrap();
    let map_path = dir.path().join("out.map");
    let weft = tool("weft-plain")
        .write_stdin("a b\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    tool("weft-unpack")
        .arg("-map")
        .arg(&map_path)
        .write_stdin(weft)
        .assert()
        .success()
        .stdout("a b\n");
    assert_eq!(
        std::fs::read_to_string(&map_path).unwrap(),
        "+0,1\n.1,1\n.0,0\n+0,0\n$0,0\n"
    );
}

#[test]
fn json_target() {
    let weft = tool("weft-plain")
        .write_stdin("a b\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    tool("weft-json")
        .write_stdin(weft)
        .assert()
        .success()
        .stdout("[\n[\"\",\"a\",\" \",\"b\",\"\"],\n[\"\"]\n]\n");
}

#[test]
fn split_filter() {
    let weft = tool("weft-plain")
        .write_stdin("don't,stop!\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let split = tool("weft-split")
        .write_stdin(weft)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(split).unwrap();
    // The word splits into don't / , / stop / ! with empty skips between.
    assert!(text.contains("+0,5\n.0,1\n.0,4\n.0,1\n.0,0\n"), "map was: {text}");
    tool("weft-unpack")
        .write_stdin(text)
        .assert()
        .success()
        .stdout("don't,stop!\n");
}

#[test]
fn hyphenate_with_patterns_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let patterns = dir.path().join("hyph.tex");
    std::fs::write(
        &patterns,
        "\\patterns{ % en-us excerpt\nhy3ph he2n hen5at 1na n2at 1tio 2io o2n\n}\n",
    )
    .unwrap();
    let list = dir.path().join("words.list");

    let weft = tool("weft-plain")
        .write_stdin("hyphenation\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    tool("weft-hyphenate")
        .arg("-load")
        .arg(&patterns)
        .arg("-list")
        .arg(&list)
        .write_stdin(weft)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "hy\u{00AD}phen\u{00AD}a\u{00AD}tion",
        ));
    assert_eq!(
        std::fs::read_to_string(&list).unwrap(),
        "hy`phen`a`tion\n"
    );
}

#[test]
fn hyphenate_missing_pattern_file() {
    tool("weft-hyphenate")
        .args(["-load", "/nonexistent/patterns.tex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("table not found"));
}

#[test]
fn woof_translates_and_rejects_ambiguity() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("ae.woof");
    std::fs::write(&table, ";\n61,65:ae\nC6:AE\n").unwrap();

    let weft = tool("weft-plain")
        .write_stdin(";AEther\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    tool("weft-woof")
        .arg("-table")
        .arg(&table)
        .write_stdin(weft)
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{00C6}ther"));

    let ambiguous = dir.path().join("bad.woof");
    std::fs::write(&ambiguous, ";\n41:abc\n42:abcd\n").unwrap();
    tool("weft-woof")
        .arg("-table")
        .arg(&ambiguous)
        .write_stdin("%WEFT;\n2,1\n+1,0\n$0,0\nx\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous escape table"));
}

#[test]
fn corrupt_weft_fails_cleanly() {
    tool("weft-unpack")
        .write_stdin("not a weft\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a WEFT stream"));

    tool("weft-split")
        .write_stdin("%WEFT;\n2,1\n+9,0\n$0,0\nx\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("map does not match body"));
}

#[test]
fn unknown_arguments_rejected() {
    for name in ["weft-plain", "weft-json", "weft-split"] {
        tool(name)
            .arg("-bogus")
            .assert()
            .failure()
            .stderr(predicate::str::contains("bad argument"));
    }
}
