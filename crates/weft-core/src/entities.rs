// HTML5 named-entity table.
//
// The table ships as a compact text mapping, one `name=hex1,hex2,...`
// line per entity, sorted by name. It is generated from the HTML5 entity
// JSON by an external one-shot tool: entries whose name does not end with
// `;` are dropped (after verifying they alias a `;`-terminated entry) and
// the `&`/`;` delimiters are stripped. 2125 names survive.
//
// The embedded data is parsed once, on first lookup; a malformed table
// surfaces as an error on that lookup rather than a panic.

use std::sync::OnceLock;

use hashbrown::HashMap;

use crate::error::WeftError;

static DATA: &str = include_str!("../data/entities.txt");

static TABLE: OnceLock<Result<HashMap<&'static str, String>, String>> = OnceLock::new();

/// Look up an entity name (without `&` and `;`). Case-sensitive.
pub fn lookup(name: &str) -> Result<Option<&'static str>, WeftError> {
    Ok(table()?.get(name).map(String::as_str))
}

/// Number of entries, exposed for sanity checks.
pub fn len() -> Result<usize, WeftError> {
    Ok(table()?.len())
}

fn table() -> Result<&'static HashMap<&'static str, String>, WeftError> {
    TABLE
        .get_or_init(|| parse_table(DATA))
        .as_ref()
        .map_err(|message| WeftError::Encoding(message.clone()))
}

fn parse_table(data: &str) -> Result<HashMap<&str, String>, String> {
    let mut map = HashMap::new();
    for line in data.lines() {
        let (name, hexes) = line
            .split_once('=')
            .ok_or_else(|| format!("entity table: missing '=' in {line:?}"))?;
        let mut value = String::new();
        for hex in hexes.split(',') {
            let cp = u32::from_str_radix(hex, 16)
                .map_err(|_| format!("entity table: bad hex codepoint in {line:?}"))?;
            let c = char::from_u32(cp)
                .ok_or_else(|| format!("entity table: U+{cp:04X} is not a scalar value"))?;
            value.push(c);
        }
        map.insert(name, value);
    }
    Ok(map)
}
