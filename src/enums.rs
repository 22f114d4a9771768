//! Enum tables: enum name to its members, in declaration order.

use crate::patterns::rules::{ENUM_HEADER, ENUM_MEMBER};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub type EnumTable = BTreeMap<String, Vec<String>>;

/// A `}` followed by this is still inside a nested call, not the end of the enum body.
static NESTED_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s*\)|,)").expect("nested close pattern compiles"));

/// Reads every `enum class` declared in `text`.
///
/// Members come from the part of the body before the first `;`, so the
/// companion/method section of an enum never contributes names.
pub fn extract_enums(text: &str) -> EnumTable {
    let mut table = EnumTable::new();
    let mut position = 0;

    while let Some(header) = ENUM_HEADER.matches(&text[position..]).next() {
        let body_start = position + header.end;
        let Some(body_end) = find_body_end(text, body_start) else {
            position = body_start;
            continue;
        };

        let body = &text[body_start..body_end];
        let entries = body.split(';').next().unwrap_or_default();
        table.insert(header.text("name").to_string(), members(entries));

        position = body_end + 1;
    }

    table
}

fn find_body_end(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .match_indices('}')
        .map(|(offset, _)| from + offset)
        .find(|&close| !NESTED_CLOSE.is_match(&text[close + 1..]))
}

fn members(entries: &str) -> Vec<String> {
    ENUM_MEMBER
        .matches(entries)
        .map(|record| record.text("member").to_string())
        .collect()
}

/// Local enums overlaid with the curated global table; global entries win.
pub fn with_overrides(local: EnumTable, global: &EnumTable) -> EnumTable {
    let mut merged = local;
    merged.extend(global.iter().map(|(name, values)| (name.clone(), values.clone())));
    merged
}
