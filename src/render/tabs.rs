/// Two-column aligned tables.
use std::collections::BTreeMap;
use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

/// Render `rows` as `key<padding>value` lines, sorted by key.
///
/// The value column starts `spaces` columns after the widest key, so the
/// widest key is followed by exactly `spaces` blanks.
#[must_use]
pub fn pretty_tabs<K, V>(rows: &BTreeMap<K, V>, spaces: usize) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let column = rows
        .keys()
        .map(|k| k.as_ref().width())
        .max()
        .unwrap_or(0)
        + spaces;

    let mut out = String::new();
    for (key, value) in rows {
        let key = key.as_ref();
        let pad = column - key.width();
        let _ = writeln!(out, "{key}{:pad$}{}", "", value.as_ref());
    }
    out
}
