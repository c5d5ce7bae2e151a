/// `key=value` token parsing for `annotation:set`.
use std::collections::BTreeMap;

use super::ParseError;

/// Parse `key=value` tokens into a map.
///
/// Tokens starting with `#` are comments and skipped. A key starts with an
/// ASCII letter or `_` and runs up to the first `=`; the value is everything
/// after it, must be non-empty, and may itself contain `=`. Later duplicates
/// overwrite earlier ones.
///
/// # Errors
///
/// Returns `ParseError::Format` for the first malformed token. Nothing parsed
/// before it is returned.
pub fn parse_key_values<S: AsRef<str>>(tokens: &[S]) -> Result<BTreeMap<String, String>, ParseError> {
    let mut map = BTreeMap::new();
    for token in tokens {
        let token = token.as_ref();
        if token.starts_with('#') {
            continue;
        }
        let (key, value) = split_pair(token).ok_or_else(|| ParseError::Format {
            line: token.to_owned(),
        })?;
        map.insert(key.to_owned(), value.to_owned());
    }
    Ok(map)
}

fn split_pair(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    let first = key.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') || value.is_empty() {
        return None;
    }
    Some((key, value))
}
