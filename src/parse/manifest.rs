/// Procfile and Sidecarfile parsing for `builds:create`.
use std::collections::BTreeMap;

use super::ParseError;

/// Parse a Procfile: a YAML map of process type → start command.
///
/// # Errors
///
/// Returns `ParseError::Manifest` if the content is not a map of strings.
pub fn parse_procfile(content: &str) -> Result<BTreeMap<String, String>, ParseError> {
    parse_map(content, "Procfile")
}

/// Parse a Sidecarfile: a YAML map of process type → arbitrary sidecar spec.
///
/// # Errors
///
/// Returns `ParseError::Manifest` if the content is not a YAML map.
pub fn parse_sidecarfile(
    content: &str,
) -> Result<BTreeMap<String, serde_json::Value>, ParseError> {
    parse_map(content, "Sidecarfile")
}

fn parse_map<T>(content: &str, kind: &'static str) -> Result<BTreeMap<String, T>, ParseError>
where
    T: serde::de::DeserializeOwned,
{
    // An empty file is an empty manifest, not a YAML error.
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_yaml::from_str(content).map_err(|source| ParseError::Manifest { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_procfile() {
        let procfile = parse_procfile("web: ./test\nfoo: test --test\n").unwrap();
        assert_eq!(
            procfile,
            BTreeMap::from([
                ("web".to_owned(), "./test".to_owned()),
                ("foo".to_owned(), "test --test".to_owned()),
            ])
        );
    }

    #[test]
    fn test_procfile_invalid() {
        assert!(parse_procfile("web: ./test\nfoo\n").is_err());
        assert!(parse_procfile("web= invalid").is_err());
    }

    #[test]
    fn test_empty_manifest() {
        assert!(parse_procfile("").unwrap().is_empty());
        assert!(parse_sidecarfile("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_sidecarfile() {
        let sidecars =
            parse_sidecarfile("web:\n- image: busybox:latest\n  name: busybox").unwrap();
        assert_eq!(
            sidecars["web"],
            json!([{ "image": "busybox:latest", "name": "busybox" }])
        );
    }
}
