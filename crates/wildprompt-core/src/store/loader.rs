//! Wildcard file loaders.
//!
//! Flat `.txt` files hold one option per line; lines that are blank or whose
//! first non-whitespace character is `#` are skipped. Kept lines are stored
//! exactly as written.
//!
//! YAML documents map nested keys to lists. Every leaf list becomes its own
//! option list under the slash-joined path of its keys; a scalar leaf becomes
//! a one-item list. The file name is not part of the key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::StoreError;
use crate::key::normalize_key;

/// Extracts the options of a flat wildcard file.
pub fn parse_txt_options(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(str::to_string)
        .collect()
}

/// Reads a flat wildcard file.
///
/// Bytes are decoded as UTF-8, falling back to Latin-1 for files that are not
/// valid UTF-8.
pub fn load_txt_file(path: &Path) -> Result<Vec<String>, StoreError> {
    let content = read_text(path)?;
    Ok(parse_txt_options(&content))
}

/// Extracts every leaf list of a YAML wildcard document, keyed by path.
pub fn parse_yaml_wildcards(
    content: &str,
    path: &Path,
) -> Result<BTreeMap<String, Vec<String>>, StoreError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut out = BTreeMap::new();
    if content.trim().is_empty() {
        return Ok(out);
    }

    let document: Value = serde_yaml::from_str(content).map_err(|source| StoreError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    match strip_tags(&document) {
        Value::Mapping(mapping) => collect_mapping(mapping, "", &mut out),
        // An empty document declares nothing.
        Value::Null => {}
        _ => {
            return Err(StoreError::YamlShape {
                path: path.to_path_buf(),
            })
        }
    }
    Ok(out)
}

/// Reads a YAML wildcard document.
pub fn load_yaml_file(path: &Path) -> Result<BTreeMap<String, Vec<String>>, StoreError> {
    let content = read_text(path)?;
    parse_yaml_wildcards(&content, path)
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| char::from(b)).collect(),
    })
}

fn strip_tags(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => strip_tags(&tagged.value),
        other => other,
    }
}

fn collect_mapping(
    mapping: &serde_yaml::Mapping,
    prefix: &str,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (name, value) in mapping {
        let Some(name) = scalar_text(name) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let key = if prefix.is_empty() {
            normalize_key(&name)
        } else {
            format!("{}/{}", prefix, normalize_key(&name))
        };

        match strip_tags(value) {
            Value::Mapping(nested) => collect_mapping(nested, &key, out),
            Value::Sequence(items) => {
                let options = items.iter().filter_map(scalar_text).collect();
                out.insert(key, options);
            }
            Value::Null => {}
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    out.insert(key, vec![text]);
                }
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match strip_tags(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_txt_skips_blank_and_comment_lines() {
        let content = "red\n\n  # warm colors\n  orange  \n#blue\ngreen # not a comment\r\n";
        assert_eq!(
            parse_txt_options(content),
            vec!["red", "  orange  ", "green # not a comment"]
        );
    }

    #[test]
    fn test_txt_strips_bom() {
        assert_eq!(parse_txt_options("\u{feff}first\nsecond"), vec!["first", "second"]);
    }

    #[test]
    fn test_load_txt_file_latin1_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cafe.txt");
        fs::write(&path, [b'c', b'a', b'f', 0xE9, b'\n']).unwrap();
        assert_eq!(load_txt_file(&path).unwrap(), vec!["café"]);
    }

    #[test]
    fn test_load_txt_file_missing_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_txt_file(&dir.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.code(), "WILDCARD_STORE_001");
    }

    #[test]
    fn test_yaml_nested_paths() {
        let yaml = r#"
colors:
  warm: [red, orange]
  Cool:
    - blue
    - green
animals:
  pets:
    small:
      - hamster
single: lonely
count: 3
nothing:
"#;
        let parsed = parse_yaml_wildcards(yaml, Path::new("doc.yaml")).unwrap();
        let expected: BTreeMap<String, Vec<String>> = [
            ("animals/pets/small", vec!["hamster"]),
            ("colors/cool", vec!["blue", "green"]),
            ("colors/warm", vec!["red", "orange"]),
            ("count", vec!["3"]),
            ("single", vec!["lonely"]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
        .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_yaml_non_mapping_is_shape_error() {
        let err = parse_yaml_wildcards("- a\n- b\n", Path::new("list.yaml")).unwrap_err();
        assert_eq!(err.code(), "WILDCARD_STORE_003");
    }

    #[test]
    fn test_yaml_syntax_error() {
        let err = parse_yaml_wildcards("a: [b, c\n", Path::new("bad.yaml")).unwrap_err();
        assert_eq!(err.code(), "WILDCARD_STORE_002");
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_empty_yaml_document() {
        assert!(parse_yaml_wildcards("", Path::new("empty.yaml")).unwrap().is_empty());
    }
}
