//! Prompt input loading.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, Read};

/// Reads the prompt from the `TEXT` argument, `--file`, or stdin, in that order.
pub fn read_prompt(text: Option<&str>, file: Option<&str>) -> Result<String> {
    match (text, file) {
        (Some(_), Some(_)) => bail!("pass either TEXT or --file, not both"),
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file: {}", path)),
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read prompt from stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_argument_wins() {
        assert_eq!(read_prompt(Some("a {b|c}"), None).unwrap(), "a {b|c}");
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        fs::write(&path, "from file").unwrap();
        let path = path.to_string_lossy().to_string();
        assert_eq!(read_prompt(None, Some(&path)).unwrap(), "from file");
    }

    #[test]
    fn test_missing_file_mentions_path() {
        let err = read_prompt(None, Some("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_both_sources_is_an_error() {
        assert!(read_prompt(Some("x"), Some("y.txt")).is_err());
    }
}
