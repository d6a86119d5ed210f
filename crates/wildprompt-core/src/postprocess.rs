//! Post-expansion prompt utilities.
//!
//! Expanded prompts may carry LoRA tags (`<lora:name:0.8:0.6>`) and `BREAK`
//! keywords that downstream encoders act on. These helpers only parse text;
//! nothing here loads a model.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

const LORA_TAG_PATTERN: &str = r"<lora:([^>]+)>";
const LBW_PRESET_PATTERN: &str = r"LBW=[A-Za-z][A-Za-z0-9_-]*:";
const NUMERIC_PATTERN: &str = r"^-?(\d*\.?\d+|\d+\.?\d*)$";

static LORA_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static LBW_PRESET_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();

fn lora_tag_regex() -> &'static Regex {
    LORA_TAG_REGEX.get_or_init(|| Regex::new(LORA_TAG_PATTERN).expect("invalid regex pattern"))
}

fn lbw_preset_regex() -> &'static Regex {
    LBW_PRESET_REGEX.get_or_init(|| Regex::new(LBW_PRESET_PATTERN).expect("invalid regex pattern"))
}

fn numeric_regex() -> &'static Regex {
    NUMERIC_REGEX.get_or_init(|| Regex::new(NUMERIC_PATTERN).expect("invalid regex pattern"))
}

/// A `<lora:...>` tag found in a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoraTag {
    pub name: String,
    /// First numeric field; 1.0 when absent.
    pub model_weight: f64,
    /// Second numeric field; the model weight when absent.
    pub clip_weight: f64,
    /// Block-weight vector from `LBW=`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbw_a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbw_b: Option<f64>,
    /// Loader name from `LOADER=`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
}

fn parse_number(s: &str) -> Option<f64> {
    if numeric_regex().is_match(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// Parses every LoRA tag in `text`, keeping the first tag for each name.
pub fn extract_lora_tags(text: &str) -> Vec<LoraTag> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for caps in lora_tag_regex().captures_iter(text) {
        let body = lbw_preset_regex().replace_all(caps[1].trim_matches(':'), "LBW=");
        let mut fields = body.split(':');
        let Some(name) = fields.next() else {
            continue;
        };

        let mut tag = LoraTag {
            name: name.to_string(),
            model_weight: 1.0,
            clip_weight: 1.0,
            lbw: None,
            lbw_a: None,
            lbw_b: None,
            loader: None,
        };
        let mut weights = Vec::with_capacity(2);

        for field in fields {
            if let Some(weight) = parse_number(field) {
                weights.push(weight);
            } else if let Some(spec) = field.strip_prefix("LBW=") {
                for part in spec.split(';') {
                    if let Some(a) = part.strip_prefix("A=") {
                        tag.lbw_a = Some(parse_number(a.trim()).unwrap_or(1.0));
                    } else if let Some(b) = part.strip_prefix("B=") {
                        tag.lbw_b = Some(parse_number(b.trim()).unwrap_or(1.0));
                    } else if !part.trim().is_empty() {
                        tag.lbw = Some(part.to_string());
                    }
                }
            } else if let Some(loader) = field.strip_prefix("LOADER=") {
                tag.loader = Some(loader.to_string());
            }
        }

        tag.model_weight = weights.first().copied().unwrap_or(1.0);
        tag.clip_weight = weights.get(1).copied().unwrap_or(tag.model_weight);

        if seen.insert(tag.name.clone()) {
            tags.push(tag);
        }
    }

    tags
}

/// Removes every LoRA tag from `text`.
pub fn strip_lora_tags(text: &str) -> String {
    lora_tag_regex().replace_all(text, "").into_owned()
}

/// Splits a prompt on `BREAK` into trimmed, non-empty segments.
///
/// Always returns at least one segment (`""` for an empty prompt).
pub fn split_break_segments(text: &str) -> Vec<String> {
    let segments: Vec<String> = text
        .split("BREAK")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        vec![String::new()]
    } else {
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lora_weights_default() {
        let tags = extract_lora_tags("a <lora:style> b <lora:detail:0.6> c <lora:mix:0.8:0.3>");
        let weights: Vec<_> = tags
            .iter()
            .map(|t| (t.name.as_str(), t.model_weight, t.clip_weight))
            .collect();
        assert_eq!(
            weights,
            vec![("style", 1.0, 1.0), ("detail", 0.6, 0.6), ("mix", 0.8, 0.3)]
        );
    }

    #[test]
    fn test_lora_block_weights_and_loader() {
        let tags = extract_lora_tags("<lora:char:0.9:LBW=ALL:1,0,0,1;A=0.5;B=x:LOADER=nunchaku>");
        assert_eq!(tags.len(), 1);
        let tag = &tags[0];
        assert_eq!(tag.name, "char");
        assert_eq!(tag.model_weight, 0.9);
        assert_eq!(tag.lbw.as_deref(), Some("1,0,0,1"));
        assert_eq!(tag.lbw_a, Some(0.5));
        assert_eq!(tag.lbw_b, Some(1.0));
        assert_eq!(tag.loader.as_deref(), Some("nunchaku"));
    }

    #[test]
    fn test_duplicate_lora_keeps_first() {
        let tags = extract_lora_tags("<lora:x:0.2> <lora:x:0.9>");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].model_weight, 0.2);
    }

    #[test]
    fn test_strip_lora_tags() {
        assert_eq!(
            strip_lora_tags("a <lora:x:0.5>cat<lora:y> sits"),
            "a cat sits"
        );
        assert_eq!(strip_lora_tags("no tags"), "no tags");
    }

    #[test]
    fn test_split_break_segments() {
        assert_eq!(
            split_break_segments("a cat BREAK  red hat BREAK BREAK"),
            vec!["a cat", "red hat"]
        );
        assert_eq!(split_break_segments("  "), vec![""]);
        assert_eq!(split_break_segments("single"), vec!["single"]);
    }
}
