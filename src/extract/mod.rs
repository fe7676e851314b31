pub mod field;

use std::sync::OnceLock;
use regex::Regex;
use serde_json::{Map, Value};

/// Blank or unreadable free-text values, rewritten to `N/A`.
pub const PLACEHOLDERS: [&str; 5] = ["", "-", "n/a", "N", "NA"];
pub const NOT_AVAILABLE: &str = "N/A";

fn fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```(\w+)?").expect("fence pattern is valid"))
}

/// Strips markdown code fences (with an optional language tag) and surrounding whitespace.
pub fn clean_output(text: &str) -> String {
    fence().replace_all(text, "").trim().to_string()
}

/// Parses cleaned model output as JSON, keeping the cleaned text as a string when it is not JSON.
pub fn parse_prediction(text: &str) -> Value {
    let cleaned = clean_output(text);
    match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(_) => Value::String(cleaned),
    }
}

fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == NOT_AVAILABLE || PLACEHOLDERS.contains(&s.as_str()),
        _ => false,
    }
}

/// Converts `"Key: Value"` lines into a mapping. Items without a colon are dropped.
pub fn line_list_to_map(items: &[Value]) -> Map<String, Value> {
    let mut map = Map::new();
    for item in items {
        let Some(line) = item.as_str() else { continue };
        let Some((key, value)) = line.split_once(':') else { continue };
        let value = value.trim();
        let value = if PLACEHOLDERS.contains(&value) { NOT_AVAILABLE } else { value };
        map.insert(key.trim().to_string(), Value::String(value.to_string()));
    }
    map
}

/// Merges predictions from several prompts into one mapping.
///
/// Line lists are converted first, anything else that is not a mapping is skipped.
/// The first value seen for a key is kept unless it is a placeholder and a later
/// prediction supplies a real value.
pub fn merge_predictions(predictions: &[Value]) -> Map<String, Value> {
    let mut merged = Map::new();

    for prediction in predictions {
        let converted;
        let map = match prediction {
            Value::Object(map) => map,
            Value::Array(items) => {
                converted = line_list_to_map(items);
                &converted
            }
            _ => continue,
        };

        for (key, value) in map {
            match merged.get_mut(key) {
                Some(current) => {
                    if is_placeholder(current) && !is_placeholder(value) {
                        *current = value.clone();
                    }
                }
                None => {
                    let value = if is_placeholder(value) {
                        Value::String(NOT_AVAILABLE.to_string())
                    } else {
                        value.clone()
                    };
                    merged.insert(key.clone(), value);
                }
            }
        }
    }

    merged
}
