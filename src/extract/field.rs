//! Cleanup and confidence heuristics for values read from a single annotated region.

use serde_json::Value;
use super::NOT_AVAILABLE;

/// Reduces a region response to a single value.
///
/// When the model answers with a JSON object, a non-empty `checked_value` wins,
/// otherwise the first string that is neither the label itself nor another
/// `key: value` pair.
pub fn normalize_region_value(value: &str, label: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    if !(value.starts_with('{') && value.ends_with('}')) {
        return value.to_string();
    }

    let parsed: serde_json::Map<String, Value> = match serde_json::from_str(value) {
        Ok(parsed) => parsed,
        Err(_) => return value.to_string(),
    };

    // any non-empty tick wins, even one that trims to nothing
    if let Some(checked) = parsed.get("checked_value").and_then(Value::as_str) {
        if !checked.is_empty() {
            return checked.trim().to_string();
        }
    }

    parsed
        .values()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|v| !v.is_empty() && !v.eq_ignore_ascii_case(label) && !v.contains(':'))
        .map(str::to_string)
        .unwrap_or_default()
}

fn is_clean(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '/' | '-' | ' ')
}

/// Heuristic confidence in [0, 1] for an extracted region value.
pub fn confidence(value: &str, label: &str) -> f64 {
    if value.is_empty() || value == NOT_AVAILABLE {
        return 0.0;
    }

    // present
    let mut score = 0.4;

    if !value.eq_ignore_ascii_case(label) {
        score += 0.2;
    }

    let total = value.chars().count();
    let clean = value.chars().filter(|c| is_clean(*c)).count();
    score += 0.3 * clean as f64 / total.max(1) as f64;

    if value.trim().chars().count() >= 2 {
        score += 0.1;
    }

    round2(score.min(1.0))
}

/// Mean of the field confidences of one image, 0.0 when nothing was extracted.
pub fn image_confidence(confidences: &[f64]) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    round2(confidences.iter().sum::<f64>() / confidences.len() as f64)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
