use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hand-labelled expected values keyed by section name, e.g. `labels` or `row1`.
#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    sections: HashMap<String, Value>,
}

impl GroundTruth {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read ground truth {}", path.display()))?;
        let sections = serde_json::from_str(&content)
            .with_context(|| format!("Ground truth {} is not a JSON object", path.display()))?;
        Ok(Self { sections })
    }

    /// Expected value for a section. Null, `false`, zero and empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.sections.get(key).filter(|value| match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64() != Some(0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        })
    }
}

impl From<HashMap<String, Value>> for GroundTruth {
    fn from(sections: HashMap<String, Value>) -> Self {
        Self { sections }
    }
}

/// Loads every `*.txt` prompt in `dir`, keyed by file stem.
pub fn load_prompts(dir: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    if !dir.is_dir() {
        anyhow::bail!("Prompt folder not found: {}", dir.display());
    }

    let mut prompts = BTreeMap::new();
    let entries = walkdir::WalkDir::new(dir).max_depth(1).into_iter().filter_map(|e| e.ok());
    for entry in entries {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else { continue };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read prompt {}", path.display()))?;
        prompts.insert(name.to_string(), text);
    }

    if prompts.is_empty() {
        anyhow::bail!("No .txt prompts found in {}", dir.display());
    }
    Ok(prompts)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TruthRoute {
    pub pattern: String,
    pub key: String,
}

impl TruthRoute {
    fn new(pattern: &str, key: &str) -> Self {
        Self { pattern: pattern.to_string(), key: key.to_string() }
    }
}

pub fn default_routes() -> Vec<TruthRoute> {
    vec![
        TruthRoute::new("_baseline", "baseline"),
        TruthRoute::new("trial", "baseline"),
        TruthRoute::new("whole", "baseline"),
        TruthRoute::new("A_labels", "labels"),
        TruthRoute::new("B_section_entry", "name"),
        TruthRoute::new("C_ip_no", "ip_no"),
        TruthRoute::new("D_row1", "row1"),
        TruthRoute::new("E_row2", "row2"),
        TruthRoute::new("F_row3", "row3"),
    ]
}

/// Maps a prompt name to its ground truth key; the first route whose pattern occurs in the name wins.
#[derive(Debug, Clone)]
pub struct TruthRouter {
    routes: Vec<TruthRoute>,
}

impl TruthRouter {
    pub fn new(routes: Vec<TruthRoute>) -> Self {
        Self { routes }
    }

    pub fn key_for(&self, prompt_name: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| prompt_name.contains(route.pattern.as_str()))
            .map(|route| route.key.as_str())
    }
}

impl Default for TruthRouter {
    fn default() -> Self {
        Self::new(default_routes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_ground_truth() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("truth.json");
        fs::write(&path, r#"{"ip_no": "1234", "labels": ["Sex", "DOB"], "row1": {}, "name": null}"#)?;

        let truth = GroundTruth::load(&path)?;
        assert_eq!(truth.get("ip_no"), Some(&json!("1234")));
        assert_eq!(truth.get("labels"), Some(&json!(["Sex", "DOB"])));
        assert_eq!(truth.get("row1"), None);
        assert_eq!(truth.get("name"), None);
        assert_eq!(truth.get("row2"), None);
        Ok(())
    }

    #[test]
    fn test_falsy_truth_is_absent() {
        let sections: HashMap<String, Value> = [
            ("zero", json!(0)),
            ("zero_float", json!(0.0)),
            ("no", json!(false)),
            ("count", json!(3)),
            ("yes", json!(true)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let truth = GroundTruth::from(sections);

        assert_eq!(truth.get("zero"), None);
        assert_eq!(truth.get("zero_float"), None);
        assert_eq!(truth.get("no"), None);
        assert_eq!(truth.get("count"), Some(&json!(3)));
        assert_eq!(truth.get("yes"), Some(&json!(true)));
    }

    #[test]
    fn test_missing_ground_truth_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GroundTruth::load(&dir.path().join("truth.json")).is_err());
    }

    #[test]
    fn test_load_prompts() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("promptC_ip_no.txt"), "Read the IP number")?;
        fs::write(dir.path().join("promptA_labels.txt"), "List the labels")?;
        fs::write(dir.path().join("notes.md"), "ignored")?;

        let prompts = load_prompts(dir.path())?;
        let names: Vec<&str> = prompts.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["promptA_labels", "promptC_ip_no"]);
        assert_eq!(prompts["promptC_ip_no"], "Read the IP number");
        Ok(())
    }

    #[test]
    fn test_load_prompts_errors() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(load_prompts(dir.path()).is_err());
        assert!(load_prompts(&dir.path().join("missing")).is_err());
        Ok(())
    }

    #[test]
    fn test_router() {
        let router = TruthRouter::default();
        assert_eq!(router.key_for("promptA_labels"), Some("labels"));
        assert_eq!(router.key_for("promptD_row1_v2"), Some("row1"));
        assert_eq!(router.key_for("whole_page"), Some("baseline"));
        assert_eq!(router.key_for("trial_A_labels"), Some("baseline"));
        assert_eq!(router.key_for("promptZ_misc"), None);
    }
}
