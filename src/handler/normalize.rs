use std::path::Path;
use anyhow::Context;
use serde_json::Value;
use crate::schema::{choice::Unrecognized, NormalizedRecord, Section};

fn normalize_file(section: Section, path: &Path, policy: Unrecognized) -> anyhow::Result<NormalizedRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    section.normalize(raw, policy)
}

pub fn handle_normalize(section: Section, path: &Path, policy: Unrecognized) -> anyhow::Result<()> {
    let normalized = normalize_file(section, path, policy)?;
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}
