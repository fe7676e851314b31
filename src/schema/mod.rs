//! Typed admission record sections, validated from raw extracted values.

pub mod choice;
pub mod enums;
pub mod infant;
pub mod mother;
pub mod labour;
pub mod presenting;
pub mod newborn;
pub mod investigation;
pub mod diagnosis;
pub mod interventions;

use std::collections::BTreeMap;
use anyhow::Context;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use infant::{InfantDetails, OutbornInfantDetails};
pub use mother::MotherDetails;
pub use labour::LabourAndBirth;
pub use presenting::PresentingProblems;
pub use newborn::NewbornAdmission;
pub use investigation::AdmissionInvestigation;
pub use diagnosis::AdmissionDiagnosis;
pub use interventions::Interventions;

use choice::{is_sentinel, RawValue, Unrecognized, DEFAULT_SENTINELS, EMPTY_CODE};

/// Free-text field: strings as given, numbers as their text, null as empty.
fn free_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Infant,
    OutbornInfant,
    Mother,
    Labour,
    Presenting,
    Newborn,
    Investigation,
    Diagnosis,
    Interventions,
}

/// A normalized record and, under [`Unrecognized::Preserve`], the raw text of every
/// enumerated field that matched no label, keyed by field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub record: Value,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unrecognized: BTreeMap<String, String>,
}

impl Section {
    /// Validates raw field values against the section schema and returns the export form.
    pub fn normalize(self, raw: Value, policy: Unrecognized) -> anyhow::Result<NormalizedRecord> {
        if !raw.is_object() {
            anyhow::bail!("Raw {:?} fields must be a JSON object", self);
        }
        let record = match self {
            Section::Infant => round_trip::<InfantDetails>(&raw),
            Section::OutbornInfant => round_trip::<OutbornInfantDetails>(&raw),
            Section::Mother => round_trip::<MotherDetails>(&raw),
            Section::Labour => round_trip::<LabourAndBirth>(&raw),
            Section::Presenting => round_trip::<PresentingProblems>(&raw),
            Section::Newborn => round_trip::<NewbornAdmission>(&raw),
            Section::Investigation => round_trip::<AdmissionInvestigation>(&raw),
            Section::Diagnosis => round_trip::<AdmissionDiagnosis>(&raw),
            Section::Interventions => round_trip::<Interventions>(&raw),
        }?;

        let mut unrecognized = BTreeMap::new();
        if policy == Unrecognized::Preserve {
            collect_unrecognized("", &raw, &record, &mut unrecognized);
        }
        Ok(NormalizedRecord { record, unrecognized })
    }
}

/// Walks raw and exported values side by side. A field exported as EMPTY whose raw
/// value was no sentinel held text outside its label set.
fn collect_unrecognized(prefix: &str, raw: &Value, record: &Value, out: &mut BTreeMap<String, String>) {
    let (Value::Object(raw), Value::Object(record)) = (raw, record) else {
        return;
    };
    for (key, value) in raw {
        let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        match record.get(key) {
            Some(nested @ Value::Object(_)) => collect_unrecognized(&path, value, nested, out),
            Some(exported) if *exported == Value::from(EMPTY_CODE) => {
                let raw = RawValue::from(value);
                if !is_sentinel(&raw, DEFAULT_SENTINELS) {
                    if let Some(text) = raw.text() {
                        out.insert(path, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn round_trip<R: DeserializeOwned + Serialize>(raw: &Value) -> anyhow::Result<Value> {
    let record = R::deserialize(raw)
        .with_context(|| format!("Invalid {}", std::any::type_name::<R>()))?;
    Ok(serde_json::to_value(record)?)
}
