use std::collections::BTreeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use crate::scoring::{mean_accuracy, round3};

fn rounded<S: Serializer>(accuracy: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round3(*accuracy))
}

fn rounded_opt<S: Serializer>(accuracy: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match accuracy {
        Some(accuracy) => rounded(accuracy, serializer),
        None => serializer.serialize_none(),
    }
}

/// One prompt run against one image.
#[derive(Debug, Clone, Serialize)]
pub struct PromptOutcome {
    pub raw: String,
    pub prediction: Value,
    pub truth: Option<Value>,
    /// None when no ground truth is available; such prompts stay out of the mean.
    #[serde(serialize_with = "rounded_opt")]
    pub accuracy: Option<f64>,
}

pub type PromptOutcomes = BTreeMap<String, PromptOutcome>;

pub fn scores(outcomes: &PromptOutcomes) -> Vec<f64> {
    outcomes.values().filter_map(|outcome| outcome.accuracy).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Overall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_images: Option<usize>,
    pub num_prompts: usize,
    #[serde(serialize_with = "rounded")]
    pub overall_accuracy: f64,
}

impl Overall {
    pub fn from_scores(scores: &[f64], num_images: Option<usize>) -> Self {
        Self {
            num_images,
            num_prompts: scores.len(),
            overall_accuracy: mean_accuracy(scores),
        }
    }
}

/// All prompts against a single page.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    #[serde(flatten)]
    pub prompts: PromptOutcomes,
    #[serde(rename = "_overall")]
    pub overall: Overall,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    pub image: String,
    pub prompts: PromptOutcomes,
    pub extraction: Map<String, Value>,
    #[serde(serialize_with = "rounded")]
    pub accuracy: f64,
}

/// All prompts against every page of a folder.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub images: Vec<ImageReport>,
    #[serde(rename = "_overall")]
    pub overall: Overall,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionValue {
    pub value: String,
    pub confidence: f64,
}

/// Values read from the annotated regions of one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageFields {
    pub image: String,
    pub fields: BTreeMap<String, RegionValue>,
    pub image_confidence: f64,
}
