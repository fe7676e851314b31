//! Runs prompt templates against page images and scores the answers.

pub mod report;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use anyhow::Result;
use image::DynamicImage;
use log::{debug, info, warn};

use crate::chat::VisionModel;
use crate::document::{self, annotation::{crop, Annotation}};
use crate::extract::{self, field};
use crate::fixture::{GroundTruth, TruthRouter};
use crate::scoring::{mean_accuracy, Scorer};
use report::{
    scores, BatchReport, ImageReport, Overall, PageFields, PromptOutcome, PromptOutcomes,
    RegionValue, ScoreReport,
};

pub struct Harness<'a> {
    model: &'a dyn VisionModel,
    prompts: &'a BTreeMap<String, String>,
    truth: &'a GroundTruth,
    router: &'a TruthRouter,
    scorer: Scorer,
}

impl<'a> Harness<'a> {
    pub fn new(
        model: &'a dyn VisionModel,
        prompts: &'a BTreeMap<String, String>,
        truth: &'a GroundTruth,
        router: &'a TruthRouter,
        scorer: Scorer,
    ) -> Self {
        Self { model, prompts, truth, router, scorer }
    }

    /// Parses a raw answer and scores it against the truth routed from the prompt name.
    pub fn evaluate(&self, prompt_name: &str, raw: String) -> PromptOutcome {
        let prediction = extract::parse_prediction(&raw);
        let truth = self.router
            .key_for(prompt_name)
            .and_then(|key| self.truth.get(key))
            .cloned();
        let accuracy = truth.as_ref().map(|truth| self.scorer.score(&prediction, truth));
        PromptOutcome { raw, prediction, truth, accuracy }
    }

    /// Every prompt against one base64 image. Failed model calls are logged and skipped.
    pub async fn run_image(&self, image: String) -> PromptOutcomes {
        let images = vec![image];
        let mut outcomes = PromptOutcomes::new();

        for (name, prompt) in self.prompts {
            info!("Running prompt {}", name);
            let raw = match self.model.complete(prompt, &images).await {
                Ok(raw) => raw,
                Err(err) => {
                    warn!("Failed to get response for {}: {:#}", name, err);
                    continue;
                }
            };
            debug!("Raw model output for {}:\n{}", name, raw);

            let outcome = self.evaluate(name, raw);
            if let Some(accuracy) = outcome.accuracy {
                info!("Accuracy of {}: {:.3}", name, accuracy);
            }
            outcomes.insert(name.clone(), outcome);
        }

        outcomes
    }

    pub async fn score_image(&self, path: &Path) -> Result<ScoreReport> {
        let image = document::encode_file(path)?;
        let prompts = self.run_image(image).await;
        let overall = Overall::from_scores(&scores(&prompts), None);
        info!(
            "Overall accuracy {:.3} over {} scored prompts",
            overall.overall_accuracy, overall.num_prompts
        );
        Ok(ScoreReport { prompts, overall })
    }

    /// Every prompt against every page; predictions of one page are merged into one extraction.
    pub async fn score_batch(&self, paths: &[PathBuf]) -> Result<BatchReport> {
        let mut images = Vec::new();
        let mut all_scores = Vec::new();

        for path in paths {
            let name = document::file_name(path);
            info!("Processing image {}", name);

            let image = document::encode_file(path)?;
            let prompts = self.run_image(image).await;

            let predictions: Vec<_> = prompts.values().map(|o| o.prediction.clone()).collect();
            let extraction = extract::merge_predictions(&predictions);
            let image_scores = scores(&prompts);
            let accuracy = mean_accuracy(&image_scores);
            info!("Image {} accuracy {:.3}", name, accuracy);

            all_scores.extend(image_scores);
            images.push(ImageReport { image: name, prompts, extraction, accuracy });
        }

        let overall = Overall::from_scores(&all_scores, Some(images.len()));
        Ok(BatchReport { images, overall })
    }
}

fn region_prompt(label: &str) -> String {
    format!(
        "Extract all visible {label} and handwritten text from this image exactly as written, \
         if there is any checkbox, specify only the value which is ticked. \
         Return the output strictly in JSON format. \
         If the value part is not given only use N/A and nothing else"
    )
}

/// Reads each annotated region of a page with its own model call.
pub async fn extract_regions(
    model: &dyn VisionModel,
    page: &DynamicImage,
    annotation: &Annotation,
) -> Result<BTreeMap<String, RegionValue>> {
    let total = annotation.boxes.len();
    let mut fields = BTreeMap::new();

    for (idx, region) in annotation.boxes.iter().enumerate() {
        info!("[{}/{}] Processing field '{}'", idx + 1, total, region.label);
        let cropped = match crop(page, region) {
            Ok(cropped) => cropped,
            Err(err) => {
                warn!("{:#}", err);
                continue;
            }
        };
        let encoded = document::encode_image(&cropped)?;
        drop(cropped);

        let raw = match model.complete(&region_prompt(&region.label), &[encoded]).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to extract '{}': {:#}", region.label, err);
                continue;
            }
        };
        debug!("Extracted value for '{}': {:?}", region.label, raw);

        let value = field::normalize_region_value(&raw, &region.label);
        let confidence = field::confidence(&value, &region.label);
        fields.insert(region.label.clone(), RegionValue { value, confidence });
    }

    Ok(fields)
}

pub async fn extract_pages(
    model: &dyn VisionModel,
    paths: &[PathBuf],
    annotation: &Annotation,
) -> Result<Vec<PageFields>> {
    let mut pages = Vec::new();
    for path in paths {
        info!("Processing image {}", path.display());
        let page = document::open_image(path)?;
        let fields = extract_regions(model, &page, annotation).await?;
        drop(page);

        let confidences: Vec<f64> = fields.values().map(|f| f.confidence).collect();
        pages.push(PageFields {
            image: document::file_name(path),
            image_confidence: field::image_confidence(&confidences),
            fields,
        });
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use async_trait::async_trait;
    use serde_json::json;
    use crate::document::annotation::Region;

    /// Answers keyed by prompt text; unknown prompts fail like an unreachable model.
    struct CannedModel {
        answers: HashMap<String, String>,
    }

    impl CannedModel {
        fn new(answers: &[(&str, &str)]) -> Self {
            Self {
                answers: answers.iter().map(|(p, a)| (p.to_string(), a.to_string())).collect(),
            }
        }
    }

    #[async_trait]
    impl VisionModel for CannedModel {
        async fn complete(&self, prompt: &str, images: &[String]) -> Result<String> {
            assert_eq!(images.len(), 1);
            self.answers
                .get(prompt)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    fn prompts() -> BTreeMap<String, String> {
        [
            ("promptA_labels", "list labels"),
            ("promptC_ip_no", "read ip"),
            ("promptD_row1", "read row1"),
            ("promptX_notes", "read notes"),
            ("promptF_row3", "read row3"),
        ]
        .iter()
        .map(|(n, p)| (n.to_string(), p.to_string()))
        .collect()
    }

    fn truth() -> GroundTruth {
        let sections: HashMap<String, serde_json::Value> = [
            ("labels", json!(["Infant IP No", "Date of Admission", "Sex"])),
            ("ip_no", json!("1234")),
            ("row1", json!({"Sex": "M", "Gestation": "38"})),
            ("row3", json!({"Apgar": "8"})),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        GroundTruth::from(sections)
    }

    fn model() -> CannedModel {
        CannedModel::new(&[
            ("list labels", "```json\n[\"Infant IP No\", \"Date of Admision\"]\n```"),
            ("read ip", "```json\n1234\n```"),
            ("read row1", "[\"Sex: M\", \"Gestation: -\"]"),
            ("read notes", "Baby looked well"),
        ])
    }

    #[tokio::test]
    async fn test_score_image() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let page = dir.path().join("page_1.png");
        std::fs::write(&page, b"png")?;

        let (model, prompts, truth, router) = (model(), prompts(), truth(), TruthRouter::default());
        let harness = Harness::new(&model, &prompts, &truth, &router, Scorer::default());
        let report = harness.score_image(&page).await?;

        // row3 failed at the model and is skipped
        assert_eq!(report.prompts.len(), 4);
        assert!(!report.prompts.contains_key("promptF_row3"));

        let labels = &report.prompts["promptA_labels"];
        assert!((labels.accuracy.unwrap() - 2.0 / 3.0).abs() < 1e-9);

        let ip = &report.prompts["promptC_ip_no"];
        assert_eq!(ip.prediction, json!(1234));
        assert_eq!(ip.accuracy, Some(1.0));

        // a line list is not a mapping, so it scores zero against a mapping truth
        assert_eq!(report.prompts["promptD_row1"].accuracy, Some(0.0));

        let notes = &report.prompts["promptX_notes"];
        assert_eq!(notes.prediction, json!("Baby looked well"));
        assert_eq!(notes.truth, None);
        assert_eq!(notes.accuracy, None);

        assert_eq!(report.overall.num_prompts, 3);
        assert!((report.overall.overall_accuracy - (2.0 / 3.0 + 1.0) / 3.0).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn test_score_batch() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let pages = vec![dir.path().join("a_page_1.png"), dir.path().join("b_page_1.png")];
        for page in &pages {
            std::fs::write(page, b"png")?;
        }

        let (model, prompts, truth, router) = (model(), prompts(), truth(), TruthRouter::default());
        let harness = Harness::new(&model, &prompts, &truth, &router, Scorer::default());
        let report = harness.score_batch(&pages).await?;

        assert_eq!(report.images.len(), 2);
        let first = &report.images[0];
        assert_eq!(first.image, "a_page_1.png");
        assert_eq!(first.extraction["Sex"], json!("M"));
        assert_eq!(first.extraction["Gestation"], json!("N/A"));
        assert_eq!(report.overall.num_images, Some(2));
        assert_eq!(report.overall.num_prompts, 6);

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["_overall"]["num_images"], 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_image_is_fatal() {
        let (model, prompts, truth, router) = (model(), prompts(), truth(), TruthRouter::default());
        let harness = Harness::new(&model, &prompts, &truth, &router, Scorer::default());
        assert!(harness.score_image(Path::new("/no/such/page.png")).await.is_err());
    }

    #[tokio::test]
    async fn test_extract_regions() -> Result<()> {
        let page = DynamicImage::new_rgb8(200, 100);
        let annotation = Annotation {
            boxes: vec![
                Region { x: 50.0, y: 20.0, width: 40.0, height: 20.0, label: "IP No".to_string() },
                Region { x: 150.0, y: 20.0, width: 40.0, height: 20.0, label: "Sex".to_string() },
                Region { x: 900.0, y: 900.0, width: 10.0, height: 10.0, label: "Lost".to_string() },
                Region { x: 100.0, y: 80.0, width: 40.0, height: 20.0, label: "Weight".to_string() },
            ],
        };
        let model = CannedModel::new(&[
            (region_prompt("IP No").as_str(), "1234"),
            (region_prompt("Sex").as_str(), r#"{"label": "Sex", "checked_value": "M"}"#),
            (region_prompt("Lost").as_str(), "never asked"),
        ]);

        let fields = extract_regions(&model, &page, &annotation).await?;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["IP No"].value, "1234");
        assert_eq!(fields["IP No"].confidence, 1.0);
        assert_eq!(fields["Sex"].value, "M");
        assert!(!fields.contains_key("Lost"));
        assert!(!fields.contains_key("Weight"));
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_pages() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("page_1.png");
        DynamicImage::new_rgb8(200, 100).save(&path)?;

        let annotation = Annotation {
            boxes: vec![Region { x: 50.0, y: 20.0, width: 40.0, height: 20.0, label: "IP No".to_string() }],
        };
        let model = CannedModel::new(&[(region_prompt("IP No").as_str(), "N/A")]);

        let pages = extract_pages(&model, &[path], &annotation).await?;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].image, "page_1.png");
        assert_eq!(pages[0].fields["IP No"].confidence, 0.0);
        assert_eq!(pages[0].image_confidence, 0.0);
        Ok(())
    }
}
