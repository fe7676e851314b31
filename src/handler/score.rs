use std::path::Path;
use crate::{
    Config,
    chat::ChatClient,
    document::list_images,
    fixture::{load_prompts, GroundTruth, TruthRouter},
    harness::Harness,
    scoring::Scorer,
};
use super::write::write_report;

struct Fixtures {
    prompts: std::collections::BTreeMap<String, String>,
    truth: GroundTruth,
    router: TruthRouter,
}

fn load_fixtures(config: &Config) -> anyhow::Result<Fixtures> {
    Ok(Fixtures {
        prompts: load_prompts(&config.prompt_dir)?,
        truth: GroundTruth::load(&config.truth_path)?,
        router: TruthRouter::new(config.truth_routes.clone()),
    })
}

pub async fn handle_score(config: &Config, image: &Path, output: &Path) -> anyhow::Result<()> {
    let fixtures = load_fixtures(config)?;
    let client = ChatClient::from_config(config);
    let harness = Harness::new(
        &client,
        &fixtures.prompts,
        &fixtures.truth,
        &fixtures.router,
        Scorer::new(config.fuzzy_threshold),
    );

    println!("Scoring {} prompts against {}", fixtures.prompts.len(), image.display());
    let report = harness.score_image(image).await?;

    println!("\n=== OVERALL MODEL ACCURACY ===");
    println!("{}", serde_json::to_string_pretty(&report.overall)?);
    write_report(output, &report)
}

pub async fn handle_batch(config: &Config, dir: &Path, output: &Path) -> anyhow::Result<()> {
    let fixtures = load_fixtures(config)?;
    let images = list_images(dir, &config.image_extensions)?;
    if images.is_empty() {
        anyhow::bail!("No images found in {}", dir.display());
    }

    let client = ChatClient::from_config(config);
    let harness = Harness::new(
        &client,
        &fixtures.prompts,
        &fixtures.truth,
        &fixtures.router,
        Scorer::new(config.fuzzy_threshold),
    );

    let report = harness.score_batch(&images).await?;
    for image in &report.images {
        println!("\n=== {} ===", image.image);
        println!("{}", serde_json::to_string_pretty(&image.extraction)?);
        println!("accuracy: {:.3}", image.accuracy);
    }
    println!("\n=== OVERALL MODEL ACCURACY ===");
    println!("{}", serde_json::to_string_pretty(&report.overall)?);
    write_report(output, &report)
}
