use std::path::Path;
use crate::{
    Config,
    chat::ChatClient,
    document::{annotation::Annotation, list_images},
    harness::extract_pages,
};
use super::write::write_report;

pub async fn handle_fields(
    config: &Config,
    dir: &Path,
    annotation: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    println!("Loading annotation: {}", annotation.display());
    let annotation = Annotation::load(annotation)?;
    let images = list_images(dir, &config.image_extensions)?;
    if images.is_empty() {
        anyhow::bail!("No images found in {}", dir.display());
    }

    println!("Reading {} regions on each of {} pages", annotation.boxes.len(), images.len());
    let client = ChatClient::from_config(config);
    let pages = extract_pages(&client, &images, &annotation).await?;

    match output {
        Some(path) => write_report(path, &pages),
        None => {
            println!("\n=== Final Extracted JSON ===");
            println!("{}", serde_json::to_string_pretty(&pages)?);
            Ok(())
        }
    }
}
