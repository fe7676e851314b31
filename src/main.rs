use std::path::PathBuf;
use clap::Parser;
use dotenv::dotenv;
use handler::Cli;
use serde::{Deserialize, Serialize};
use fixture::TruthRoute;

mod handler;
mod document;
mod chat;
mod extract;
mod fixture;
mod harness;
mod schema;
mod scoring;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = read_config()?;
    let args = Cli::parse();
    handler::handler(args, config).await?;
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    // Vision model
    ollama_url: String,
    vision_model: String,
    seed: i64,
    temperature: f32,

    // Scoring
    fuzzy_threshold: f64,

    // Fixtures
    prompt_dir: PathBuf,
    truth_path: PathBuf,
    annotation_path: PathBuf,
    image_extensions: Vec<String>,

    // Output
    report_path: PathBuf,

    // Prompt routing
    #[serde(default = "fixture::default_routes")]
    truth_routes: Vec<TruthRoute>,
}

fn read_config() -> anyhow::Result<Config> {
    Ok(config::Config::builder()
        .set_default("ollama_url", "http://localhost:11434")?
        .set_default("vision_model", "qwen3-vl:4b")?
        .set_default("seed", 42)?
        .set_default("temperature", 0.0)?
        .set_default("fuzzy_threshold", scoring::DEFAULT_FUZZY_THRESHOLD)?
        .set_default("prompt_dir", "prompt_templates")?
        .set_default("truth_path", "truth.json")?
        .set_default("annotation_path", "annotation.json")?
        .set_default("image_extensions", vec!["png", "jpg", "jpeg"])?
        .set_default("report_path", "extraction_results.json")?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("NARSCAN"))
        .build()?
        .try_deserialize::<Config>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_config() -> anyhow::Result<()> {
        let config = read_config()?;
        assert_eq!(config.vision_model, "qwen3-vl:4b");
        assert_eq!(config.seed, 42);
        assert!((config.fuzzy_threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.report_path, PathBuf::from("extraction_results.json"));
        assert!(config.image_extensions.iter().any(|ext| ext == "png"));
        Ok(())
    }

    #[test]
    fn test_truth_routes() -> anyhow::Result<()> {
        let config = read_config()?;
        assert_eq!(config.truth_routes.len(), 9);
        assert_eq!(config.truth_routes[0].pattern, "_baseline");
        assert_eq!(config.truth_routes[3].key, "labels");
        Ok(())
    }
}
