use std::path::PathBuf;
use clap::{command, Parser};
use crate::schema::{choice::Unrecognized, Section};
use crate::Config;

mod fields;
mod normalize;
mod score;
mod write;

#[derive(Parser)]
#[command(name = "narscan")]
#[command(about = "Extract and score neonatal admission records from scanned pages", version = "0.1")]
pub enum Cli {
    /// Run every prompt against one page image and score the answers against the ground truth
    Score {
        #[arg(help = "Page image")]
        image: PathBuf,

        #[arg(short, long, help = "Report path, defaults to report_path in config")]
        output: Option<PathBuf>,
    },

    /// Run every prompt against every page image in a folder and merge each page's answers
    Batch {
        #[arg(help = "Folder of page images")]
        dir: PathBuf,

        #[arg(short, long, help = "Report path, defaults to report_path in config")]
        output: Option<PathBuf>,
    },

    /// Crop each annotated region out of every page and read it separately
    Fields {
        #[arg(help = "Folder of page images")]
        dir: PathBuf,

        #[arg(short, long, help = "Annotation file, defaults to annotation_path in config")]
        annotation: Option<PathBuf>,

        #[arg(short, long, help = "Write the result here instead of printing it")]
        output: Option<PathBuf>,
    },

    /// Validate raw field values against a record section and print the export form
    Normalize {
        #[arg(value_enum, help = "Record section")]
        section: Section,

        #[arg(help = "JSON file with the raw field values")]
        path: PathBuf,

        #[arg(long, help = "List values that matched no label next to the record")]
        keep_unrecognized: bool,
    },
}

pub async fn handler(args: Cli, config: Config) -> anyhow::Result<()> {
    match args {
        Cli::Score { image, output } => {
            let output = output.unwrap_or_else(|| config.report_path.clone());
            score::handle_score(&config, &image, &output).await
        }
        Cli::Batch { dir, output } => {
            let output = output.unwrap_or_else(|| config.report_path.clone());
            score::handle_batch(&config, &dir, &output).await
        }
        Cli::Fields { dir, annotation, output } => {
            let annotation = annotation.unwrap_or_else(|| config.annotation_path.clone());
            fields::handle_fields(&config, &dir, &annotation, output.as_deref()).await
        }
        Cli::Normalize { section, path, keep_unrecognized } => {
            let policy = if keep_unrecognized { Unrecognized::Preserve } else { Unrecognized::Empty };
            normalize::handle_normalize(section, &path, policy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["narscan", "score", "page_1.png", "-o", "out.json"]);
        assert!(matches!(cli, Ok(Cli::Score { output: Some(_), .. })));

        let cli = Cli::try_parse_from(["narscan", "normalize", "outborn-infant", "raw.json"]);
        assert!(matches!(
            cli,
            Ok(Cli::Normalize { section: Section::OutbornInfant, keep_unrecognized: false, .. })
        ));

        let cli = Cli::try_parse_from(["narscan", "normalize", "mother", "raw.json", "--keep-unrecognized"]);
        assert!(matches!(cli, Ok(Cli::Normalize { keep_unrecognized: true, .. })));

        assert!(Cli::try_parse_from(["narscan", "normalize", "page9", "raw.json"]).is_err());
    }
}
