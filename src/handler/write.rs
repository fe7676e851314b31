use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::Context;
use serde::Serialize;

pub fn write_report<T: Serialize>(path: &Path, report: &T) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    log::info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_report() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("extraction_results.json");
        let report = json!({"_overall": {"num_prompts": 0, "overall_accuracy": 0.0}});
        write_report(&path, &report)?;

        let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(written, report);
        Ok(())
    }

    #[test]
    fn test_write_report_bad_path() {
        let report = json!({});
        assert!(write_report(Path::new("/no/such/dir/report.json"), &report).is_err());
    }
}
