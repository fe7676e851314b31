pub mod annotation;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};

/// Page images directly inside `dir` with one of the accepted extensions, sorted by path.
pub fn list_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Image folder not found: {}", dir.display());
    }

    let mut images: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect();
    images.sort();
    Ok(images)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions.iter().any(|accepted| accepted.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Base64 of the raw file bytes.
pub fn encode_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Cannot read image {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}

/// Base64 of the image re-encoded as PNG.
pub fn encode_image(image: &DynamicImage) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)
        .context("Failed to encode image as PNG")?;
    Ok(STANDARD.encode(buffer.into_inner()))
}

pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path)
        .with_context(|| format!("Cannot open image {}", path.display()))?;
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extensions() -> Vec<String> {
        vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()]
    }

    #[test]
    fn test_list_images() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("b_page_1.PNG"), b"x")?;
        fs::write(dir.path().join("a_page_1.jpg"), b"x")?;
        fs::write(dir.path().join("scan.pdf"), b"x")?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("nested").join("c.png"), b"x")?;

        let names: Vec<String> = list_images(dir.path(), &extensions())?
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(names, vec!["a_page_1.jpg", "b_page_1.PNG"]);
        Ok(())
    }

    #[test]
    fn test_missing_image_dir() {
        assert!(list_images(Path::new("/definitely/not/here"), &extensions()).is_err());
    }

    #[test]
    fn test_encode_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("page.png");
        fs::write(&path, b"hi")?;
        assert_eq!(encode_file(&path)?, "aGk=");
        Ok(())
    }

    #[test]
    fn test_encode_image_is_png() -> Result<()> {
        let image = DynamicImage::new_rgb8(4, 3);
        let encoded = encode_image(&image)?;
        let bytes = STANDARD.decode(encoded)?;
        assert_eq!(&bytes[..4], b"\x89PNG");
        Ok(())
    }
}
