// src/utils.rs
use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};

/// RFC 5987 `attr-char` set: everything else gets escaped
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Make a name safe for a `Content-Disposition` filename
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '\\' | '/') && !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Download filename for a rendered CV, e.g. `Jane_Doe_CV.pdf`
pub fn attachment_filename(name: &str, extension: &str) -> String {
    format!("{}_CV.{}", sanitize_filename(name), extension)
}

/// `Content-Disposition` value for a download. Carries an ASCII-only
/// `filename` for old clients and the exact UTF-8 name in `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, ATTR_CHAR)
    )
}

/// Resolve a configured path against the current directory
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

/// Ensure directory exists
pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Check if file exists and is readable
pub async fn file_accessible(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename() {
        assert_eq!(attachment_filename("Jane Doe", "pdf"), "Jane_Doe_CV.pdf");
        assert_eq!(attachment_filename("CV", "pdf"), "CV_CV.pdf");
        assert_eq!(attachment_filename("José Núñez", "yaml"), "José_Núñez_CV.yaml");
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("Jane_Doe_CV.pdf"),
            "attachment; filename=\"Jane_Doe_CV.pdf\"; filename*=UTF-8''Jane_Doe_CV.pdf"
        );
        assert_eq!(
            content_disposition("José_Núñez_CV.yaml"),
            "attachment; filename=\"Jos__N__ez_CV.yaml\"; filename*=UTF-8''Jos%C3%A9_N%C3%BA%C3%B1ez_CV.yaml"
        );
        assert_eq!(
            content_disposition("O'Brien (2)_CV.pdf"),
            "attachment; filename=\"O'Brien (2)_CV.pdf\"; filename*=UTF-8''O%27Brien%20%282%29_CV.pdf"
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a \"b\"/c\\d"), "a_bcd");
        assert_eq!(sanitize_filename("line\nbreak"), "linebreak");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(
            get_file_extension(Path::new("out/cv.PDF")),
            Some("pdf".to_string())
        );
        assert_eq!(get_file_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_resolve_path_keeps_absolute() {
        let abs = Path::new("/srv/previews");
        assert_eq!(resolve_path(abs).unwrap(), PathBuf::from("/srv/previews"));
        assert!(resolve_path(Path::new("previews")).unwrap().is_absolute());
    }

    #[tokio::test]
    async fn test_file_accessible() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cv.pdf");
        assert!(!file_accessible(&file).await);
        tokio::fs::write(&file, b"%PDF").await.unwrap();
        assert!(file_accessible(&file).await);
        assert!(!file_accessible(dir.path()).await);
    }
}
