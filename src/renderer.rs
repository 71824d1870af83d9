// src/renderer.rs
//! rendercv invocation inside a throwaway workspace

use crate::types::Document;
use crate::utils::get_file_extension;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub const YAML_FILE_NAME: &str = "cv.yaml";
pub const OUTPUT_DIR_NAME: &str = "rendercv_output";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] anyhow::Error),

    #[error("Failed to prepare render workspace: {0}")]
    Workspace(#[source] io::Error),

    #[error("Failed to launch renderer '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Nonzero exit; displays as the renderer's captured stderr
    #[error("{stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("Renderer timed out after {0:?}")]
    Timeout(Duration),

    #[error("Renderer finished without producing a PDF")]
    NoOutput,
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::Serialize(_) => "SERIALIZE_ERROR",
            RenderError::Workspace(_) => "WORKSPACE_ERROR",
            RenderError::Launch { .. } => "RENDERER_LAUNCH_ERROR",
            RenderError::Failed { .. } => "RENDERER_FAILED",
            RenderError::Timeout(_) => "RENDERER_TIMEOUT",
            RenderError::NoOutput => "NO_OUTPUT",
        }
    }
}

#[derive(Debug)]
pub struct RenderedPdf {
    pub data: Vec<u8>,
    /// Name rendercv gave the file inside its output directory
    pub source_name: String,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    command: Vec<String>,
    timeout: Option<Duration>,
    workspace_root: Option<PathBuf>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(vec!["rendercv".to_string(), "render".to_string()])
    }
}

impl Renderer {
    /// `command` is the program followed by its leading arguments; the YAML path is appended.
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            timeout: Some(Duration::from_secs(60)),
            workspace_root: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workspace_root(mut self, root: Option<PathBuf>) -> Self {
        self.workspace_root = root;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub async fn render(&self, document: &Document) -> Result<RenderedPdf, RenderError> {
        let yaml = document.to_yaml().map_err(RenderError::Serialize)?;
        self.render_yaml(&yaml).await
    }

    /// Render an already serialized document. The workspace is removed on every path out.
    pub async fn render_yaml(&self, yaml: &str) -> Result<RenderedPdf, RenderError> {
        let workspace = self.create_workspace().await?;
        debug!("Render workspace: {}", workspace.path().display());

        let result = self.run_in(workspace.path(), yaml).await;

        let path = workspace.path().to_path_buf();
        if let Err(e) = workspace.close() {
            warn!("Failed to remove render workspace {}: {}", path.display(), e);
        }

        result
    }

    async fn create_workspace(&self) -> Result<TempDir, RenderError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("cv-studio-");

        let workspace = match &self.workspace_root {
            Some(root) => {
                tokio::fs::create_dir_all(root)
                    .await
                    .map_err(RenderError::Workspace)?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        };

        workspace.map_err(RenderError::Workspace)
    }

    async fn run_in(&self, dir: &Path, yaml: &str) -> Result<RenderedPdf, RenderError> {
        let yaml_path = dir.join(YAML_FILE_NAME);
        tokio::fs::write(&yaml_path, yaml)
            .await
            .map_err(RenderError::Workspace)?;

        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| RenderError::Launch {
                program: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty renderer command"),
            })?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(&yaml_path)
            .current_dir(dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        info!("Running renderer: {} {}", program, args.join(" "));

        let output_future = cmd.output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, output_future).await {
                Ok(output) => output,
                Err(_) => {
                    warn!("Renderer exceeded {:?}, killed", limit);
                    return Err(RenderError::Timeout(limit));
                }
            },
            None => output_future.await,
        }
        .map_err(|source| RenderError::Launch {
            program: program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            warn!(
                "Renderer exited with {:?}, stderr: {}",
                output.status.code(),
                stderr.trim_end()
            );
            return Err(RenderError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        let pdf_path = find_pdf(&dir.join(OUTPUT_DIR_NAME))
            .await
            .ok_or(RenderError::NoOutput)?;

        let data = tokio::fs::read(&pdf_path)
            .await
            .map_err(RenderError::Workspace)?;

        let source_name = pdf_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        info!("Rendered {} ({} bytes)", source_name, data.len());
        Ok(RenderedPdf { data, source_name })
    }
}

/// First PDF in the directory by file name, if any
async fn find_pdf(dir: &Path) -> Option<PathBuf> {
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    let mut pdfs = Vec::new();

    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        let path = entry.path();
        if is_file && get_file_extension(&path).as_deref() == Some("pdf") {
            pdfs.push(path);
        }
    }

    pdfs.sort();
    pdfs.into_iter().next()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::mapper::DocumentMapper;
    use crate::types::DocumentRequest;

    /// Renderer backed by a shell script; the YAML path arrives as `$1`
    fn script(body: &str, root: &Path) -> Renderer {
        Renderer::new(vec![
            "sh".to_string(),
            "-c".to_string(),
            body.to_string(),
            "sh".to_string(),
        ])
        .with_workspace_root(Some(root.to_path_buf()))
    }

    fn document() -> Document {
        let request = DocumentRequest {
            name: Some("Jane Doe".into()),
            ..Default::default()
        };
        DocumentMapper::default().map(&request)
    }

    fn leftover_entries(root: &Path) -> usize {
        std::fs::read_dir(root).unwrap().count()
    }

    #[tokio::test]
    async fn test_render_success_returns_pdf_and_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let renderer = script(
            "test -f \"$1\" && grep -q 'name: Jane Doe' \"$1\" && \
             mkdir -p rendercv_output && printf '%%PDF-1.4 fake' > rendercv_output/Jane_Doe_CV.pdf",
            root.path(),
        );

        let pdf = renderer.render(&document()).await.unwrap();
        assert_eq!(pdf.data, b"%PDF-1.4 fake");
        assert_eq!(pdf.source_name, "Jane_Doe_CV.pdf");
        assert_eq!(leftover_entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_stderr() {
        let root = tempfile::tempdir().unwrap();
        let renderer = script("echo 'invalid theme' >&2; exit 3", root.path());

        let err = renderer.render(&document()).await.unwrap_err();
        match &err {
            RenderError::Failed { code, stderr } => {
                assert_eq!(*code, Some(3));
                assert_eq!(stderr, "invalid theme\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "invalid theme\n");
        assert_eq!(leftover_entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_success_without_pdf_is_no_output() {
        let root = tempfile::tempdir().unwrap();
        let renderer = script("mkdir -p rendercv_output && touch rendercv_output/cv.typ", root.path());

        let err = renderer.render(&document()).await.unwrap_err();
        assert!(matches!(err, RenderError::NoOutput));
        assert_eq!(leftover_entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_timeout_kills_and_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let renderer = script("sleep 10", root.path()).with_timeout(Some(Duration::from_millis(200)));

        let err = renderer.render(&document()).await.unwrap_err();
        assert!(matches!(err, RenderError::Timeout(_)));
        assert_eq!(err.code(), "RENDERER_TIMEOUT");
        assert_eq!(leftover_entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let root = tempfile::tempdir().unwrap();
        let renderer = Renderer::new(vec!["cv-studio-no-such-renderer".to_string()])
            .with_workspace_root(Some(root.path().to_path_buf()));

        let err = renderer.render(&document()).await.unwrap_err();
        assert!(matches!(err, RenderError::Launch { .. }));
        assert_eq!(leftover_entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_picks_first_pdf_by_name() {
        let root = tempfile::tempdir().unwrap();
        let renderer = script(
            "mkdir -p rendercv_output && printf b > rendercv_output/b.pdf && printf a > rendercv_output/a.pdf",
            root.path(),
        );

        let pdf = renderer.render(&document()).await.unwrap();
        assert_eq!(pdf.source_name, "a.pdf");
        assert_eq!(pdf.data, b"a");
    }

    #[tokio::test]
    async fn test_directories_named_pdf_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        let renderer = script(
            "mkdir -p rendercv_output/0.pdf && printf real > rendercv_output/cv.pdf",
            root.path(),
        );

        let pdf = renderer.render(&document()).await.unwrap();
        assert_eq!(pdf.source_name, "cv.pdf");
        assert_eq!(pdf.data, b"real");

        let only_dir = script("mkdir -p rendercv_output/cv.pdf", root.path());
        let err = only_dir.render(&document()).await.unwrap_err();
        assert!(matches!(err, RenderError::NoOutput));
    }
}
