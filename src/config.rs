// src/config.rs
use crate::mapper::{ContactFields, DocumentMapper};
use crate::renderer::Renderer;
use crate::utils::resolve_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub address: String,
    pub port: u16,
    /// Directory holding the per-theme sample PDFs
    pub previews_dir: PathBuf,
    /// Renderer program and leading arguments; the YAML path is appended
    pub renderer_command: Vec<String>,
    /// `None` waits for the renderer indefinitely
    pub render_timeout_secs: Option<u64>,
    /// Where per-request workspaces are created, system temp dir when unset
    pub workspace_root: Option<PathBuf>,
    pub contact_fields: ContactFields,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
            previews_dir: PathBuf::from("previews"),
            renderer_command: vec!["rendercv".to_string(), "render".to_string()],
            render_timeout_secs: Some(60),
            workspace_root: None,
            contact_fields: ContactFields::Omit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<StudioConfig>,
    #[serde(default)]
    production: Option<StudioConfig>,
}

impl StudioConfig {
    /// Load configuration for the current environment.
    /// A missing config file means defaults; env overrides apply either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("CV_STUDIO_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_env_overrides()?.resolve_paths()
    }

    fn get_environment() -> String {
        std::env::var("CV_STUDIO_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Pick the section for `environment` out of a config file
    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid config YAML")?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(section.unwrap_or_default())
    }

    fn apply_env_overrides(mut self) -> Result<Self> {
        if let Some(port) = std::env::var("CV_STUDIO_PORT")
            .or_else(|_| std::env::var("ROCKET_PORT"))
            .ok()
        {
            self.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("Port must be a valid port number, got '{}'", port))?;
        }

        if let Ok(dir) = std::env::var("CV_STUDIO_PREVIEWS_DIR") {
            self.previews_dir = PathBuf::from(dir);
        }

        if let Ok(secs) = std::env::var("CV_STUDIO_RENDER_TIMEOUT") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| anyhow::anyhow!("CV_STUDIO_RENDER_TIMEOUT must be whole seconds"))?;
            self.render_timeout_secs = (secs > 0).then_some(secs);
        }

        Ok(self)
    }

    fn resolve_paths(mut self) -> Result<Self> {
        self.previews_dir = resolve_path(&self.previews_dir)?;
        if let Some(root) = &self.workspace_root {
            self.workspace_root = Some(resolve_path(root)?);
        }
        Ok(self)
    }

    pub fn render_timeout(&self) -> Option<Duration> {
        self.render_timeout_secs.map(Duration::from_secs)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.renderer_command.clone())
            .with_timeout(self.render_timeout())
            .with_workspace_root(self.workspace_root.clone())
    }

    pub fn mapper(&self) -> DocumentMapper {
        DocumentMapper::new(self.contact_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  port: 8080
  previews_dir: samples
  contact_fields: always
production:
  address: 0.0.0.0
  render_timeout_secs: null
  renderer_command: ["/opt/rendercv/bin/rendercv", "render"]
"#;

    #[test]
    fn test_local_section() {
        let config = StudioConfig::from_yaml(SAMPLE, "local").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.previews_dir, PathBuf::from("samples"));
        assert_eq!(config.contact_fields, ContactFields::Always);
        assert_eq!(config.render_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.address, "127.0.0.1");
    }

    #[test]
    fn test_production_section() {
        let config = StudioConfig::from_yaml(SAMPLE, "production").unwrap();
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.render_timeout(), None);
        assert_eq!(config.renderer_command[0], "/opt/rendercv/bin/rendercv");
        assert_eq!(config.contact_fields, ContactFields::Omit);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = StudioConfig::from_yaml("local:\n  port: 9000\n", "production").unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(StudioConfig::from_yaml("local: [", "local").is_err());
        assert!(StudioConfig::from_yaml("local:\n  contact_fields: sometimes\n", "local").is_err());
    }

    #[test]
    fn test_renderer_from_config() {
        let config = StudioConfig {
            render_timeout_secs: Some(5),
            ..Default::default()
        };
        assert_eq!(config.renderer().timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.mapper().contact_fields(), ContactFields::Omit);
    }
}
