// src/cli.rs
use crate::config::StudioConfig;
use crate::types::DocumentRequest;
use crate::utils::{attachment_filename, ensure_dir_exists};
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "cv-studio")]
#[command(about = "Turn CV form data into rendercv documents and PDFs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to $CV_STUDIO_CONFIG or ./config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web server (default)
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print or write the YAML document for a JSON request file
    Yaml {
        request: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a JSON request file to a PDF with the configured renderer
    Render {
        request: PathBuf,
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = StudioConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            start_web_server(config).await
        }

        Command::Yaml { request, output } => {
            let request = read_request(&request).await?;
            let yaml = config.mapper().map(&request).to_yaml()?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, &yaml)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("YAML written to {}", path.display());
                }
                None => print!("{}", yaml),
            }
            Ok(())
        }

        Command::Render {
            request,
            output_dir,
        } => {
            let request = read_request(&request).await?;
            let document = config.mapper().map(&request);
            let pdf = config.renderer().render(&document).await?;

            ensure_dir_exists(&output_dir).await?;
            let path = output_dir.join(attachment_filename(&request.display_name(), "pdf"));
            tokio::fs::write(&path, &pdf.data)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;

            info!("✅ Rendered {} ({} bytes)", path.display(), pdf.data.len());
            Ok(())
        }
    }
}

pub async fn read_request(path: &Path) -> Result<DocumentRequest> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read request file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid request JSON in {}", path.display()))
}
