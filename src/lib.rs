pub mod cli;
pub mod config;
pub mod mapper;
pub mod renderer;
pub mod types;
pub mod utils;
pub mod web;

pub use config::StudioConfig;
pub use mapper::{ContactFields, DocumentMapper};
pub use renderer::{RenderError, RenderedPdf, Renderer};
pub use types::{Document, DocumentRequest, Theme};
pub use web::{build_rocket, start_web_server};
