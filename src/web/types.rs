// src/web/types.rs

use crate::mapper::DocumentMapper;
use crate::renderer::{RenderError, Renderer};
use crate::utils::content_disposition;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::{Request, Response};
use std::path::PathBuf;

/// Shared read-only state handed to every request
pub struct ServerState {
    pub mapper: DocumentMapper,
    pub renderer: Renderer,
    pub previews_dir: PathBuf,
}

pub struct PdfResponse {
    pub data: Vec<u8>,
    pub filename: Option<String>,
}

impl PdfResponse {
    pub fn with_filename(data: Vec<u8>, filename: String) -> Self {
        Self {
            data,
            filename: Some(filename),
        }
    }
}

impl<'r> Responder<'r, 'static> for PdfResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        attachment(ContentType::PDF, self.data, self.filename)
    }
}

pub struct YamlResponse {
    pub content: String,
    pub filename: String,
}

impl<'r> Responder<'r, 'static> for YamlResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let content_type = ContentType::new("application", "x-yaml").with_params(("charset", "utf-8"));
        attachment(content_type, self.content.into_bytes(), Some(self.filename))
    }
}

fn attachment(
    content_type: ContentType,
    data: Vec<u8>,
    filename: Option<String>,
) -> response::Result<'static> {
    let mut binding = Response::build();
    let mut response = binding
        .header(content_type)
        .sized_body(data.len(), std::io::Cursor::new(data));

    if let Some(filename) = filename {
        response = response.raw_header(
            "Content-Disposition",
            content_disposition(&filename),
        );
    }

    response.ok()
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_code: error_code.into(),
        }
    }
}

/// Failure answered with a status code and a JSON error body
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: Status, error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(error, error_code),
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(Status::NotFound, error, "NOT_FOUND")
    }

    pub fn internal(error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self::new(Status::InternalServerError, error, error_code)
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        Self::internal(e.to_string(), e.code())
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status, Json(self.body)).respond_to(request)
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ThemeInfo {
    pub name: String,
    pub preview_url: String,
    pub preview_file: String,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ThemesResponse {
    pub themes: Vec<ThemeInfo>,
    pub default: String,
}
