// src/web/handlers/cv_handlers/generate.rs
//! CV PDF generation handler
use crate::types::request::scalar_text;
use crate::types::DocumentRequest;
use crate::utils::attachment_filename;
use crate::web::types::{ApiError, PdfResponse, ServerState};
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, info_span, Instrument};

use super::helpers::request_id;

pub async fn generate_cv_handler(
    request: Json<DocumentRequest>,
    state: &State<ServerState>,
) -> Result<PdfResponse, ApiError> {
    let request = request.into_inner();

    let span = info_span!(
        "cv_generation",
        request_id = %request_id(),
        name = %request.display_name(),
        theme = %request.theme_name().unwrap_or("classic"),
    );

    async move {
        let document = state.mapper.map(&request);
        info!(
            "Document mapped, theme: {}, language: {}",
            document.design.theme,
            scalar_text(&document.locale.language)
        );

        match state.renderer.render(&document).await {
            Ok(pdf) => {
                let filename = attachment_filename(&request.display_name(), "pdf");
                info!(
                    "CV generation completed, pdf_size: {}, filename: {}",
                    pdf.data.len(),
                    filename
                );
                Ok(PdfResponse::with_filename(pdf.data, filename))
            }
            Err(e) => {
                error!("CV generation failed, code: {}, error: {}", e.code(), e);
                Err(ApiError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}
