// src/web/handlers/cv_handlers/yaml.rs
//! YAML download handler, no renderer involved
use crate::types::DocumentRequest;
use crate::utils::attachment_filename;
use crate::web::types::{ApiError, ServerState, YamlResponse};
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, info_span};

use super::helpers::request_id;

pub async fn generate_yaml_handler(
    request: Json<DocumentRequest>,
    state: &State<ServerState>,
) -> Result<YamlResponse, ApiError> {
    let request = request.into_inner();
    let span = info_span!("yaml_generation", request_id = %request_id());
    let _enter = span.enter();

    let document = state.mapper.map(&request);
    let content = document.to_yaml().map_err(|e| {
        error!("YAML serialization failed: {:#}", e);
        ApiError::internal(e.to_string(), "SERIALIZE_ERROR")
    })?;

    let filename = attachment_filename(&request.display_name(), "yaml");
    info!("YAML generated, size: {}, filename: {}", content.len(), filename);

    Ok(YamlResponse { content, filename })
}
