// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::config::StudioConfig;
use crate::types::DocumentRequest;
use anyhow::Result;
use rocket::fs::NamedFile;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Request, Rocket, State};
use tracing::{error, info};

#[get("/")]
pub async fn index() -> RawHtml<String> {
    handlers::index_handler().await
}

#[get("/preview/<theme>")]
pub async fn get_preview(theme: &str, state: &State<ServerState>) -> Result<NamedFile, ApiError> {
    handlers::get_preview_handler(theme, state).await
}

#[post("/generate", data = "<request>")]
pub async fn generate_cv(
    request: Json<DocumentRequest>,
    state: &State<ServerState>,
) -> Result<PdfResponse, ApiError> {
    handlers::generate_cv_handler(request, state).await
}

#[post("/generate-yaml", data = "<request>")]
pub async fn generate_yaml(
    request: Json<DocumentRequest>,
    state: &State<ServerState>,
) -> Result<YamlResponse, ApiError> {
    handlers::generate_yaml_handler(request, state).await
}

#[get("/themes")]
pub async fn get_themes() -> Json<ThemesResponse> {
    handlers::get_themes_handler().await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request format", "BAD_REQUEST"))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        format!("No route for {}", request.uri().path()),
        "NOT_FOUND",
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Request JSON does not match the form fields",
        "UNPROCESSABLE_ENTITY",
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error", "INTERNAL_ERROR"))
}

/// Assemble the application without launching it
pub fn build_rocket(config: &StudioConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address.clone()))
        .merge(("port", config.port));

    let state = ServerState {
        mapper: config.mapper(),
        renderer: config.renderer(),
        previews_dir: config.previews_dir.clone(),
    };

    rocket::custom(figment)
        .manage(state)
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                unprocessable_entity,
                internal_error
            ],
        )
        .mount(
            "/",
            routes![
                index,
                get_preview,
                generate_cv,
                generate_yaml,
                get_themes,
                health
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: StudioConfig) -> Result<()> {
    info!("Starting CV Studio server");
    info!("Server: http://{}:{}", config.address, config.port);
    info!("Previews: {}", config.previews_dir.display());
    info!(
        "Renderer: {} (timeout: {:?}, contact fields: {:?})",
        config.renderer_command.join(" "),
        config.render_timeout(),
        config.contact_fields
    );

    if let Err(e) = build_rocket(&config).launch().await {
        error!("Server failed: {}", e);
        return Err(anyhow::anyhow!("Server failed: {}", e));
    }

    Ok(())
}
