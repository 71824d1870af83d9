// src/web/handlers/system_handlers.rs
use crate::types::Theme;
use crate::web::types::*;

use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use tracing::{debug, info};

const INDEX_TEMPLATE: &str = include_str!("../../../static/index.html");

/// Replace `{{key}}` placeholders
pub fn process_variables(content: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(content.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{}}}}}", key), value)
    })
}

fn theme_options() -> String {
    Theme::ALL
        .iter()
        .map(|theme| {
            let selected = if *theme == Theme::default() { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", theme, selected)
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

pub async fn index_handler() -> RawHtml<String> {
    debug!("Serving form page");
    RawHtml(process_variables(
        INDEX_TEMPLATE,
        &[("theme_options", theme_options())],
    ))
}

pub async fn get_themes_handler() -> Json<ThemesResponse> {
    let themes = Theme::ALL
        .iter()
        .map(|theme| ThemeInfo {
            name: theme.to_string(),
            preview_url: format!("/preview/{}", theme),
            preview_file: theme.preview_filename().to_string(),
        })
        .collect();

    Json(ThemesResponse {
        themes,
        default: Theme::default().to_string(),
    })
}

pub async fn health_handler() -> Json<&'static str> {
    info!("Health check");
    Json("OK")
}
