// src/web/handlers/cv_handlers/helpers.rs
//! Shared utility functions for CV handlers

use uuid::Uuid;

/// Correlation id attached to request spans
pub fn request_id() -> String {
    Uuid::new_v4().simple().to_string()
}
