// src/web/handlers/cv_handlers/mod.rs
//! CV handlers: PDF rendering and YAML download

pub mod generate;
pub mod helpers;
pub mod yaml;

pub use generate::generate_cv_handler;
pub use yaml::generate_yaml_handler;
