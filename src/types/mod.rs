pub mod document;
pub mod request;

pub use document::{Cv, Design, Document, Locale, Sections, SocialNetwork, Theme};
pub use request::DocumentRequest;
