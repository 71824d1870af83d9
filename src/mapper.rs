// src/mapper.rs
//! Form submission to rendercv document mapping

use crate::types::request::present;
use crate::types::{Cv, Design, Document, DocumentRequest, Locale, Sections, SocialNetwork, Theme};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_LANGUAGE: &str = "spanish";

/// How empty contact fields (location, email, phone, website) are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactFields {
    /// Leave the key out when the value is missing or empty
    #[default]
    Omit,
    /// Always write the key, as an empty string when missing
    Always,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentMapper {
    contact_fields: ContactFields,
}

impl DocumentMapper {
    pub fn new(contact_fields: ContactFields) -> Self {
        Self { contact_fields }
    }

    pub fn contact_fields(&self) -> ContactFields {
        self.contact_fields
    }

    pub fn map(&self, request: &DocumentRequest) -> Document {
        Document {
            cv: Cv {
                name: request
                    .name
                    .clone()
                    .filter(|v| !v.is_null())
                    .unwrap_or_else(|| Value::from("")),
                headline: present(&request.headline).cloned(),
                location: self.contact(&request.location),
                email: self.contact(&request.email),
                phone: self.contact(&request.phone),
                website: self.contact(&request.website),
                social_networks: social_networks(request),
                sections: sections(request),
            },
            design: Design {
                theme: theme_for(request.theme.as_ref()),
            },
            locale: Locale {
                language: request
                    .language
                    .clone()
                    .filter(|v| !v.is_null())
                    .unwrap_or_else(|| Value::from(DEFAULT_LANGUAGE)),
            },
        }
    }

    fn contact(&self, value: &Option<Value>) -> Option<Value> {
        match (present(value), self.contact_fields) {
            (Some(v), _) => Some(v.clone()),
            (None, ContactFields::Always) => Some(Value::from("")),
            (None, ContactFields::Omit) => None,
        }
    }
}

fn theme_for(theme: Option<&Value>) -> Theme {
    match theme {
        None | Some(Value::Null) => Theme::default(),
        Some(Value::String(name)) => resolve_theme(Some(name)),
        Some(other) => {
            warn!("Theme sent as {}, using {}", other, Theme::default());
            Theme::default()
        }
    }
}

/// Requested theme, falling back to classic for missing or unknown names
pub fn resolve_theme(theme: Option<&str>) -> Theme {
    match theme {
        None => Theme::default(),
        Some(name) => name.parse().unwrap_or_else(|_| {
            warn!("Unknown theme '{}', using {}", name, Theme::default());
            Theme::default()
        }),
    }
}

fn social_networks(request: &DocumentRequest) -> Option<Vec<SocialNetwork>> {
    let networks: Vec<SocialNetwork> = [("LinkedIn", &request.linkedin), ("GitHub", &request.github)]
        .into_iter()
        .filter_map(|(network, handle)| {
            present(handle).map(|username| SocialNetwork::new(network, username.clone()))
        })
        .collect();

    (!networks.is_empty()).then_some(networks)
}

fn sections(request: &DocumentRequest) -> Option<Sections> {
    let pick = |value: &Option<Value>| present(value).cloned();

    let sections = Sections {
        summary: pick(&request.summary),
        experience: pick(&request.experience),
        education: pick(&request.education),
        projects: pick(&request.projects),
        skills: pick(&request.skills),
    };

    (!sections.is_empty()).then_some(sections)
}
