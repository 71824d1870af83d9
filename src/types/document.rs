// src/types/document.rs
//! Document structure in the shape rendercv expects

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Top-level document. Field order is the YAML key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub cv: Cv,
    pub design: Design,
    pub locale: Locale,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cv {
    pub name: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_networks: Option<Vec<SocialNetwork>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Sections>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialNetwork {
    pub network: String,
    pub username: Value,
}

impl SocialNetwork {
    pub fn new(network: &str, username: impl Into<Value>) -> Self {
        Self {
            network: network.to_string(),
            username: username.into(),
        }
    }
}

/// Section bodies under their fixed output titles
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    #[serde(rename = "resumen", skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(rename = "experiencia", skip_serializing_if = "Option::is_none")]
    pub experience: Option<Value>,
    #[serde(rename = "educación", skip_serializing_if = "Option::is_none")]
    pub education: Option<Value>,
    #[serde(rename = "proyectos", skip_serializing_if = "Option::is_none")]
    pub projects: Option<Value>,
    #[serde(rename = "skills", skip_serializing_if = "Option::is_none")]
    pub skills: Option<Value>,
}

impl Sections {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.experience.is_none()
            && self.education.is_none()
            && self.projects.is_none()
            && self.skills.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Locale {
    pub language: Value,
}

impl Document {
    /// Serialize to YAML, keys in declaration order, non-ASCII text left as-is
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize document to YAML")
    }
}

/// Layout themes understood by rendercv
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Moderncv,
    Sb2nov,
    Engineeringclassic,
    Engineeringresumes,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Classic,
        Theme::Moderncv,
        Theme::Sb2nov,
        Theme::Engineeringclassic,
        Theme::Engineeringresumes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Moderncv => "moderncv",
            Theme::Sb2nov => "sb2nov",
            Theme::Engineeringclassic => "engineeringclassic",
            Theme::Engineeringresumes => "engineeringresumes",
        }
    }

    /// Sample PDF shipped for the theme preview
    pub fn preview_filename(&self) -> &'static str {
        match self {
            Theme::Classic => "John_Doe_ClassicTheme_CV.pdf",
            Theme::Moderncv => "John_Doe_ModerncvTheme_CV.pdf",
            Theme::Sb2nov => "John_Doe_Sb2novTheme_CV.pdf",
            Theme::Engineeringclassic => "John_Doe_EngineeringclassicTheme_CV.pdf",
            Theme::Engineeringresumes => "John_Doe_EngineeringresumesTheme_CV.pdf",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let requested = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == requested)
            .ok_or_else(|| anyhow::anyhow!("Unsupported theme: {}", s))
    }
}
