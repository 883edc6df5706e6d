//! Data models for portfolio records, derived documents and responses

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::FolioRagError;
use crate::errors::Result;

/// A single portfolio project entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A professional experience entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub description: String,
}

/// An achievement entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub date: String,
}

/// A social media link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub link: String,
}

/// The full portfolio data set, loaded once at startup and immutable
/// for the process lifetime.
///
/// Field access is strict: required fields missing from the JSON fail
/// deserialization with [`FolioRagError::MalformedRecord`] so a corrupt
/// corpus is rejected at startup rather than served.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

impl Portfolio {
    /// Load portfolio data from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse portfolio data from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| FolioRagError::MalformedRecord(e.to_string()))
    }
}

/// Static resume reference served by the resume intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRef {
    pub filename: String,
    pub url: String,
}

/// Document category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Project,
    Skills,
    Experience,
    Achievement,
    Socials,
}

impl DocType {
    /// Stable lowercase name used in source attributions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Achievement => "achievement",
            Self::Socials => "socials",
        }
    }
}

/// A searchable text unit derived from one portfolio record (or one
/// aggregate collection for skills/socials).
///
/// The corpus of documents is built once at engine construction; a
/// document's position in that sequence is its identity in the index.
#[derive(Debug, Clone)]
pub struct Document {
    pub doc_type: DocType,
    pub content: String,
    pub metadata: serde_json::Value,
}

/// Source attribution for a retrieved document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub metadata: serde_json::Value,
}

/// Structured payload returned by intent short-circuits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredData {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
}

/// Final answer bundle returned for every well-formed query, on both the
/// router path (structured payload, empty sources) and the RAG path
/// (free-text answer, retrieved sources, no structured payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResponse {
    pub response: String,
    pub sources: Vec<Source>,
    pub structured_data: Option<StructuredData>,
}
