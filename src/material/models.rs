use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// The seven document kinds every completed job produces, in generation
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Foundation,
    Slides,
    Facilitator,
    Participant,
    Activities,
    Evaluation,
    Resources,
}

impl MaterialType {
    pub const ALL: [MaterialType; 7] = [
        Self::Foundation,
        Self::Slides,
        Self::Facilitator,
        Self::Participant,
        Self::Activities,
        Self::Evaluation,
        Self::Resources,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Slides => "slides",
            Self::Facilitator => "facilitator",
            Self::Participant => "participant",
            Self::Activities => "activities",
            Self::Evaluation => "evaluation",
            Self::Resources => "resources",
        }
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown material type '{s}'"))
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output file format of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MaterialFormat {
    Docx,
    Pptx,
    Pdf,
}

impl MaterialFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Pdf => "pdf",
        }
    }

    /// File extension used for storage paths and download filenames.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Content type served by the download gateway.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Pdf => "application/pdf",
        }
    }
}

impl FromStr for MaterialFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docx" => Ok(Self::Docx),
            "pptx" => Ok(Self::Pptx),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unknown material format '{other}'")),
        }
    }
}

impl fmt::Display for MaterialFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated document belonging to a job.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Material {
    pub id: Uuid,
    pub job_id: Uuid,
    pub material_type: MaterialType,
    #[schema(example = "Facilitator Guide")]
    pub name: String,
    /// Plain-text mirror of the generated document, kept for preview.
    pub content: Option<String>,
    pub format: MaterialFormat,
    #[schema(example = 3)]
    pub step_number: i16,
    pub storage_path: String,
    pub download_url: Option<String>,
    /// Fixed at creation time + TTL; the download gateway authorizes
    /// against this field, not against the storage signature.
    pub download_expiry: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Material {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        job_id: Uuid,
        material_type: MaterialType,
        name: String,
        content: Option<String>,
        format: MaterialFormat,
        step_number: i16,
        storage_path: String,
        download_url: Option<String>,
        ttl_hours: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            job_id,
            material_type,
            name,
            content,
            format,
            step_number,
            storage_path,
            download_url,
            download_expiry: now + Duration::hours(ttl_hours),
            created_at: now,
        }
    }
}
