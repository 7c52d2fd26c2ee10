use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of generation steps for every job.
pub const TOTAL_STEPS: i16 = 7;

/// Lifecycle state of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown job status '{other}'")),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content locale for generated materials.
///
/// Unknown language tags deserialize to the default locale instead of
/// failing: a bad `language` value must never fail a whole job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Language {
    En,
    Id,
}

impl Language {
    /// Deterministic mapping from a free-form tag; falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" | "indonesian" => Self::Id,
            _ => Self::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Proficiency level the course targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// Audience the course is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Managers,
    Employees,
    Students,
    Trainers,
    General,
}

/// Voice the materials are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Academic,
    Casual,
}

/// Delivery setting the course runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrainingContext {
    Corporate,
    Academic,
    Community,
    Online,
}

/// Generation parameters captured at job creation and carried unchanged
/// through retries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobMetadata {
    #[schema(example = "en")]
    pub language: Language,
    #[schema(example = "Negotiation")]
    pub subject: String,
    #[schema(example = "corporate")]
    pub context: TrainingContext,
    #[schema(example = "intermediate")]
    pub level: Level,
    #[schema(example = "managers")]
    pub audience: Audience,
    #[schema(example = "2h")]
    pub duration: String,
    #[schema(example = "professional")]
    pub tone: Tone,
}

impl JobMetadata {
    /// Validate the free-text fields. The enum fields are already closed
    /// at deserialization time.
    pub fn validate(&self) -> Result<(), String> {
        if self.subject.trim().is_empty() {
            return Err("subject must not be empty".to_string());
        }
        if self.duration.trim().is_empty() {
            return Err("duration must not be empty".to_string());
        }
        Ok(())
    }
}

/// One user-initiated generation request and its lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Job {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub status: JobStatus,
    #[schema(example = 43)]
    pub progress_percent: i16,
    #[schema(example = "generating Facilitator Guide")]
    pub status_message: String,
    pub error: Option<String>,
    pub current_step: Option<i16>,
    pub total_steps: i16,
    pub step_name: Option<String>,
    pub metadata: JobMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Build a fresh pending job for the given owner.
    pub fn new(owner_id: Uuid, metadata: JobMetadata) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            status: JobStatus::Pending,
            progress_percent: 0,
            status_message: "queued".to_string(),
            error: None,
            current_step: None,
            total_steps: TOTAL_STEPS,
            step_name: None,
            metadata,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}

/// Payload for `POST /api/jobs`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateJobRequest {
    pub metadata: JobMetadata,
}
