use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lowercased form used for directory and package segments.
    pub fn as_segment(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.pad(label)
    }
}

/// One row of the remote problem listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "frontendQuestionId", deserialize_with = "deserialize_id")]
    pub id: u32,
    pub title: String,
    pub title_slug: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub status: Option<String>,
}

impl Problem {
    pub fn is_solved(&self) -> bool {
        self.status.as_deref() == Some("ac")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Id the code was actually fetched with; differs from the listing id after a fallback.
    pub question_id: u32,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Submission),
    NotFound,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFile {
    pub problem: Problem,
    pub category: String,
    pub class_name: String,
    /// `<category>/<difficulty>`, lowercased.
    pub directory: String,
    pub relative_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
    pub collisions: usize,
}

/// LeetCode sends ids as JSON strings ("1"); accept plain numbers too.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u32),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
