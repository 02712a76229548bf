#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::validate_required;

pub const MEETING_TYPES: [&str; 3] = ["on_campus", "off_campus", "online"];

/// A scheduled study meetup with capacity limits, owned by the server.
/// Distinct from a login session. The chat controller treats these as
/// immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub title: String,
    pub course_code: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub meeting_type: String,
    pub max_capacity: i64,
    pub current_capacity: i64,
    pub creator_id: String,
    pub creator_name: String,
    pub is_full: bool,
}

impl StudySession {
    pub fn capacity_label(&self) -> String {
        return format!("{}/{}", self.current_capacity, self.max_capacity);
    }

    pub fn meeting_type_label(&self) -> String {
        return self.meeting_type.replace('_', " ").to_uppercase();
    }
}

/// Payload for posting a new session. The caller becomes its creator and
/// first member.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
    pub course_code: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub meeting_type: String,
    pub max_capacity: i64,
}

impl CreateSessionRequest {
    pub fn validate(&self) -> Result<()> {
        validate_required("Title", &self.title)?;
        validate_required("Course code", &self.course_code)?;
        validate_required("Date", &self.date)?;
        validate_required("Time", &self.time)?;
        validate_required("Location", &self.location)?;

        if !MEETING_TYPES.contains(&self.meeting_type.as_str()) {
            bail!(format!(
                "Meeting type must be one of {}",
                MEETING_TYPES.join(", ")
            ));
        }

        if self.max_capacity <= 0 {
            bail!("Max capacity must be greater than zero");
        }

        return Ok(());
    }
}
