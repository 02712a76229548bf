#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use chrono::TimeZone;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A single group chat message as returned by the server. Messages arrive
/// ordered by `created_at` ascending and are never re-sorted or mutated on
/// the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub user_name: String,
    pub message: String,
    pub created_at: String,
}

impl ChatMessage {
    pub fn new(session_id: &str, user_id: &str, user_name: &str, text: &str) -> ChatMessage {
        return ChatMessage {
            id: "".to_string(),
            session_id: session_id.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            message: text.to_string().replace('\t', "  "),
            created_at: "".to_string(),
        };
    }

    /// Avatar initials derived from the sender name. One character per
    /// whitespace separated token, uppercased, at most two. Single token
    /// names yield a single initial.
    pub fn initials(&self) -> String {
        return self
            .user_name
            .split_whitespace()
            .filter_map(|part| {
                return part.chars().next();
            })
            .collect::<String>()
            .to_uppercase()
            .chars()
            .take(2)
            .collect();
    }

    /// Localized hour:minute AM/PM label for the message. Falls back to the
    /// raw `created_at` string when the server hands back something that
    /// isn't RFC 3339.
    pub fn timestamp(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(parsed) => return clock_label(&parsed.with_timezone(&Local)),
            Err(_) => return self.created_at.to_string(),
        }
    }
}

pub(crate) fn clock_label<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    return datetime.format("%-I:%M %p").to_string();
}
