//! Conversation entity - a thread between one contact and one channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Maximum length of the denormalized last-message preview
pub const PREVIEW_MAX_LEN: usize = 120;

/// Conversation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Open,
    Pending,
    Closed,
}

impl ConversationStatus {
    /// A conversation counts toward an agent's active load unless closed
    #[inline]
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConversationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "pending" => Ok(Self::Pending),
            "closed" => Ok(Self::Closed),
            other => Err(format!("invalid conversation status: {other}")),
        }
    }
}

/// Conversation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!("invalid priority: {other}")),
        }
    }
}

/// Conversation entity
///
/// At most one conversation per (contact, channel) pair is in a non-closed
/// state at a time; enforced by the find-or-open lookup, not a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub contact_id: Snowflake,
    pub channel_id: Snowflake,
    pub status: ConversationStatus,
    pub priority: Priority,
    pub assigned_agent_id: Option<Snowflake>,
    pub assigned_team_id: Option<Snowflake>,
    pub last_message: Option<String>,
    pub last_activity_at: DateTime<Utc>,
    pub unread_count: i32,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Open a new conversation for a (contact, channel) pair
    pub fn open(id: Snowflake, user_id: Snowflake, contact_id: Snowflake, channel_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            contact_id,
            channel_id,
            status: ConversationStatus::Open,
            priority: Priority::Medium,
            assigned_agent_id: None,
            assigned_team_id: None,
            last_message: None,
            last_activity_at: now,
            unread_count: 0,
            labels: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record an inbound message: refresh preview and activity, bump unread
    pub fn record_inbound(&mut self, content: &str) {
        self.last_message = Some(truncate_preview(content, PREVIEW_MAX_LEN));
        self.unread_count += 1;
        self.touch();
    }

    /// Record an outbound message: refresh preview and activity only
    pub fn record_outbound(&mut self, content: &str) {
        self.last_message = Some(truncate_preview(content, PREVIEW_MAX_LEN));
        self.touch();
    }

    /// Reset the unread counter after mark-read
    pub fn clear_unread(&mut self) {
        self.unread_count = 0;
        self.updated_at = Utc::now();
    }

    /// Assign an agent and/or team; assignment implicitly reopens
    pub fn assign(&mut self, agent_id: Option<Snowflake>, team_id: Option<Snowflake>) {
        if agent_id.is_some() {
            self.assigned_agent_id = agent_id;
        }
        if team_id.is_some() {
            self.assigned_team_id = team_id;
        }
        self.status = ConversationStatus::Open;
        self.updated_at = Utc::now();
    }

    /// Refresh activity and updated timestamps
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.last_activity_at = now;
        self.updated_at = now;
    }
}

/// Truncate preview text on a char boundary
fn truncate_preview(content: &str, max_len: usize) -> String {
    if content.len() <= max_len {
        return content.to_string();
    }
    let mut end = max_len;
    while !content.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    content[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Conversation {
        Conversation::open(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            Snowflake::new(30),
        )
    }

    #[test]
    fn test_open_defaults() {
        let c = conversation();
        assert_eq!(c.status, ConversationStatus::Open);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.unread_count, 0);
        assert!(c.assigned_agent_id.is_none());
    }

    #[test]
    fn test_record_inbound_bumps_unread() {
        let mut c = conversation();
        c.record_inbound("Hello");
        c.record_inbound("Anyone there?");
        assert_eq!(c.unread_count, 2);
        assert_eq!(c.last_message.as_deref(), Some("Anyone there?"));
    }

    #[test]
    fn test_record_outbound_leaves_unread() {
        let mut c = conversation();
        c.record_inbound("Hello");
        c.record_outbound("Hi, how can I help?");
        assert_eq!(c.unread_count, 1);
        assert_eq!(c.last_message.as_deref(), Some("Hi, how can I help?"));
    }

    #[test]
    fn test_assign_reopens_closed_conversation() {
        let mut c = conversation();
        c.status = ConversationStatus::Closed;
        c.assign(Some(Snowflake::new(7)), None);
        assert_eq!(c.status, ConversationStatus::Open);
        assert_eq!(c.assigned_agent_id, Some(Snowflake::new(7)));
        assert!(c.assigned_team_id.is_none());
    }

    #[test]
    fn test_clear_unread() {
        let mut c = conversation();
        c.record_inbound("a");
        c.clear_unread();
        assert_eq!(c.unread_count, 0);
    }

    #[test]
    fn test_status_is_active() {
        assert!(ConversationStatus::Open.is_active());
        assert!(ConversationStatus::Pending.is_active());
        assert!(!ConversationStatus::Closed.is_active());
    }

    #[test]
    fn test_preview_truncation() {
        let long = "x".repeat(PREVIEW_MAX_LEN + 50);
        let mut c = conversation();
        c.record_inbound(&long);
        assert_eq!(c.last_message.as_ref().unwrap().len(), PREVIEW_MAX_LEN);
    }

    #[test]
    fn test_preview_truncation_char_boundary() {
        // Multibyte content must not be split mid-character
        let content = "é".repeat(PREVIEW_MAX_LEN);
        let preview = truncate_preview(&content, PREVIEW_MAX_LEN);
        assert!(preview.len() <= PREVIEW_MAX_LEN);
        assert!(content.starts_with(&preview));
    }
}
