//! Contact entity - tenant-scoped identity for a message sender

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Contact entity
///
/// (user_id, phone) is unique per tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Create a new Contact
    pub fn new(id: Snowflake, user_id: Snowflake, name: String, phone: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            phone,
            email: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a contact from a first inbound message.
    ///
    /// Falls back to the phone number when the provider supplied no push-name.
    pub fn from_inbound(
        id: Snowflake,
        user_id: Snowflake,
        phone: &str,
        push_name: Option<&str>,
    ) -> Self {
        let name = push_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(phone)
            .to_string();
        Self::new(id, user_id, name, phone.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_inbound_uses_push_name() {
        let c = Contact::from_inbound(
            Snowflake::new(1),
            Snowflake::new(10),
            "5511999999999",
            Some("Maria"),
        );
        assert_eq!(c.name, "Maria");
        assert_eq!(c.phone, "5511999999999");
    }

    #[test]
    fn test_from_inbound_falls_back_to_phone() {
        let c = Contact::from_inbound(Snowflake::new(1), Snowflake::new(10), "5511999999999", None);
        assert_eq!(c.name, "5511999999999");
    }

    #[test]
    fn test_from_inbound_ignores_blank_push_name() {
        let c = Contact::from_inbound(
            Snowflake::new(1),
            Snowflake::new(10),
            "5511999999999",
            Some("   "),
        );
        assert_eq!(c.name, "5511999999999");
    }
}
