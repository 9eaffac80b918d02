//! Message entity <-> model mapper

use onethy_core::{DeliveryStatus, Message, MessageType, Snowflake};

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            from_me: model.from_me,
            content: model.content,
            message_type: model.message_type.parse().unwrap_or(MessageType::Unknown),
            status: model.status.parse().unwrap_or(DeliveryStatus::Sent),
            external_id: model.external_id,
            push_name: model.push_name,
            provider_timestamp: model.provider_timestamp,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_status_roundtrip() {
        let model = MessageModel {
            id: 1,
            conversation_id: 2,
            from_me: false,
            content: "Hello".to_string(),
            message_type: "text".to_string(),
            status: "delivered".to_string(),
            external_id: Some("ABC".to_string()),
            push_name: Some("Maria".to_string()),
            provider_timestamp: None,
            created_at: Utc::now(),
        };
        let message = Message::from(model);
        assert_eq!(message.status, DeliveryStatus::Delivered);
        assert_eq!(message.message_type, MessageType::Text);
        assert!(!message.from_me);
    }
}
