//! Channel entity <-> model mapper

use onethy_core::{Channel, ChannelStatus, ChannelType, Snowflake};

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            channel_type: ChannelType::from(model.channel_type.as_str()),
            status: model.status.parse().unwrap_or(ChannelStatus::Error),
            instance_name: model.instance_name,
            webhook_token: model.webhook_token,
            message_count: model.message_count,
            last_activity_at: model.last_activity_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_unknown_status_maps_to_error() {
        let model = ChannelModel {
            id: 1,
            user_id: 2,
            name: "Support".to_string(),
            channel_type: "whatsapp".to_string(),
            status: "bogus".to_string(),
            instance_name: "support-main".to_string(),
            webhook_token: "tok".to_string(),
            message_count: 0,
            last_activity_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let channel = Channel::from(model);
        assert_eq!(channel.status, ChannelStatus::Error);
    }
}
