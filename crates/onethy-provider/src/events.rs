//! Webhook event envelope from the WhatsApp gateway
//!
//! The gateway delivers events as `{ "event": "...", "data": { ... } }` with
//! camelCase payload fields. Only `messages.upsert` and `connection.update`
//! are acted on; every other event name is accepted and ignored.

use onethy_core::{ChannelStatus, MessageType};
use serde::Deserialize;

/// Event name for inbound message delivery
pub const EVENT_MESSAGES_UPSERT: &str = "messages.upsert";
/// Event name for instance connection changes
pub const EVENT_CONNECTION_UPDATE: &str = "connection.update";

/// Top-level webhook envelope
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: EventData,
}

/// Event payload; fields are populated depending on the event name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
    #[serde(default)]
    pub connection: Option<ConnectionInfo>,
}

/// One inbound message from a `messages.upsert` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    pub key: MessageKey,
    #[serde(default)]
    pub message: Option<MessageContent>,
    #[serde(default)]
    pub push_name: Option<String>,
    #[serde(default)]
    pub message_timestamp: Option<i64>,
}

/// Provider-side message key
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    #[serde(default)]
    pub from_me: bool,
    pub remote_jid: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Message body variants; exactly one is normally present
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    #[serde(default)]
    pub conversation: Option<String>,
    #[serde(default)]
    pub extended_text_message: Option<ExtendedTextMessage>,
    #[serde(default)]
    pub image_message: Option<MediaMessage>,
    #[serde(default)]
    pub video_message: Option<MediaMessage>,
    #[serde(default)]
    pub audio_message: Option<MediaMessage>,
    #[serde(default)]
    pub document_message: Option<DocumentMessage>,
}

/// Quoted/extended text body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTextMessage {
    #[serde(default)]
    pub text: Option<String>,
}

/// Media body (image/video/audio)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMessage {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
}

/// Document body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMessage {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Connection payload of a `connection.update` event
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionInfo {
    pub state: String,
}

impl IncomingMessage {
    /// Extract display content and message type from the body variants.
    ///
    /// Media without a caption gets a bracketed placeholder so the ledger and
    /// the conversation preview stay readable.
    #[must_use]
    pub fn content_and_type(&self) -> (String, MessageType) {
        let Some(body) = &self.message else {
            return (String::new(), MessageType::Unknown);
        };

        if let Some(text) = &body.conversation {
            return (text.clone(), MessageType::Text);
        }
        if let Some(extended) = &body.extended_text_message {
            if let Some(text) = &extended.text {
                return (text.clone(), MessageType::Text);
            }
        }
        if let Some(image) = &body.image_message {
            let content = image.caption.clone().unwrap_or_else(|| "[image]".to_string());
            return (content, MessageType::Image);
        }
        if let Some(video) = &body.video_message {
            let content = video.caption.clone().unwrap_or_else(|| "[video]".to_string());
            return (content, MessageType::Video);
        }
        if body.audio_message.is_some() {
            return ("[audio]".to_string(), MessageType::Audio);
        }
        if let Some(document) = &body.document_message {
            let content = document
                .caption
                .clone()
                .or_else(|| document.file_name.clone())
                .unwrap_or_else(|| "[document]".to_string());
            return (content, MessageType::Document);
        }

        (String::new(), MessageType::Unknown)
    }
}

/// Map the gateway connection state vocabulary onto channel status.
///
/// `open|connecting|close` are the documented states; anything else marks the
/// channel errored rather than guessing.
#[must_use]
pub fn map_connection_state(state: &str) -> ChannelStatus {
    match state {
        "open" => ChannelStatus::Connected,
        "connecting" => ChannelStatus::Connecting,
        "close" => ChannelStatus::Disconnected,
        _ => ChannelStatus::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_messages_upsert() {
        let raw = r#"{
            "event": "messages.upsert",
            "data": {
                "messages": [{
                    "key": {"fromMe": false, "remoteJid": "5511999999999@s.whatsapp.net", "id": "ABC"},
                    "message": {"conversation": "Hello"},
                    "pushName": "Maria"
                }]
            }
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.event, EVENT_MESSAGES_UPSERT);

        let message = &envelope.data.messages[0];
        assert!(!message.key.from_me);
        assert_eq!(message.key.remote_jid, "5511999999999@s.whatsapp.net");
        assert_eq!(message.key.id.as_deref(), Some("ABC"));
        assert_eq!(message.push_name.as_deref(), Some("Maria"));

        let (content, message_type) = message.content_and_type();
        assert_eq!(content, "Hello");
        assert_eq!(message_type, MessageType::Text);
    }

    #[test]
    fn test_parse_connection_update() {
        let raw = r#"{"event": "connection.update", "data": {"connection": {"state": "open"}}}"#;
        let envelope: WebhookEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.event, EVENT_CONNECTION_UPDATE);
        let state = envelope.data.connection.unwrap().state;
        assert_eq!(map_connection_state(&state), ChannelStatus::Connected);
    }

    #[test]
    fn test_parse_unknown_event_with_empty_data() {
        let raw = r#"{"event": "qrcode.updated", "data": {}}"#;
        let envelope: WebhookEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.event, "qrcode.updated");
        assert!(envelope.data.messages.is_empty());
        assert!(envelope.data.connection.is_none());
    }

    #[test]
    fn test_connection_state_mapping() {
        assert_eq!(map_connection_state("open"), ChannelStatus::Connected);
        assert_eq!(map_connection_state("connecting"), ChannelStatus::Connecting);
        assert_eq!(map_connection_state("close"), ChannelStatus::Disconnected);
        assert_eq!(map_connection_state("refused"), ChannelStatus::Error);
    }

    #[test]
    fn test_image_without_caption_gets_placeholder() {
        let raw = r#"{
            "key": {"fromMe": false, "remoteJid": "551199@s.whatsapp.net"},
            "message": {"imageMessage": {"mimetype": "image/jpeg"}}
        }"#;
        let message: IncomingMessage = serde_json::from_str(raw).unwrap();
        let (content, message_type) = message.content_and_type();
        assert_eq!(content, "[image]");
        assert_eq!(message_type, MessageType::Image);
    }

    #[test]
    fn test_document_prefers_file_name() {
        let raw = r#"{
            "key": {"fromMe": false, "remoteJid": "551199@s.whatsapp.net"},
            "message": {"documentMessage": {"fileName": "invoice.pdf"}}
        }"#;
        let message: IncomingMessage = serde_json::from_str(raw).unwrap();
        let (content, message_type) = message.content_and_type();
        assert_eq!(content, "invoice.pdf");
        assert_eq!(message_type, MessageType::Document);
    }

    #[test]
    fn test_empty_body_is_unknown() {
        let raw = r#"{"key": {"fromMe": false, "remoteJid": "551199@s.whatsapp.net"}}"#;
        let message: IncomingMessage = serde_json::from_str(raw).unwrap();
        let (content, message_type) = message.content_and_type();
        assert!(content.is_empty());
        assert_eq!(message_type, MessageType::Unknown);
    }

    #[test]
    fn test_extended_text_message() {
        let raw = r#"{
            "key": {"fromMe": false, "remoteJid": "551199@s.whatsapp.net"},
            "message": {"extendedTextMessage": {"text": "quoted reply"}}
        }"#;
        let message: IncomingMessage = serde_json::from_str(raw).unwrap();
        let (content, message_type) = message.content_and_type();
        assert_eq!(content, "quoted reply");
        assert_eq!(message_type, MessageType::Text);
    }
}
