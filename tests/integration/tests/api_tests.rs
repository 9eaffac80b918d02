//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, seed_channel, TestServer,
};
use onethy_core::Snowflake;
use reqwest::StatusCode;

/// Spawn a server plus a fresh tenant with a seeded channel
async fn setup() -> (TestServer, Snowflake, String, onethy_core::Channel) {
    let server = TestServer::start().await.expect("Failed to start server");
    let user_id = test_id();
    let token = server.issue_token(user_id).expect("Failed to issue token");
    let channel = seed_channel(user_id).await.expect("Failed to seed channel");
    (server, user_id, token, channel)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_api_requires_bearer_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/contacts").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_api_rejects_garbage_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_auth("/api/v1/contacts", "not-a-real-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Webhook Ingestion Tests
// ============================================================================

#[tokio::test]
async fn test_webhook_unknown_token_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let payload = messages_upsert("5511999990000", "Nobody", "Hello");
    let response = server
        .post("/webhook/no-such-token", &payload)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_first_inbound_message_creates_contact_and_conversation() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();

    // First message from a never-seen sender
    let payload = messages_upsert(&phone, "Maria", "Hello");
    let response = server
        .post(&format!("/webhook/{}", channel.webhook_token), &payload)
        .await
        .unwrap();
    let ack: WebhookAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);

    // Exactly one contact, named from the push name
    let response = server
        .get_auth(&format!("/api/v1/contacts?search={phone}"), &token)
        .await
        .unwrap();
    let contacts: Vec<ContactResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "Maria");
    assert_eq!(contacts[0].phone, phone);

    // Exactly one open conversation on that channel with one unread
    let response = server
        .get_auth(
            &format!("/api/v1/conversations?channel_id={}", channel.id),
            &token,
        )
        .await
        .unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations.len(), 1);
    let conversation = &conversations[0];
    assert_eq!(conversation.status, "open");
    assert_eq!(conversation.priority, "medium");
    assert_eq!(conversation.unread_count, 1);
    assert_eq!(conversation.last_message.as_deref(), Some("Hello"));
    assert_eq!(conversation.contact_id, contacts[0].id);

    // The ledger holds the inbound message as delivered
    let response = server
        .get_auth(
            &format!("/api/v1/conversations/{}/messages", conversation.id),
            &token,
        )
        .await
        .unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Hello");
    assert!(!messages[0].from_me);
    assert_eq!(messages[0].status, "delivered");
    assert_eq!(messages[0].push_name.as_deref(), Some("Maria"));
}

#[tokio::test]
async fn test_second_inbound_message_reuses_conversation() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();
    let webhook_path = format!("/webhook/{}", channel.webhook_token);

    for text in ["First", "Second"] {
        let payload = messages_upsert(&phone, "Maria", text);
        let response = server.post(&webhook_path, &payload).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .get_auth(
            &format!("/api/v1/conversations?channel_id={}", channel.id),
            &token,
        )
        .await
        .unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    // No duplicate; one unread per message
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].unread_count, 2);
    assert_eq!(conversations[0].last_message.as_deref(), Some("Second"));

    // The seeded channel counted both exchanges
    let response = server
        .get_auth(&format!("/api/v1/channels/{}", channel.id), &token)
        .await
        .unwrap();
    let fetched: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.message_count, 2);
}

#[tokio::test]
async fn test_self_echo_is_skipped() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();

    let payload = messages_upsert_from_me(&phone, "Our own reply");
    let response = server
        .post(&format!("/webhook/{}", channel.webhook_token), &payload)
        .await
        .unwrap();
    let ack: WebhookAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);

    // No contact and no conversation were created
    let response = server
        .get_auth(&format!("/api/v1/contacts?search={phone}"), &token)
        .await
        .unwrap();
    let contacts: Vec<ContactResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(contacts.is_empty());
}

#[tokio::test]
async fn test_webhook_swallows_malformed_payload() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, _token, channel) = setup().await;

    // messages.upsert with a message missing its required key fields
    let payload = serde_json::json!({
        "event": "messages.upsert",
        "data": {"messages": [{"key": {"fromMe": false}}]}
    });
    let response = server
        .post(&format!("/webhook/{}", channel.webhook_token), &payload)
        .await
        .unwrap();
    let ack: WebhookAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);
}

#[tokio::test]
async fn test_webhook_ignores_unknown_event() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, _token, channel) = setup().await;

    let payload = serde_json::json!({"event": "qrcode.updated", "data": {}});
    let response = server
        .post(&format!("/webhook/{}", channel.webhook_token), &payload)
        .await
        .unwrap();
    let ack: WebhookAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);
}

#[tokio::test]
async fn test_connection_update_sets_channel_status() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;

    let response = server
        .post(
            &format!("/webhook/{}", channel.webhook_token),
            &connection_update("open"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/channels/{}", channel.id), &token)
        .await
        .unwrap();
    let fetched: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.status, "connected");

    // And back down when the session closes
    let response = server
        .post(
            &format!("/webhook/{}", channel.webhook_token),
            &connection_update("close"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/channels/{}", channel.id), &token)
        .await
        .unwrap();
    let fetched: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.status, "disconnected");
}

// ============================================================================
// Conversation Tests
// ============================================================================

/// Deliver one inbound message and return the resulting conversation
async fn ingest_message(
    server: &TestServer,
    token: &str,
    channel: &onethy_core::Channel,
    phone: &str,
    text: &str,
) -> ConversationResponse {
    let payload = messages_upsert(phone, "Maria", text);
    let response = server
        .post(&format!("/webhook/{}", channel.webhook_token), &payload)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/conversations?channel_id={}", channel.id),
            token,
        )
        .await
        .unwrap();
    let mut conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!conversations.is_empty());
    conversations.remove(0)
}

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();
    let conversation = ingest_message(&server, &token, &channel, &phone, "Hello").await;
    assert_eq!(conversation.unread_count, 1);

    // First call moves the inbound message to read
    let read_path = format!("/api/v1/conversations/{}/read", conversation.id);
    let response = server.post_auth(&read_path, &token, &()).await.unwrap();
    let result: MarkReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.updated, 1);

    // Second call is a no-op
    let response = server.post_auth(&read_path, &token, &()).await.unwrap();
    let result: MarkReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.updated, 0);

    // Terminal state either way: unread 0, messages read
    let response = server
        .get_auth(
            &format!("/api/v1/conversations/{}", conversation.id),
            &token,
        )
        .await
        .unwrap();
    let fetched: ConversationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.unread_count, 0);

    let response = server
        .get_auth(
            &format!("/api/v1/conversations/{}/messages", conversation.id),
            &token,
        )
        .await
        .unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(messages.iter().all(|m| m.status == "read"));
}

#[tokio::test]
async fn test_update_conversation_is_partial() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();
    let conversation = ingest_message(&server, &token, &channel, &phone, "Hello").await;

    // Change only the priority; status must survive
    let response = server
        .patch_auth(
            &format!("/api/v1/conversations/{}", conversation.id),
            &token,
            &serde_json::json!({"priority": "urgent"}),
        )
        .await
        .unwrap();
    let updated: ConversationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.priority, "urgent");
    assert_eq!(updated.status, "open");

    // Change only the status
    let response = server
        .patch_auth(
            &format!("/api/v1/conversations/{}", conversation.id),
            &token,
            &serde_json::json!({"status": "pending"}),
        )
        .await
        .unwrap();
    let updated: ConversationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.status, "pending");
    assert_eq!(updated.priority, "urgent");
}

#[tokio::test]
async fn test_manual_assignment_reopens_conversation() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();
    let conversation = ingest_message(&server, &token, &channel, &phone, "Hello").await;

    // Close it first
    let response = server
        .patch_auth(
            &format!("/api/v1/conversations/{}", conversation.id),
            &token,
            &serde_json::json!({"status": "closed"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Create an agent to assign
    let agent_req = CreateAgentRequest::unique();
    let response = server
        .post_auth("/api/v1/agents", &token, &agent_req)
        .await
        .unwrap();
    let agent: AgentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Assignment forces the conversation back to open
    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/assign", conversation.id),
            &token,
            &serde_json::json!({"agent_id": agent.id}),
        )
        .await
        .unwrap();
    let assigned: ConversationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(assigned.status, "open");
    assert_eq!(assigned.assigned_agent_id.as_deref(), Some(agent.id.as_str()));
}

#[tokio::test]
async fn test_auto_assign_requires_online_agent() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();
    let conversation = ingest_message(&server, &token, &channel, &phone, "Hello").await;

    // Team with one member who has no presence recorded
    let team_req = CreateTeamRequest::unique();
    let response = server
        .post_auth("/api/v1/teams", &token, &team_req)
        .await
        .unwrap();
    let team: TeamResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let agent_req = CreateAgentRequest::unique();
    let response = server
        .post_auth("/api/v1/agents", &token, &agent_req)
        .await
        .unwrap();
    let agent: AgentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/teams/{}/members", team.id),
            &token,
            &serde_json::json!({"agent_id": agent.id}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Nobody online: conflict
    let auto_assign_path = format!("/api/v1/conversations/{}/auto-assign", conversation.id);
    let body = serde_json::json!({"team_id": team.id});
    let response = server.post_auth(&auto_assign_path, &token, &body).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "NO_AGENT_AVAILABLE");

    // Bring the agent online and retry
    let response = server
        .put_auth(
            &format!("/api/v1/agents/{}/presence", agent.id),
            &token,
            &serde_json::json!({"status": "online"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_auth(&auto_assign_path, &token, &body).await.unwrap();
    let assigned: ConversationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(assigned.status, "open");
    assert_eq!(assigned.assigned_agent_id.as_deref(), Some(agent.id.as_str()));
    assert_eq!(assigned.assigned_team_id.as_deref(), Some(team.id.as_str()));
}

// ============================================================================
// Contact Tests
// ============================================================================

#[tokio::test]
async fn test_contact_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.issue_token(test_id()).unwrap();

    // Create
    let request = CreateContactRequest::unique();
    let response = server
        .post_auth("/api/v1/contacts", &token, &request)
        .await
        .unwrap();
    let contact: ContactResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(contact.name, request.name);
    assert_eq!(contact.phone, request.phone);

    // Get
    let response = server
        .get_auth(&format!("/api/v1/contacts/{}", contact.id), &token)
        .await
        .unwrap();
    let fetched: ContactResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, contact.id);

    // Partial update
    let response = server
        .patch_auth(
            &format!("/api/v1/contacts/{}", contact.id),
            &token,
            &serde_json::json!({"notes": "VIP customer"}),
        )
        .await
        .unwrap();
    let updated: ContactResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.notes.as_deref(), Some("VIP customer"));
    assert_eq!(updated.name, request.name);

    // Delete
    let response = server
        .delete_auth(&format!("/api/v1/contacts/{}", contact.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Verify deleted
    let response = server
        .get_auth(&format!("/api/v1/contacts/{}", contact.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_contact_phone_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.issue_token(test_id()).unwrap();

    let request = CreateContactRequest::unique();
    let response = server
        .post_auth("/api/v1/contacts", &token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/api/v1/contacts", &token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_contact_deletion_blocked_by_open_conversation() {
    if !check_test_env().await {
        return;
    }

    let (server, _user_id, token, channel) = setup().await;
    let phone = unique_phone();
    let conversation = ingest_message(&server, &token, &channel, &phone, "Hello").await;

    // The webhook-created contact has an open conversation
    let contact_path = format!("/api/v1/contacts/{}", conversation.contact_id);
    let response = server.delete_auth(&contact_path, &token).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Close the conversation and the deletion goes through
    let response = server
        .patch_auth(
            &format!("/api/v1/conversations/{}", conversation.id),
            &token,
            &serde_json::json!({"status": "closed"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.delete_auth(&contact_path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_contacts_are_tenant_scoped() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token_a = server.issue_token(test_id()).unwrap();
    let token_b = server.issue_token(test_id()).unwrap();

    let request = CreateContactRequest::unique();
    let response = server
        .post_auth("/api/v1/contacts", &token_a, &request)
        .await
        .unwrap();
    let contact: ContactResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Another tenant cannot see it
    let response = server
        .get_auth(&format!("/api/v1/contacts/{}", contact.id), &token_b)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Macro Tests
// ============================================================================

#[tokio::test]
async fn test_macro_crud_and_shortcut_uniqueness() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.issue_token(test_id()).unwrap();

    let request = CreateMacroRequest::unique();
    let response = server
        .post_auth("/api/v1/macros", &token, &request)
        .await
        .unwrap();
    let created: MacroResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.shortcut, request.shortcut);

    // Duplicate shortcut for the same tenant conflicts
    let response = server
        .post_auth("/api/v1/macros", &token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Update content
    let response = server
        .patch_auth(
            &format!("/api/v1/macros/{}", created.id),
            &token,
            &serde_json::json!({"content": "Thanks for reaching out!"}),
        )
        .await
        .unwrap();
    let updated: MacroResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.content, "Thanks for reaching out!");

    // Delete
    let response = server
        .delete_auth(&format!("/api/v1/macros/{}", created.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Team Tests
// ============================================================================

#[tokio::test]
async fn test_team_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.issue_token(test_id()).unwrap();

    let team_req = CreateTeamRequest::unique();
    let response = server
        .post_auth("/api/v1/teams", &token, &team_req)
        .await
        .unwrap();
    let team: TeamResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(team.member_ids.is_empty());

    let agent_req = CreateAgentRequest::unique();
    let response = server
        .post_auth("/api/v1/agents", &token, &agent_req)
        .await
        .unwrap();
    let agent: AgentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Add the agent
    let response = server
        .post_auth(
            &format!("/api/v1/teams/{}/members", team.id),
            &token,
            &serde_json::json!({"agent_id": agent.id}),
        )
        .await
        .unwrap();
    let team: TeamResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(team.member_ids, vec![agent.id.clone()]);

    // Remove the agent
    let response = server
        .delete_auth(
            &format!("/api/v1/teams/{}/members/{}", team.id, agent.id),
            &token,
        )
        .await
        .unwrap();
    let team: TeamResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(team.member_ids.is_empty());
}
