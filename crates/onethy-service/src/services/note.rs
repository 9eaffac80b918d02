//! Note service
//!
//! Internal annotations on conversations.

use onethy_core::{Note, Snowflake};
use tracing::{info, instrument};

use crate::dto::requests::CreateNoteRequest;
use crate::dto::responses::NoteResponse;

use super::context::ServiceContext;
use super::conversation::ConversationService;
use super::error::{ServiceError, ServiceResult};

/// Note service
pub struct NoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NoteService<'a> {
    /// Create a new NoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List notes on a conversation
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<NoteResponse>> {
        ConversationService::new(self.ctx)
            .load(conversation_id, user_id)
            .await?;

        let notes = self.ctx.note_repo().find_by_conversation(conversation_id).await?;
        Ok(notes.iter().map(NoteResponse::from).collect())
    }

    /// Create a note on a conversation
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        request: CreateNoteRequest,
    ) -> ServiceResult<NoteResponse> {
        ConversationService::new(self.ctx)
            .load(conversation_id, user_id)
            .await?;

        let author_agent_id = match request.author_agent_id {
            Some(raw) => {
                let agent_id = raw
                    .parse::<Snowflake>()
                    .map_err(|_| ServiceError::validation("Invalid author_agent_id format"))?;
                self.ctx
                    .agent_repo()
                    .find_by_id(agent_id, user_id)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Agent", agent_id.to_string()))?;
                Some(agent_id)
            }
            None => None,
        };

        let mut note = Note::new(
            self.ctx.generate_id(),
            user_id,
            conversation_id,
            request.content,
        );
        note.author_agent_id = author_agent_id;

        self.ctx.note_repo().create(&note).await?;

        info!(note_id = %note.id, conversation_id = %conversation_id, "Note created");
        Ok(NoteResponse::from(&note))
    }

    /// Delete a note
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.note_repo().delete(id, user_id).await?;

        info!(note_id = %id, "Note deleted");
        Ok(())
    }
}
