//! Note entity <-> model mapper

use onethy_core::{Note, Snowflake};

use crate::models::NoteModel;

impl From<NoteModel> for Note {
    fn from(model: NoteModel) -> Self {
        Note {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            conversation_id: Snowflake::new(model.conversation_id),
            author_agent_id: model.author_agent_id.map(Snowflake::new),
            content: model.content,
            created_at: model.created_at,
        }
    }
}
