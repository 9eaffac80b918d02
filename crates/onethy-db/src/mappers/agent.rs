//! Agent entity <-> model mapper

use onethy_core::{Agent, Snowflake};

use crate::models::AgentModel;

impl From<AgentModel> for Agent {
    fn from(model: AgentModel) -> Self {
        Agent {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
