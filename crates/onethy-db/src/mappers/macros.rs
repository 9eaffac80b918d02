//! Macro entity <-> model mapper

use onethy_core::{Macro, Snowflake};

use crate::models::MacroModel;

impl From<MacroModel> for Macro {
    fn from(model: MacroModel) -> Self {
        Macro {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            shortcut: model.shortcut,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
