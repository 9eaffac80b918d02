//! Contact entity <-> model mapper

use onethy_core::{Contact, Snowflake};

use crate::models::ContactModel;

impl From<ContactModel> for Contact {
    fn from(model: ContactModel) -> Self {
        Contact {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            phone: model.phone,
            email: model.email,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
