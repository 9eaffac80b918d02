//! Macro service
//!
//! Canned replies; shortcut uniqueness per tenant surfaces as a conflict.

use onethy_core::{Macro, Snowflake};
use tracing::{info, instrument};

use crate::dto::requests::{CreateMacroRequest, UpdateMacroRequest};
use crate::dto::responses::MacroResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Macro service
pub struct MacroService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MacroService<'a> {
    /// Create a new MacroService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List macros for a tenant
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<MacroResponse>> {
        let macros = self.ctx.macro_repo().find_by_user(user_id).await?;
        Ok(macros.iter().map(MacroResponse::from).collect())
    }

    /// Get a macro by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<MacroResponse> {
        let found = self.load(id, user_id).await?;
        Ok(MacroResponse::from(&found))
    }

    /// Create a macro
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateMacroRequest,
    ) -> ServiceResult<MacroResponse> {
        let created = Macro::new(
            self.ctx.generate_id(),
            user_id,
            request.shortcut,
            request.content,
        );
        self.ctx.macro_repo().create(&created).await?;

        info!(macro_id = %created.id, shortcut = %created.shortcut, "Macro created");
        Ok(MacroResponse::from(&created))
    }

    /// Partially update a macro
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdateMacroRequest,
    ) -> ServiceResult<MacroResponse> {
        let mut found = self.load(id, user_id).await?;

        if let Some(shortcut) = request.shortcut {
            found.shortcut = shortcut;
        }
        if let Some(content) = request.content {
            found.content = content;
        }

        self.ctx.macro_repo().update(&found).await?;

        info!(macro_id = %id, "Macro updated");
        Ok(MacroResponse::from(&found))
    }

    /// Delete a macro
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.load(id, user_id).await?;
        self.ctx.macro_repo().delete(id, user_id).await?;

        info!(macro_id = %id, "Macro deleted");
        Ok(())
    }

    async fn load(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<Macro> {
        self.ctx
            .macro_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Macro", id.to_string()))
    }
}
