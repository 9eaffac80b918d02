//! Contact service
//!
//! Resolves inbound senders to tenant-scoped contacts and handles CRM edits.

use onethy_core::{Contact, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::requests::{CreateContactRequest, UpdateContactRequest};
use crate::dto::responses::ContactResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Contact service
pub struct ContactService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContactService<'a> {
    /// Create a new ContactService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve an inbound sender to a contact, creating one on first sight.
    ///
    /// Lookup-then-create; a concurrent duplicate hits the (tenant, phone)
    /// unique index and surfaces as a conflict.
    #[instrument(skip(self, push_name))]
    pub async fn resolve(
        &self,
        user_id: Snowflake,
        phone: &str,
        push_name: Option<&str>,
    ) -> ServiceResult<Contact> {
        if let Some(existing) = self.ctx.contact_repo().find_by_phone(user_id, phone).await? {
            return Ok(existing);
        }

        let contact = Contact::from_inbound(self.ctx.generate_id(), user_id, phone, push_name);
        self.ctx.contact_repo().create(&contact).await?;

        info!(contact_id = %contact.id, phone = %phone, "Contact created from inbound message");
        Ok(contact)
    }

    /// List contacts for a tenant
    #[instrument(skip(self, search))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        search: Option<&str>,
    ) -> ServiceResult<Vec<ContactResponse>> {
        let contacts = self.ctx.contact_repo().find_by_user(user_id, search).await?;
        Ok(contacts.iter().map(ContactResponse::from).collect())
    }

    /// Get a contact by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<ContactResponse> {
        let contact = self
            .ctx
            .contact_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Contact", id.to_string()))?;
        Ok(ContactResponse::from(&contact))
    }

    /// Create a contact from a CRM edit
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateContactRequest,
    ) -> ServiceResult<ContactResponse> {
        let mut contact = Contact::new(self.ctx.generate_id(), user_id, request.name, request.phone);
        contact.email = request.email;
        contact.notes = request.notes;

        self.ctx.contact_repo().create(&contact).await?;

        info!(contact_id = %contact.id, "Contact created");
        Ok(ContactResponse::from(&contact))
    }

    /// Partially update a contact
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdateContactRequest,
    ) -> ServiceResult<ContactResponse> {
        let mut contact = self
            .ctx
            .contact_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Contact", id.to_string()))?;

        if let Some(name) = request.name {
            contact.name = name;
        }
        if let Some(phone) = request.phone {
            contact.phone = phone;
        }
        if request.email.is_some() {
            contact.email = request.email;
        }
        if request.notes.is_some() {
            contact.notes = request.notes;
        }

        self.ctx.contact_repo().update(&contact).await?;

        info!(contact_id = %id, "Contact updated");
        Ok(ContactResponse::from(&contact))
    }

    /// Delete a contact; blocked while it has non-closed conversations
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let contact = self
            .ctx
            .contact_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Contact", id.to_string()))?;

        let active = self
            .ctx
            .conversation_repo()
            .count_active_by_contact(contact.id)
            .await?;
        if active > 0 {
            return Err(DomainError::ContactHasOpenConversations.into());
        }

        self.ctx.contact_repo().delete(id, user_id).await?;

        info!(contact_id = %id, "Contact deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Covered end-to-end in the integration test crate; resolve() fallback
    // naming is unit-tested on the Contact entity.
}
