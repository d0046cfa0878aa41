//! # Profile Actor
//!
//! Owns the `profiles` table. Accounts are never hard-deleted: they are deactivated through an
//! update, which keeps every ledger entry attributable.

use crate::error::{required, InventoryError};
use crate::model::{Profile, ProfileCreate, ProfileId, ProfileUpdate};
use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;

/// Creates a new Profile actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Profile>, ResourceClient<Profile>) {
    ResourceActor::new(buffer_size)
}

pub(crate) fn normalize_email(email: &str) -> Result<String, InventoryError> {
    let email = required("email", email)?.to_lowercase();
    if !email.contains('@') {
        return Err(InventoryError::Validation(format!("invalid email address: {email}")));
    }
    Ok(email)
}

#[async_trait]
impl ActorEntity for Profile {
    type Id = ProfileId;
    type Create = ProfileCreate;
    type Update = ProfileUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(id: ProfileId, params: ProfileCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            email: normalize_email(&params.email)?,
            full_name: required("full name", &params.full_name)?,
            role: params.role,
            phone: params.phone.filter(|p| !p.trim().is_empty()),
            is_active: true,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: ProfileUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let full_name = update
            .full_name
            .as_deref()
            .map(|name| required("full name", name))
            .transpose()?;

        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone).filter(|p| !p.trim().is_empty());
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(InventoryError::validation(
            "profiles are deactivated, not deleted",
        ))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn params(email: &str, full_name: &str) -> ProfileCreate {
        ProfileCreate {
            email: email.to_string(),
            full_name: full_name.to_string(),
            role: Role::Technician,
            phone: Some("  ".to_string()),
        }
    }

    #[test]
    fn create_normalizes_fields() {
        let params = params(" Ana@Lab.org ", " Ana Ruiz ");
        let profile = Profile::from_create_params(ProfileId(1), params).unwrap();
        assert_eq!(profile.email, "ana@lab.org");
        assert_eq!(profile.full_name, "Ana Ruiz");
        assert_eq!(profile.phone, None);
        assert!(profile.is_active);
    }

    #[test]
    fn create_requires_name_and_email() {
        assert!(matches!(
            Profile::from_create_params(ProfileId(1), params("a@lab.org", "")),
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            Profile::from_create_params(ProfileId(1), params("not-an-email", "Ana")),
            Err(InventoryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn profiles_cannot_be_deleted() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        let id = client.create(params("a@lab.org", "Ana")).await.unwrap();
        let err = InventoryError::from(client.delete(id).await.unwrap_err());
        assert!(matches!(err, InventoryError::Validation(_)));
        assert!(client.get(id).await.unwrap().is_some());
    }
}
