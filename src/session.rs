//! # Sessions & Identity
//!
//! A [`Session`] is the resolved identity of whoever is acting: their profile id and role. Role
//! checks happen here, at the session boundary, through [`Session::require_admin`]; services take
//! a `&Session` and never look at roles themselves.

use crate::clients::ProfileClient;
use crate::error::{InventoryError, Result};
use crate::model::{Profile, ProfileCreate, ProfileId, ProfileUpdate, Role};
use actor_framework::ActorClient;
use serde::Deserialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub profile_id: ProfileId,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The admin capability check.
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(InventoryError::Auth(format!(
                "{} is not an administrator",
                self.profile_id
            )))
        }
    }
}

/// Input for a new staff account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    /// Defaults to technician.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<NewUser> for ProfileCreate {
    fn from(user: NewUser) -> Self {
        ProfileCreate {
            email: user.email,
            full_name: user.full_name,
            role: user.role.unwrap_or_default(),
            phone: user.phone,
        }
    }
}

#[derive(Clone)]
pub struct IdentityService {
    profiles: ProfileClient,
}

impl IdentityService {
    pub fn new(profiles: ProfileClient) -> Self {
        Self { profiles }
    }

    /// Resolve a profile id into a session. Unknown and deactivated accounts are refused.
    #[instrument(skip(self))]
    pub async fn authenticate(&self, profile_id: ProfileId) -> Result<Session> {
        match self.profiles.get(profile_id).await? {
            Some(profile) if profile.is_active => Ok(Session {
                profile_id,
                role: profile.role,
            }),
            Some(_) => {
                warn!(%profile_id, "Sign-in refused for deactivated account");
                Err(InventoryError::auth("account is deactivated"))
            }
            None => Err(InventoryError::auth("no such account")),
        }
    }

    /// Create the very first administrator. Refused once any admin exists.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn bootstrap_admin(&self, user: NewUser) -> Result<ProfileId> {
        let id = self
            .profiles
            .create_first_admin(user.into())
            .await?
            .ok_or_else(|| InventoryError::auth("an administrator already exists"))?;
        info!(%id, "Bootstrap administrator created");
        Ok(id)
    }

    /// Admin only. Seeds the profile row for a new account; emails are unique.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, admin: &Session, user: NewUser) -> Result<ProfileId> {
        admin.require_admin()?;
        let email = user.email.trim().to_lowercase();
        let id = self
            .profiles
            .create_profile(user.into())
            .await?
            .ok_or_else(|| {
                InventoryError::Validation(format!("an account for {email} already exists"))
            })?;
        info!(%id, "User created");
        Ok(id)
    }

    /// Admin only. Admins can't deactivate themselves.
    #[instrument(skip(self))]
    pub async fn set_active(
        &self,
        admin: &Session,
        profile_id: ProfileId,
        is_active: bool,
    ) -> Result<Profile> {
        admin.require_admin()?;
        if profile_id == admin.profile_id && !is_active {
            return Err(InventoryError::validation(
                "administrators can't deactivate their own account",
            ));
        }
        self.profiles
            .update_profile(
                profile_id,
                ProfileUpdate {
                    is_active: Some(is_active),
                    ..Default::default()
                },
            )
            .await
    }

    /// Admin only. Newest accounts first.
    #[instrument(skip(self))]
    pub async fn list_users(&self, admin: &Session) -> Result<Vec<Profile>> {
        admin.require_admin()?;
        let mut users = self.profiles.all().await?;
        users.reverse();
        Ok(users)
    }

    /// The signed-in user's own name and phone.
    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        session: &Session,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> Result<Profile> {
        self.profiles
            .update_profile(
                session.profile_id,
                ProfileUpdate {
                    full_name,
                    phone,
                    ..Default::default()
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;
    use chrono::Utc;

    fn profile(role: Role, is_active: bool) -> Profile {
        Profile {
            id: ProfileId(1),
            email: "a@lab.org".into(),
            full_name: "A".into(),
            role,
            phone: None,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn technicians_fail_the_admin_check() {
        let tech = Session {
            profile_id: ProfileId(2),
            role: Role::Technician,
        };
        assert!(matches!(tech.require_admin(), Err(InventoryError::Auth(_))));
    }

    #[test]
    fn new_users_default_to_technician() {
        let user: NewUser =
            serde_json::from_str(r#"{"full_name":"B","email":"b@lab.org"}"#).unwrap();
        assert_eq!(ProfileCreate::from(user).role, Role::Technician);
    }

    #[tokio::test]
    async fn authenticate_refuses_missing_and_inactive_accounts() {
        let mut mock = MockClient::<Profile>::new();
        mock.expect_get(ProfileId(1))
            .return_ok(Some(profile(Role::Admin, true)));
        mock.expect_get(ProfileId(1))
            .return_ok(Some(profile(Role::Admin, false)));
        mock.expect_get(ProfileId(1)).return_ok(None);

        let identity = IdentityService::new(ProfileClient::new(mock.client()));
        let session = identity.authenticate(ProfileId(1)).await.unwrap();
        assert!(session.is_admin());
        assert!(matches!(
            identity.authenticate(ProfileId(1)).await,
            Err(InventoryError::Auth(_))
        ));
        assert!(matches!(
            identity.authenticate(ProfileId(1)).await,
            Err(InventoryError::Auth(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn create_user_is_admin_only() {
        let mock = MockClient::<Profile>::new();
        let identity = IdentityService::new(ProfileClient::new(mock.client()));
        let tech = Session {
            profile_id: ProfileId(2),
            role: Role::Technician,
        };

        let err = identity
            .create_user(
                &tech,
                NewUser {
                    full_name: "C".into(),
                    email: "c@lab.org".into(),
                    role: None,
                    phone: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Auth(_)));
        mock.verify();
    }
}
