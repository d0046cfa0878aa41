use crate::error::{InventoryError, Result};
use crate::model::{Profile, ProfileCreate, ProfileId, ProfileUpdate, Role};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Profile actor.
#[derive(Clone)]
pub struct ProfileClient {
    inner: ResourceClient<Profile>,
}

#[async_trait]
impl ActorClient<Profile> for ProfileClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<Profile> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        InventoryError::from(e)
    }
}

impl ProfileClient {
    pub fn new(inner: ResourceClient<Profile>) -> Self {
        Self { inner }
    }

    /// Inserts the profile unless its email is already taken (case-insensitive).
    ///
    /// Returns `None` for a duplicate.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create_profile(&self, params: ProfileCreate) -> Result<Option<ProfileId>> {
        debug!("Sending request");
        let email = params.email.trim().to_lowercase();
        self.inner
            .create_unique(params, Filter::new(move |p: &Profile| p.email == email))
            .await
            .map_err(Self::map_error)
    }

    /// Inserts an admin profile only while no admin exists yet.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create_first_admin(&self, params: ProfileCreate) -> Result<Option<ProfileId>> {
        debug!("Sending request");
        let params = ProfileCreate {
            role: Role::Admin,
            ..params
        };
        self.inner
            .create_unique(params, Filter::new(|p: &Profile| p.is_admin()))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, id: ProfileId, update: ProfileUpdate) -> Result<Profile> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn active_admins(&self) -> Result<Vec<Profile>> {
        self.list(Filter::new(|p: &Profile| p.is_active && p.is_admin()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Profile>> {
        self.list(Filter::all()).await
    }
}
