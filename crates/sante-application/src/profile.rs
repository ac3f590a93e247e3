//! Current-user loading.

use std::sync::Arc;

use sante_core::error::Result;
use sante_core::gateway::BackendGateway;
use sante_core::session::CredentialStore;
use sante_core::user::CurrentUserProfile;

pub struct ProfileUsecase {
    gateway: Arc<dyn BackendGateway>,
    credentials: Arc<dyn CredentialStore>,
}

impl ProfileUsecase {
    pub fn new(gateway: Arc<dyn BackendGateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
        }
    }

    /// Fetches the signed-in user, or `None` when nobody is signed in.
    pub async fn load_user(&self) -> Result<Option<CurrentUserProfile>> {
        if !self.credentials.is_logged_in().await {
            return Ok(None);
        }
        Ok(Some(self.gateway.retrieve_user().await?))
    }
}
