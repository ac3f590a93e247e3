//! Friend list management.

use std::sync::Arc;

use sante_core::error::Result;
use sante_core::gateway::BackendGateway;
use sante_core::user::BasicUser;

pub struct FriendsUsecase {
    gateway: Arc<dyn BackendGateway>,
}

impl FriendsUsecase {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// The current friend list; an unreachable backend yields an empty list
    /// so the settings screen can still render.
    pub async fn list(&self) -> Vec<BasicUser> {
        match self.gateway.retrieve_friends().await {
            Ok(friends) => friends,
            Err(err) => {
                tracing::warn!(%err, "friend listing failed, showing none");
                Vec::new()
            }
        }
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        self.gateway.delete_friend(id).await
    }
}
