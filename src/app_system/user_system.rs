use std::sync::Arc;

use tracing::{error, info, instrument};

use super::ServiceConfig;
use crate::actors::UserService;
use crate::clients::UserClient;
use crate::error::UserError;
use crate::store::UserStore;

/// Owns the user store and the service task serving it.
///
/// Startup builds the store, spawns the service and hands out a client;
/// [`UserSystem::shutdown`] stops the service and waits for it.
pub struct UserSystem {
    pub user_client: UserClient,
    store: Arc<UserStore>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for UserSystem {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl UserSystem {
    /// Starts a system over an empty store with UUID ids and the system clock.
    pub fn new(config: ServiceConfig) -> Self {
        let store = UserStore::new().with_max_per_page(config.max_per_page);
        Self::with_store(config, store)
    }

    /// Starts a system over a prebuilt store. `config.max_per_page` is not
    /// applied here; configure it on the store.
    #[instrument(name = "user_system", skip(store))]
    pub fn with_store(config: ServiceConfig, store: UserStore) -> Self {
        info!("Starting user system");

        let store = Arc::new(store);
        let (user_service, user_client) = UserService::new(config.buffer_size, Arc::clone(&store));
        let handles = vec![tokio::spawn(user_service.run())];

        info!("User system started successfully");

        Self {
            user_client,
            store,
            handles,
        }
    }

    /// Direct handle to the store, shared with the service.
    pub fn store(&self) -> Arc<UserStore> {
        Arc::clone(&self.store)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), UserError> {
        info!("Shutting down user system");

        // Already stopped is fine: the service exits when its channel closes.
        if let Err(e) = self.user_client.shutdown().await {
            info!(error = %e, "User service already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(UserError::Internal(format!("service task failed: {}", e)));
            }
        }

        info!("User system shutdown complete");
        Ok(())
    }
}
