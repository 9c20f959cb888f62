use std::sync::Arc;

use crate::accounts::AccountService;
use crate::auth::{JwtService, PrincipalResolver};
use crate::core::{Config, Result};
use crate::db::Storage;
use crate::orders::{OrderService, StubCatalog};
use crate::restaurants::RestaurantService;

/// Server state: shared handles to every service
///
/// Every field is cheap to clone (Arc inside).
///
/// | Field | Holds |
/// |------|------|
/// | config | immutable configuration |
/// | storage | redb store |
/// | jwt_service | token service |
/// | resolver | token → caller identity |
/// | accounts / restaurants / orders | use-case services |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: Storage,
    pub jwt_service: Arc<JwtService>,
    pub resolver: PrincipalResolver,
    pub accounts: AccountService,
    pub restaurants: RestaurantService,
    pub orders: OrderService,
}

impl ServerState {
    /// Open the database under the work dir and wire the services
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let path = config.database_path();
        let storage = Storage::open(&path)?;
        tracing::info!(path = %path.display(), "Database opened");
        Ok(Self::with_storage(config.clone(), storage))
    }

    pub fn with_storage(config: Config, storage: Storage) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let store = Arc::new(storage.clone());

        Self {
            resolver: PrincipalResolver::new(jwt_service.clone(), storage.clone()),
            accounts: AccountService::new(storage.clone(), jwt_service.clone()),
            restaurants: RestaurantService::new(storage.clone()),
            orders: OrderService::new(store.clone(), store, Arc::new(StubCatalog)),
            config,
            storage,
            jwt_service,
        }
    }

    /// Create the configured admin account if missing
    pub fn bootstrap_admin(&self) -> Result<()> {
        let Some(admin) = &self.config.admin else {
            return Ok(());
        };
        if !self
            .accounts
            .ensure_admin(&admin.username, &admin.email, &admin.password)?
        {
            tracing::debug!(username = %admin.username, "Bootstrap admin already exists");
        }
        Ok(())
    }
}
