pub mod dashboard_service;
pub mod order_service;
pub mod resource_service;
pub mod seed;

use std::sync::Arc;

use crate::db::DbPool;
use crate::domain::ports::{OrderRepository, ResourceRepository};
use crate::infrastructure::{DieselOrderRepository, DieselResourceRepository, MemoryStore};

pub use dashboard_service::DashboardService;
pub use order_service::{OrderService, SubmissionReport};
pub use resource_service::ResourceService;

/// The services shared by every HTTP worker.
#[derive(Clone)]
pub struct Services {
    pub resources: Arc<ResourceService>,
    pub orders: Arc<OrderService>,
    pub dashboard: Arc<DashboardService>,
}

impl Services {
    pub fn new(
        resource_repo: Arc<dyn ResourceRepository>,
        order_repo: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            resources: Arc::new(ResourceService::new(resource_repo.clone())),
            orders: Arc::new(OrderService::new(order_repo.clone(), resource_repo.clone())),
            dashboard: Arc::new(DashboardService::new(order_repo, resource_repo)),
        }
    }

    pub fn with_pool(pool: DbPool) -> Self {
        Self::new(
            Arc::new(DieselResourceRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool)),
        )
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store)
    }
}
