use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ResourceRepository;
use crate::domain::resource::{NewResource, Resource, ResourceChanges, ResourceStatus};
use crate::domain::validation::{validate_new_resource, validate_resource_changes};

pub struct ResourceService {
    repo: Arc<dyn ResourceRepository>,
}

impl ResourceService {
    pub fn new(repo: Arc<dyn ResourceRepository>) -> Self {
        Self { repo }
    }

    pub fn create_resource(&self, resource: NewResource) -> Result<Resource, DomainError> {
        validate_new_resource(&resource)?;
        let created = self.repo.create(resource)?;
        log::info!("created resource {} ({})", created.id, created.name);
        Ok(created)
    }

    pub fn get_resource(&self, id: Uuid) -> Result<Resource, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Resource"))
    }

    pub fn list_resources(
        &self,
        status: Option<ResourceStatus>,
    ) -> Result<Vec<Resource>, DomainError> {
        log::debug!("listing resources (status filter: {status:?})");
        self.repo.list(status)
    }

    pub fn update_resource(
        &self,
        id: Uuid,
        changes: ResourceChanges,
    ) -> Result<Resource, DomainError> {
        validate_resource_changes(&changes)?;
        let updated = self
            .repo
            .update(id, changes)?
            .ok_or(DomainError::NotFound("Resource"))?;
        log::info!("updated resource {id} (status {})", updated.status);
        Ok(updated)
    }

    pub fn delete_resource(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Resource"));
        }
        log::info!("deleted resource {id}");
        Ok(())
    }

    pub fn count_resources(&self) -> Result<i64, DomainError> {
        self.repo.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    fn service() -> ResourceService {
        ResourceService::new(Arc::new(MemoryStore::new()))
    }

    fn cnc() -> NewResource {
        NewResource {
            name: "CNC Machine 1".to_string(),
            status: ResourceStatus::Available,
        }
    }

    #[test]
    fn create_then_get() {
        let svc = service();
        let created = svc.create_resource(cnc()).unwrap();
        assert_eq!(svc.get_resource(created.id).unwrap(), created);
        assert_eq!(svc.count_resources().unwrap(), 1);
    }

    #[test]
    fn empty_name_is_a_validation_error() {
        let err = service()
            .create_resource(NewResource {
                name: String::new(),
                status: ResourceStatus::Busy,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let svc = service();
        assert!(matches!(
            svc.get_resource(Uuid::new_v4()),
            Err(DomainError::NotFound("Resource"))
        ));
        assert!(matches!(
            svc.update_resource(Uuid::new_v4(), ResourceChanges::default()),
            Err(DomainError::NotFound("Resource"))
        ));
        assert!(matches!(
            svc.delete_resource(Uuid::new_v4()),
            Err(DomainError::NotFound("Resource"))
        ));
    }

    #[test]
    fn update_changes_only_given_fields() {
        let svc = service();
        let created = svc.create_resource(cnc()).unwrap();
        let updated = svc
            .update_resource(
                created.id,
                ResourceChanges {
                    name: None,
                    status: Some(ResourceStatus::Maintenance),
                },
            )
            .unwrap();
        assert_eq!(updated.name, "CNC Machine 1");
        assert_eq!(updated.status, ResourceStatus::Maintenance);
    }

    #[test]
    fn list_filters_by_status() {
        let svc = service();
        svc.create_resource(cnc()).unwrap();
        svc.create_resource(NewResource {
            name: "Painting Booth".to_string(),
            status: ResourceStatus::Busy,
        })
        .unwrap();

        assert_eq!(svc.list_resources(None).unwrap().len(), 2);
        let busy = svc.list_resources(Some(ResourceStatus::Busy)).unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].name, "Painting Booth");
    }
}
