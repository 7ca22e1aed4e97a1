use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ResourceRepository;
use crate::domain::resource::{NewResource, Resource, ResourceChanges, ResourceStatus};
use crate::schema::resources;

use super::models::{NewResourceRow, ResourceChangeset, ResourceRow};

pub struct DieselResourceRepository {
    pool: DbPool,
}

impl DieselResourceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ResourceRepository for DieselResourceRepository {
    fn create(&self, resource: NewResource) -> Result<Resource, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ResourceRow = diesel::insert_into(resources::table)
            .values(&NewResourceRow {
                id: Uuid::new_v4(),
                name: resource.name,
                status: resource.status.as_str().to_string(),
            })
            .returning(ResourceRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, DomainError> {
        let mut conn = self.pool.get()?;

        resources::table
            .find(id)
            .select(ResourceRow::as_select())
            .first::<ResourceRow>(&mut conn)
            .optional()?
            .map(Resource::try_from)
            .transpose()
    }

    fn list(&self, status: Option<ResourceStatus>) -> Result<Vec<Resource>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = resources::table
            .select(ResourceRow::as_select())
            .order(resources::name.asc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(resources::status.eq(status.as_str()));
        }

        query
            .load::<ResourceRow>(&mut conn)?
            .into_iter()
            .map(Resource::try_from)
            .collect()
    }

    fn update(&self, id: Uuid, changes: ResourceChanges) -> Result<Option<Resource>, DomainError> {
        let mut conn = self.pool.get()?;

        diesel::update(resources::table.find(id))
            .set(&ResourceChangeset::from(changes))
            .returning(ResourceRow::as_returning())
            .get_result::<ResourceRow>(&mut conn)
            .optional()?
            .map(Resource::try_from)
            .transpose()
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(resources::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(resources::table.count().get_result(&mut conn)?)
    }
}
