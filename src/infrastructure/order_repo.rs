use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    OrderDraft, OrderPage, OrderQuery, OrderSortField, OrderStatus, OrderView, ProductionOrder,
    SortDirection,
};
use crate::domain::ports::OrderRepository;
use crate::domain::resource::Resource;
use crate::schema::{production_orders, resources};

use super::models::{NewOrderRow, OrderChangeset, OrderRow, ResourceRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn status_names(query: &OrderQuery) -> Vec<&'static str> {
    query.statuses.iter().map(OrderStatus::as_str).collect()
}

fn to_view((order, resource): (OrderRow, Option<ResourceRow>)) -> Result<OrderView, DomainError> {
    Ok(OrderView {
        order: order.try_into()?,
        resource: resource.map(Resource::try_from).transpose()?,
    })
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, draft: OrderDraft) -> Result<ProductionOrder, DomainError> {
        let mut conn = self.pool.get()?;

        let row: OrderRow = diesel::insert_into(production_orders::table)
            .values(&NewOrderRow::from(draft))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        production_orders::table
            .left_join(resources::table)
            .filter(production_orders::id.eq(id))
            .select((OrderRow::as_select(), Option::<ResourceRow>::as_select()))
            .first::<(OrderRow, Option<ResourceRow>)>(&mut conn)
            .optional()?
            .map(to_view)
            .transpose()
    }

    fn list(&self, query: &OrderQuery) -> Result<OrderPage, DomainError> {
        let mut conn = self.pool.get()?;
        let statuses = status_names(query);

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut count_query = production_orders::table.into_boxed();
            if !statuses.is_empty() {
                count_query = count_query.filter(production_orders::status.eq_any(statuses.clone()));
            }
            let total: i64 = count_query.count().get_result(conn)?;

            let mut rows = production_orders::table
                .left_join(resources::table)
                .select((OrderRow::as_select(), Option::<ResourceRow>::as_select()))
                .into_boxed();
            if !statuses.is_empty() {
                rows = rows.filter(production_orders::status.eq_any(statuses.clone()));
            }
            rows = match (query.sort, query.direction) {
                (OrderSortField::OrderName, SortDirection::Asc) => {
                    rows.order(production_orders::order_name.asc())
                }
                (OrderSortField::OrderName, SortDirection::Desc) => {
                    rows.order(production_orders::order_name.desc())
                }
                (OrderSortField::CreatedAt, SortDirection::Asc) => {
                    rows.order(production_orders::created_at.asc())
                }
                (OrderSortField::CreatedAt, SortDirection::Desc) => {
                    rows.order(production_orders::created_at.desc())
                }
                (OrderSortField::StartTime, SortDirection::Asc) => {
                    rows.order(production_orders::start_time.asc())
                }
                (OrderSortField::StartTime, SortDirection::Desc) => {
                    rows.order(production_orders::start_time.desc())
                }
            };

            let items = rows
                .then_order_by(production_orders::id.asc())
                .limit(query.limit)
                .offset(query.offset())
                .load::<(OrderRow, Option<ResourceRow>)>(conn)?
                .into_iter()
                .map(to_view)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(OrderPage { items, total })
        })
    }

    fn list_all(&self) -> Result<Vec<ProductionOrder>, DomainError> {
        let mut conn = self.pool.get()?;

        production_orders::table
            .select(OrderRow::as_select())
            .order(production_orders::created_at.asc())
            .load::<OrderRow>(&mut conn)?
            .into_iter()
            .map(ProductionOrder::try_from)
            .collect()
    }

    fn scheduled_for_resource(
        &self,
        resource_id: Uuid,
    ) -> Result<Vec<ProductionOrder>, DomainError> {
        let mut conn = self.pool.get()?;

        production_orders::table
            .filter(production_orders::resource_id.eq(resource_id))
            .filter(production_orders::status.eq(OrderStatus::Scheduled.as_str()))
            .select(OrderRow::as_select())
            .order(production_orders::start_time.asc())
            .load::<OrderRow>(&mut conn)?
            .into_iter()
            .map(ProductionOrder::try_from)
            .collect()
    }

    fn update(&self, id: Uuid, draft: OrderDraft) -> Result<Option<ProductionOrder>, DomainError> {
        let mut conn = self.pool.get()?;

        diesel::update(production_orders::table.find(id))
            .set(&OrderChangeset::from(draft))
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .optional()?
            .map(ProductionOrder::try_from)
            .transpose()
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(production_orders::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
