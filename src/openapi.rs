use utoipa::OpenApi;

use crate::handlers::{self, dashboard, orders, resources};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Production Scheduler",
        description = "Production orders, the resources that run them, and schedule checks."
    ),
    paths(
        handlers::health,
        resources::list_resources,
        resources::get_resource,
        resources::create_resource,
        resources::update_resource,
        resources::delete_resource,
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::delete_order,
        orders::check_order,
        dashboard::get_dashboard,
    ),
    components(schemas(
        handlers::DeleteRequest,
        handlers::MessageResponse,
        resources::CreateResourceRequest,
        resources::UpdateResourceRequest,
        resources::ResourceResponse,
        orders::OrderRequest,
        orders::UpdateOrderRequest,
        orders::CheckOrderRequest,
        orders::OrderResponse,
        orders::ListOrdersResponse,
        orders::ConflictResponse,
        orders::CheckOrderResponse,
        dashboard::DashboardResponse,
    )),
    tags(
        (name = "resources", description = "Machines and lines that run orders"),
        (name = "orders", description = "Production orders and schedule checks"),
        (name = "dashboard", description = "Summary counts"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
