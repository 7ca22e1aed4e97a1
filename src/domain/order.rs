use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::resource::{Resource, UnknownStatus};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum OrderStatus {
    #[default]
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Canonical ordering, used wherever statuses are enumerated.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Scheduled,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Scheduled => "Scheduled",
            OrderStatus::InProgress => "InProgress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionOrder {
    pub id: Uuid,
    pub order_name: String,
    pub status: OrderStatus,
    pub resource_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductionOrder {
    /// The `[start, end)` window, when both ends are set.
    pub fn time_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start_time?, self.end_time?))
    }
}

/// An order together with the resource it references, if that still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub order: ProductionOrder,
    pub resource: Option<Resource>,
}

/// The full set of user-editable order fields, used for both create and
/// full-record update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_name: String,
    pub status: OrderStatus,
    pub resource_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderSortField {
    OrderName,
    #[default]
    CreatedAt,
    StartTime,
}

impl FromStr for OrderSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orderName" => Ok(OrderSortField::OrderName),
            "createdAt" => Ok(OrderSortField::CreatedAt),
            "startTime" => Ok(OrderSortField::StartTime),
            other => Err(format!(
                "Unknown sort field '{other}'. Expected one of: orderName, createdAt, startTime."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!(
                "Unknown sort direction '{other}'. Expected asc or desc."
            )),
        }
    }
}

/// Listing parameters for the order table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    /// Empty means no status filter.
    pub statuses: Vec<OrderStatus>,
    pub sort: OrderSortField,
    pub direction: SortDirection,
    /// 1-based.
    pub page: i64,
    pub limit: i64,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            statuses: Vec::new(),
            sort: OrderSortField::default(),
            direction: SortDirection::default(),
            page: 1,
            limit: 20,
        }
    }
}

impl OrderQuery {
    pub const MAX_LIMIT: i64 = 100;

    pub fn matches(&self, order: &ProductionOrder) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&order.status)
    }

    /// Saturates instead of overflowing for absurd page numbers.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Clamp paging values into the accepted range.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, Self::MAX_LIMIT);
        self
    }
}

#[derive(Debug, Clone)]
pub struct OrderPage {
    pub items: Vec<OrderView>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn order(status: OrderStatus) -> ProductionOrder {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        ProductionOrder {
            id: Uuid::new_v4(),
            order_name: "Batch #1".to_string(),
            status,
            resource_id: None,
            start_time: None,
            end_time: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn in_progress_keeps_camel_case_name() {
        assert_eq!(OrderStatus::InProgress.as_str(), "InProgress");
        assert_eq!("InProgress".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert!("IN_PROGRESS".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(OrderDraft::default().status, OrderStatus::Pending);
    }

    #[test]
    fn empty_status_filter_matches_everything() {
        let query = OrderQuery::default();
        for status in OrderStatus::ALL {
            assert!(query.matches(&order(status)));
        }
    }

    #[test]
    fn status_filter_matches_only_listed_statuses() {
        let query = OrderQuery {
            statuses: vec![OrderStatus::Scheduled, OrderStatus::Completed],
            ..OrderQuery::default()
        };
        assert!(query.matches(&order(OrderStatus::Scheduled)));
        assert!(query.matches(&order(OrderStatus::Completed)));
        assert!(!query.matches(&order(OrderStatus::Pending)));
        assert!(!query.matches(&order(OrderStatus::Cancelled)));
    }

    #[test]
    fn normalized_clamps_page_and_limit() {
        let query = OrderQuery {
            page: 0,
            limit: 500,
            ..OrderQuery::default()
        }
        .normalized();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, OrderQuery::MAX_LIMIT);
        assert_eq!(query.offset(), 0);

        let query = OrderQuery {
            page: 3,
            limit: 0,
            ..OrderQuery::default()
        }
        .normalized();
        assert_eq!(query.limit, 1);
        assert_eq!(query.offset(), 2);
    }

    #[test]
    fn offset_saturates_on_huge_pages() {
        let query = OrderQuery {
            page: i64::MAX,
            ..OrderQuery::default()
        }
        .normalized();
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn sort_params_parse() {
        assert_eq!("orderName".parse::<OrderSortField>(), Ok(OrderSortField::OrderName));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("name".parse::<OrderSortField>().is_err());
        assert!("ASC".parse::<SortDirection>().is_err());
    }

    #[test]
    fn time_window_requires_both_ends() {
        let mut o = order(OrderStatus::Scheduled);
        assert!(o.time_window().is_none());
        o.start_time = Some(Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap());
        assert!(o.time_window().is_none());
        o.end_time = Some(Utc.with_ymd_and_hms(2025, 3, 2, 17, 0, 0).unwrap());
        assert!(o.time_window().is_some());
    }
}
