//! Field-level validation rules for orders and resources.
//!
//! Every rule runs; violations are collected per field (keyed by the
//! camelCase JSON field name) so a client can show all messages at once.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::order::{OrderDraft, OrderStatus};
use super::resource::{NewResource, ResourceChanges};

pub const FIELD_ORDER_NAME: &str = "orderName";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_RESOURCE_ID: &str = "resourceId";
pub const FIELD_END_TIME: &str = "endTime";
pub const FIELD_NAME: &str = "name";

pub const ORDER_NAME_MIN_CHARS: usize = 3;

pub const MSG_ORDER_NAME_TOO_SHORT: &str = "Order name must be at least 3 characters long.";
pub const MSG_SCHEDULED_FIELDS_REQUIRED: &str =
    "Resource, Start Time, and End Time are required for 'Scheduled' orders.";
pub const MSG_END_BEFORE_START: &str = "End time must be after start time.";
pub const MSG_RESOURCE_NAME_REQUIRED: &str = "Resource name is required.";
pub const MSG_UNKNOWN_RESOURCE: &str = "Selected resource does not exist.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Status-dependent order rules.
///
/// A Scheduled order needs a resource and both times; any order carrying
/// both times needs `end_time > start_time`.
pub fn validate_order(draft: &OrderDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if draft.order_name.chars().count() < ORDER_NAME_MIN_CHARS {
        errors.add(FIELD_ORDER_NAME, MSG_ORDER_NAME_TOO_SHORT);
    }

    if draft.status == OrderStatus::Scheduled
        && (draft.resource_id.is_none() || draft.start_time.is_none() || draft.end_time.is_none())
    {
        errors.add(FIELD_STATUS, MSG_SCHEDULED_FIELDS_REQUIRED);
    }

    if let (Some(start), Some(end)) = (draft.start_time, draft.end_time) {
        if end <= start {
            errors.add(FIELD_END_TIME, MSG_END_BEFORE_START);
        }
    }

    errors.into_result()
}

pub fn validate_new_resource(resource: &NewResource) -> Result<(), ValidationErrors> {
    validate_resource_name(&resource.name)
}

pub fn validate_resource_changes(changes: &ResourceChanges) -> Result<(), ValidationErrors> {
    match &changes.name {
        Some(name) => validate_resource_name(name),
        None => Ok(()),
    }
}

fn validate_resource_name(name: &str) -> Result<(), ValidationErrors> {
    if name.is_empty() {
        return Err(ValidationErrors::single(
            FIELD_NAME,
            MSG_RESOURCE_NAME_REQUIRED,
        ));
    }
    Ok(())
}
