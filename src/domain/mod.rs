pub mod dashboard;
pub mod errors;
pub mod order;
pub mod ports;
pub mod resource;
pub mod schedule;
pub mod validation;
