//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod ports;
pub mod rates;
pub mod shipping_lines;
pub mod users;
