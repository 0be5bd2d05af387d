//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.

mod activity;
mod port;
mod rate;
mod shipping_line;
mod user;

pub use rate::decode_rate_lines;
