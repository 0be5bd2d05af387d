//! Value objects - immutable types that represent domain concepts

mod record_id;
mod validity;

pub use record_id::{IdGenerator, RecordId, RecordIdError};
pub use validity::{parse_bound, BoundEdge, RateValidity, ValidityWindow};
