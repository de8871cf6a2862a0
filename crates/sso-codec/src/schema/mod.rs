//! Field maps and declared types

mod field;
mod types;

pub use field::{FieldMap, FieldSpec};
pub use types::FieldType;
