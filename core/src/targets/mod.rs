pub mod field;
pub mod target;

pub use field::{generate_targets, FieldUpdate, TargetField};
pub use target::Target;
