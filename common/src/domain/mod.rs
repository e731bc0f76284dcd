pub mod posts;
pub mod queries;
pub mod validate;

pub use posts::*;
pub use queries::*;
pub use validate::{FieldViolation, validate};
