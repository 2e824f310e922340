pub mod validate_body;

pub use validate_body::{FieldErrors, Validate, ValidatedJson};
