pub mod types;
pub mod filter;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter::Filter;
