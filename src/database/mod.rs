pub mod gateway;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;

pub use gateway::{Gateway, Record, Table};
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryGateway;
pub use postgres::PgGateway;
