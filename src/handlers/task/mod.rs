// handlers/task/mod.rs - Task endpoints

pub mod create_task;

pub use create_task::create_task;
