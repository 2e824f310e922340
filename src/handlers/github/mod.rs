// handlers/github/mod.rs - Read-only GitHub passthrough

pub mod release;

pub use release::release_get;
