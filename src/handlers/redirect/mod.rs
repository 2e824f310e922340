// handlers/redirect/mod.rs - Post-login redirects

pub mod third_party_login;

pub use third_party_login::third_party_login;
