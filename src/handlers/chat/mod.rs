// handlers/chat/mod.rs - Chat room and message endpoints

pub mod create_room;
pub mod insert_message;

pub use create_room::create_room;
pub use insert_message::insert_message;
