pub mod chat;
pub mod legacy;
