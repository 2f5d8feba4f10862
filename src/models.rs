pub mod admin;
pub mod notice;
pub mod store;
