pub mod admin;
pub mod export;
pub mod form;
pub mod notices;
