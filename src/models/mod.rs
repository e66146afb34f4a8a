pub mod account;
pub mod api;
