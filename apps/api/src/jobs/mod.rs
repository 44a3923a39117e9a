pub mod handlers;
pub mod repair;
pub mod store;
