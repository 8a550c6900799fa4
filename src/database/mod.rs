pub mod manager;
pub mod migrate;
pub mod models;
pub mod service;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use store::Store;
