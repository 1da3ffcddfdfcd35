// Library root for the polling / practice REST API

pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routers;
pub mod serializers;

// Re-export commonly used types
pub use app::create_router;
pub use db::Database;
pub use error::ApiError;
pub use models::{Person, PollData, Price, Product, User};
