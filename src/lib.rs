pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod observability;
pub mod query;
pub mod response;
pub mod routes;

pub use routes::{AppState, router};
