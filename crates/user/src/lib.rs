mod command;
pub mod jwt;
pub mod password;
mod query;
mod types;

pub use command::*;
pub use query::*;
pub use types::*;
