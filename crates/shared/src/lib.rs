mod actor;
mod date;
mod error;
mod page;
mod types;

pub use actor::*;
pub use date::*;
pub use error::*;
pub use page::*;
pub use types::*;

/// Generate a new sortable identifier
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}
