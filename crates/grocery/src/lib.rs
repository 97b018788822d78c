mod aggregation;
mod categorization;
mod command;
mod query;
mod types;

pub use aggregation::*;
pub use categorization::*;
pub use command::*;
pub use query::*;
pub use types::*;
