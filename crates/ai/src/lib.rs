mod client;
pub mod fallback;
mod generator;
mod parse;
mod prompt;
mod types;

pub use client::*;
pub use generator::*;
pub use parse::*;
pub use prompt::*;
pub use types::*;
