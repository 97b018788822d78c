mod dashboard;

pub use dashboard::*;
