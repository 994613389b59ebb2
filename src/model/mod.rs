pub mod config;
pub mod query;
pub mod record;

pub use config::*;
pub use query::*;
pub use record::*;
