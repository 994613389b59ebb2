pub mod client;
pub mod config_io;
