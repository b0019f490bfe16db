pub mod config;
pub mod file;
pub mod player;
pub mod server;
