pub mod files;
pub mod player;
pub mod registry;
pub mod server;
