pub mod background;
pub mod config;
pub mod types;
