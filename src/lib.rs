pub mod commands;
pub mod config;
pub mod logger;
pub mod package_manager;
pub mod unlink;
