pub mod actor;
pub mod components;
pub mod config;
pub mod events;
pub mod level;
pub mod save;
pub mod session;
pub mod system;
