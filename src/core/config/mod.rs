pub mod config;

pub use config::{ActorConfig, AudioConfig, GameConfig, SaveConfig, SessionConfig, WindowConfig};
