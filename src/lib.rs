pub mod app;
pub mod audio;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::{GamePlugin, SessionCorePlugin};
pub use app::state::{AppState, SessionPhase};
pub use core::config::{GameConfig, WindowConfig};
pub use core::session::SessionState;
