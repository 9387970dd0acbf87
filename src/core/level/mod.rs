pub mod layout;
pub mod loader;

pub use layout::{CheckpointDef, LevelLayout, TriggerDef, Vec2Def, WallDef};
pub use loader::{level_path, CurrentScene, LoadedLevel, SceneLoad, SceneLoaderPlugin};
