#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub frame_counter: u64,
    pub time_accum: f32,
    pub log_interval: f32,
    /// Periodic session log line; toggled together with each dump.
    pub periodic_logging: bool,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            frame_counter: 0,
            time_accum: 0.0,
            log_interval: 2.0,
            periodic_logging: true,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub level_entities: usize,
    pub live_pickups: usize,
}
