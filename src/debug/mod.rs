//! Debug module: feature gated session dumps and periodic stats logging.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod state;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use state::{DebugState, DebugStats};

#[cfg(feature = "debug")]
use crate::core::system::system_order::PresentationSet;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use keys::debug_key_input_system;
        use logging::debug_logging_system;
        use stats::debug_stats_collect_system;

        app.init_resource::<DebugState>()
            .init_resource::<DebugStats>()
            .add_systems(
                Update,
                (
                    debug_stats_collect_system,
                    debug_key_input_system,
                    debug_logging_system,
                )
                    .chain()
                    .after(PresentationSet),
            );
    }
}
