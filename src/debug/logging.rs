#[cfg(feature = "debug")]
use super::state::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::app::state::SessionPhase;
#[cfg(feature = "debug")]
use crate::core::session::SessionState;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time<Real>>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    session: Res<SessionState>,
    phase: Option<Res<State<SessionPhase>>>,
) {
    if !state.periodic_logging {
        return;
    }
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    info!(
        target: "debug",
        "SIM frame={} fps={:.1} ft_ms={:.1} phase={:?} score={} bonus={:?} cp_lives={} entities={} pickups={}",
        state.frame_counter,
        stats.fps,
        stats.frame_time_ms,
        phase.map(|p| *p.get()),
        session.score,
        session.bonus_claimed,
        session.checkpoint.lives,
        stats.level_entities,
        stats.live_pickups
    );
}
