#[cfg(feature = "debug")]
use super::state::DebugState;
#[cfg(feature = "debug")]
use crate::core::actor::Actor;
#[cfg(feature = "debug")]
use crate::core::components::{Arsenal, Player};
#[cfg(feature = "debug")]
use crate::core::session::SessionState;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::{actions, InputMap};
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn actor_dump(actor: &Actor, arsenal: &Arsenal, tf: &Transform) -> String {
    format!(
        "actor life={:?} health={}/{} lives={} facing={:?} running={} pos=({:.1},{:.1}) clip={} rockets={} javelins={} special={:?}",
        actor.life,
        actor.health,
        actor.max_health,
        actor.lives,
        actor.facing,
        actor.is_running,
        tf.translation.x,
        tf.translation.y,
        arsenal.clip_ammo,
        arsenal.rockets_ammo,
        arsenal.javelin_ammo,
        arsenal.selected_special
    )
}

/// `DebugDump` logs the session and actor once and toggles the periodic log line.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    input_map: Option<Res<InputMap>>,
    mut state: ResMut<DebugState>,
    session: Res<SessionState>,
    q_actor: Query<(&Actor, &Arsenal, &Transform), With<Player>>,
) {
    let Some(input_map) = input_map else {
        return;
    };
    if !input_map.just_pressed(actions::DEBUG_DUMP) {
        return;
    }
    state.periodic_logging = !state.periodic_logging;
    info!(target: "debug", "session {:?}", *session);
    match q_actor.single() {
        Ok((actor, arsenal, tf)) => info!(target: "debug", "{}", actor_dump(actor, arsenal, tf)),
        Err(_) => info!(target: "debug", "no actor in scene"),
    }
}
