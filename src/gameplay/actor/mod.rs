//! Actor controller: movement, aim, trigger dispatch, death and the checkpoint mirror.
pub mod death;
pub mod movement;
pub mod triggers;

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::app::state::{AppState, SessionPhase};
use crate::core::system::system_order::{ActorInputSet, ActorSet, PrePhysicsSet};

pub use death::{check_actor_death, mirror_checkpoint, record_death, revive};
pub use movement::CursorWorld;
pub use triggers::GunSwap;

pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorWorld>()
            .add_event::<CollisionEvent>()
            .add_event::<GunSwap>()
            .add_systems(
                Update,
                (movement::track_cursor, movement::read_movement_input)
                    .chain()
                    .in_set(ActorInputSet)
                    .run_if(in_state(SessionPhase::Running)),
            )
            .add_systems(
                Update,
                (
                    triggers::resolve_trigger_contacts
                        .run_if(in_state(SessionPhase::Running)),
                    triggers::apply_gun_swaps,
                    check_actor_death,
                    mirror_checkpoint,
                    movement::apply_facing_to_sprite,
                )
                    .chain()
                    .in_set(ActorSet)
                    .run_if(in_state(AppState::Gameplay)),
            )
            .add_systems(
                FixedUpdate,
                movement::apply_actor_velocity
                    .in_set(PrePhysicsSet)
                    .run_if(in_state(SessionPhase::Running)),
            );
    }
}
