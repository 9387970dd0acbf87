//! Session controller: phase machine, score bonuses, commands and the save lifecycle.
pub mod commands;
pub mod lifecycle;
pub mod phase;

use bevy::prelude::*;

use crate::app::state::{AppState, SessionPhase};
use crate::core::components::BossEncounter;
use crate::core::events::{
    AudioCue, GameFlowEvent, HintRequested, ScoreAwarded, ScreenFlash, SessionCommand,
};
use crate::core::save::SaveSealer;
use crate::core::session::SessionState;
use crate::core::system::system_order::{PostPhysicsSet, SessionSet};

pub use lifecycle::{build_record, run_game_over};

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionState>()
            .init_resource::<BossEncounter>()
            .init_resource::<SaveSealer>()
            .add_event::<SessionCommand>()
            .add_event::<GameFlowEvent>()
            .add_event::<AudioCue>()
            .add_event::<HintRequested>()
            .add_event::<ScreenFlash>()
            .add_event::<ScoreAwarded>()
            .add_systems(OnEnter(SessionPhase::Running), phase::thaw_simulation)
            .add_systems(OnExit(AppState::Gameplay), phase::thaw_simulation)
            .add_systems(
                OnEnter(SessionPhase::GameOver),
                (phase::freeze_simulation, lifecycle::on_enter_game_over),
            );
        for frozen in [
            SessionPhase::Paused,
            SessionPhase::MapOpen,
            SessionPhase::ContinuePending,
        ] {
            app.add_systems(OnEnter(frozen), phase::freeze_simulation);
        }
        app.add_systems(
            Update,
            (
                phase::apply_score_awards,
                phase::session_tick,
                commands::session_keyboard_commands,
                commands::continue_from_checkpoint,
                commands::handle_session_commands,
            )
                .chain()
                .in_set(SessionSet)
                .run_if(in_state(AppState::Gameplay)),
        )
        .add_systems(
            FixedUpdate,
            phase::health_gate
                .in_set(PostPhysicsSet)
                .run_if(in_state(SessionPhase::Running)),
        )
        .add_systems(
            Last,
            lifecycle::save_on_exit.run_if(in_state(AppState::Gameplay)),
        );
    }
}
