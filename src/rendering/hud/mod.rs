//! In-game overlays: status texts, health bar, phase panels, hints and the damage flash.
pub mod systems;
pub mod widgets;

use bevy::prelude::*;

use crate::app::state::{AppState, SessionPhase};
use crate::core::system::system_order::PresentationSet;

use systems::*;
use widgets::*;

pub use systems::{ammo_label, hint_text, HintTimer};
pub use widgets::{HudField, HudRoot, SessionButton};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HintTimer>()
            .add_systems(Startup, spawn_hud)
            .add_systems(
                OnEnter(AppState::Gameplay),
                (
                    show::<HudRoot>,
                    hide::<PausePanel>,
                    hide::<MapPanel>,
                    hide::<ContinuePanel>,
                    hide::<FailurePanel>,
                    hide::<HintPanel>,
                ),
            )
            .add_systems(OnExit(AppState::Gameplay), (hide::<HudRoot>, clear_hint))
            .add_systems(OnEnter(SessionPhase::Paused), show::<PausePanel>)
            .add_systems(OnExit(SessionPhase::Paused), hide::<PausePanel>)
            .add_systems(OnEnter(SessionPhase::MapOpen), show::<MapPanel>)
            .add_systems(OnExit(SessionPhase::MapOpen), hide::<MapPanel>)
            .add_systems(OnEnter(SessionPhase::ContinuePending), show::<ContinuePanel>)
            .add_systems(OnExit(SessionPhase::ContinuePending), hide::<ContinuePanel>)
            .add_systems(OnEnter(SessionPhase::GameOver), show::<FailurePanel>)
            .add_systems(OnExit(SessionPhase::GameOver), hide::<FailurePanel>)
            .add_systems(
                Update,
                (
                    update_hud_texts,
                    show_hints,
                    expire_hints,
                    drive_damage_flash,
                    session_buttons,
                )
                    .in_set(PresentationSet)
                    .run_if(in_state(AppState::Gameplay)),
            );
    }
}

fn clear_hint(mut timer: ResMut<HintTimer>) {
    timer.0 = None;
}
