use bevy::prelude::*;

/// High-level app lifecycle state.
/// MainMenu -> Loading -> Gameplay (-> Loading again on restart / next level)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Player chooses new game or continue.
    #[default]
    MainMenu,
    /// Transitional state while a scene load is in flight.
    Loading,
    /// Level spawned; the session phase refines what runs.
    Gameplay,
}

/// Session phase. Anything but `Running` freezes virtual time.
/// Only exists during `AppState::Gameplay`; every scene entry starts `Running`.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(AppState = AppState::Gameplay)]
pub enum SessionPhase {
    #[default]
    Running,
    Paused,
    MapOpen,
    /// Actor died with lives left; waiting for Continue.
    ContinuePending,
    GameOver,
}

impl SessionPhase {
    pub fn freezes_simulation(self) -> bool {
        !matches!(self, SessionPhase::Running)
    }
}
