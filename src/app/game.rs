use bevy::prelude::*;

use super::menu::MenuPlugin;
use super::state::{AppState, SessionPhase};
use crate::audio::AudioCuePlugin;
use crate::core::level::SceneLoaderPlugin;
use crate::core::system::system_order::{
    ActorInputSet, ActorSet, PostPhysicsSet, PrePhysicsSet, PresentationSet, SessionSet,
};
#[cfg(feature = "debug")]
use crate::debug::DebugPlugin;
use crate::gameplay::actor::ActorPlugin;
use crate::gameplay::lifetime::LifetimePlugin;
use crate::gameplay::session::SessionPlugin;
use crate::gameplay::spawn::LevelSpawnPlugin;
use crate::gameplay::validation::SceneValidationPlugin;
use crate::gameplay::weapons::WeaponsPlugin;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::hot_reload::InputMapHotReloadPlugin;
use crate::interaction::inputmap::InputActionsPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::hit_tint::HitTintPlugin;
use crate::rendering::hud::HudPlugin;

/// State machines, input, scene loading and both controllers. No window, renderer or physics
/// backend, so it runs under `MinimalPlugins` + `StatesPlugin`.
/// Expects `GameConfig` and `SaveStore` to be inserted by the caller.
pub struct SessionCorePlugin;

impl Plugin for SessionCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_sub_state::<SessionPhase>()
            .configure_sets(
                Update,
                (ActorInputSet, ActorSet, SessionSet, PresentationSet).chain(),
            )
            .configure_sets(FixedUpdate, PostPhysicsSet.after(PrePhysicsSet))
            .add_plugins((
                InputActionsPlugin,
                SceneLoaderPlugin,
                SessionPlugin,
                ActorPlugin,
                WeaponsPlugin,
                LifetimePlugin,
                LevelSpawnPlugin,
                MenuPlugin,
            ));
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            SessionCorePlugin,
            PhysicsSetupPlugin,
            CameraPlugin,
            HudPlugin,
            HitTintPlugin,
            AudioCuePlugin,
            SceneValidationPlugin,
            #[cfg(feature = "debug")]
            DebugPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
            #[cfg(feature = "debug")]
            InputMapHotReloadPlugin,
        ));
    }
}
