#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use javelin_strike::core::actor::Actor;
use javelin_strike::core::components::{Arsenal, Player};
use javelin_strike::core::events::SceneRequest;
use javelin_strike::core::save::SaveStore;
use javelin_strike::{AppState, GameConfig, SessionCorePlugin, SessionPhase};

pub const LEVEL: &str = "Level_One";

/// Headless app with the full session/actor core and a save slot under `save_dir`.
pub fn headless_app(save_dir: &Path) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)));
    app.init_resource::<ButtonInput<KeyCode>>();
    let cfg = GameConfig {
        levels_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/assets/levels").into(),
        ..Default::default()
    };
    app.insert_resource(cfg);
    app.insert_resource(SaveStore::new(save_dir, "save.json"));
    app.add_plugins(SessionCorePlugin);
    app
}

pub fn app_state(app: &App) -> Option<AppState> {
    app.world().get_resource::<State<AppState>>().map(|s| *s.get())
}

pub fn phase(app: &App) -> Option<SessionPhase> {
    app.world()
        .get_resource::<State<SessionPhase>>()
        .map(|s| *s.get())
}

pub fn player(app: &mut App) -> Option<Entity> {
    let world = app.world_mut();
    world
        .query_filtered::<Entity, (With<Player>, With<Actor>, With<Arsenal>)>()
        .iter(world)
        .next()
}

/// Runs frames until the gameplay scene is spawned and running, or panics.
pub fn wait_for_gameplay(app: &mut App) -> Entity {
    for _ in 0..500 {
        app.update();
        if app_state(app) == Some(AppState::Gameplay) {
            if let Some(e) = player(app) {
                app.update();
                return e;
            }
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("gameplay scene never became ready");
}

/// Waits for the current scene to be left, then for the reloaded one to become ready.
pub fn wait_for_reload(app: &mut App) -> Entity {
    for _ in 0..50 {
        if app_state(app) != Some(AppState::Gameplay) {
            return wait_for_gameplay(app);
        }
        app.update();
    }
    panic!("scene was never left");
}

pub fn load_level(app: &mut App) -> Entity {
    app.world_mut()
        .send_event(SceneRequest::Load(LEVEL.to_string()));
    wait_for_gameplay(app)
}

/// One press frame followed by one release frame.
pub fn tap(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
    app.update();
}

pub fn actor(app: &App, e: Entity) -> &Actor {
    app.world().get::<Actor>(e).unwrap()
}

pub fn actor_mut(app: &mut App, e: Entity) -> Mut<'_, Actor> {
    app.world_mut().get_mut::<Actor>(e).unwrap()
}

pub fn run_frames(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}
