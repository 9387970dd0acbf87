use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};
use std::path::PathBuf;

use crate::app::state::AppState;
use crate::core::config::GameConfig;
use crate::core::events::{SceneRequest, MAIN_MENU_SCENE};

use super::layout::LevelLayout;

/// Resource: name of the scene currently shown (or being left while a load is in flight).
#[derive(Debug, Resource, Clone, PartialEq, Eq)]
pub struct CurrentScene {
    pub name: String,
}

impl Default for CurrentScene {
    fn default() -> Self {
        Self {
            name: MAIN_MENU_SCENE.to_string(),
        }
    }
}

/// Resource: layout of the gameplay scene that finished loading.
#[derive(Debug, Resource, Clone)]
pub struct LoadedLevel(pub LevelLayout);

/// Resource: the single in-flight scene load. Cannot be cancelled once started.
#[derive(Resource)]
pub struct SceneLoad {
    pub target: String,
    task: Task<anyhow::Result<LevelLayout>>,
}

impl SceneLoad {
    pub fn start(target: String, path: PathBuf) -> Self {
        let pool = AsyncComputeTaskPool::get();
        let task = pool.spawn(async move { LevelLayout::load_from_file(path) });
        Self { target, task }
    }

    /// Non-blocking completion check; `Some` once the task has finished.
    pub fn poll(&mut self) -> Option<anyhow::Result<LevelLayout>> {
        block_on(future::poll_once(&mut self.task))
    }
}

pub fn level_path(cfg: &GameConfig, scene: &str) -> PathBuf {
    PathBuf::from(&cfg.levels_dir).join(format!("{scene}.ron"))
}

pub struct SceneLoaderPlugin;

impl Plugin for SceneLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentScene>()
            .add_event::<SceneRequest>()
            .add_systems(Update, (handle_scene_requests, poll_scene_load).chain());
    }
}

pub fn handle_scene_requests(
    mut commands: Commands,
    mut requests: EventReader<SceneRequest>,
    cfg: Res<GameConfig>,
    in_flight: Option<Res<SceneLoad>>,
    mut current: ResMut<CurrentScene>,
    mut next_app: ResMut<NextState<AppState>>,
) {
    let mut busy = in_flight.is_some();
    for req in requests.read() {
        let target = match req {
            SceneRequest::Load(name) => name.clone(),
            SceneRequest::ReloadCurrent => current.name.clone(),
        };
        if busy {
            warn!(target: "level", "scene load already in flight; ignoring request for '{}'", target);
            continue;
        }
        if target == MAIN_MENU_SCENE {
            info!(target: "level", "switching to main menu");
            current.name = target;
            next_app.set(AppState::MainMenu);
            continue;
        }
        let path = level_path(&cfg, &target);
        info!(target: "level", "loading scene '{}' from {}", target, path.display());
        commands.insert_resource(SceneLoad::start(target, path));
        next_app.set(AppState::Loading);
        busy = true;
    }
}

pub fn poll_scene_load(
    mut commands: Commands,
    load: Option<ResMut<SceneLoad>>,
    mut current: ResMut<CurrentScene>,
    mut next_app: ResMut<NextState<AppState>>,
) {
    let Some(mut load) = load else {
        return;
    };
    let Some(result) = load.poll() else {
        return;
    };
    let target = load.target.clone();
    commands.remove_resource::<SceneLoad>();
    match result {
        Ok(layout) => {
            info!(
                target: "level",
                "scene '{}' ready: {} triggers, {} walls, boss={}",
                target,
                layout.triggers.len(),
                layout.walls.len(),
                layout.boss_active
            );
            current.name = target;
            commands.insert_resource(LoadedLevel(layout));
            next_app.set(AppState::Gameplay);
        }
        Err(e) => {
            error!(target: "level", "failed to load scene '{}': {e:#}", target);
            current.name = MAIN_MENU_SCENE.to_string();
            next_app.set(AppState::MainMenu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app_with_levels(dir: &std::path::Path) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        let mut cfg = GameConfig::default();
        cfg.levels_dir = dir.to_string_lossy().to_string();
        app.insert_resource(cfg);
        app.init_state::<AppState>();
        app.add_plugins(SceneLoaderPlugin);
        app
    }

    fn run_until_loaded(app: &mut App) {
        for _ in 0..200 {
            app.update();
            if !app.world().contains_resource::<SceneLoad>() {
                app.update();
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        panic!("scene load never completed");
    }

    #[test]
    fn loads_level_and_enters_gameplay() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Level_One.ron"),
            "(version: 1, name: \"Level_One\", player_spawn: (x: 0.0, y: 0.0), checkpoint: (position: (x: 1.0, y: 2.0)))",
        )
        .unwrap();
        let mut app = app_with_levels(dir.path());
        app.world_mut().send_event(SceneRequest::Load("Level_One".into()));
        run_until_loaded(&mut app);
        assert_eq!(app.world().resource::<CurrentScene>().name, "Level_One");
        assert!(app.world().contains_resource::<LoadedLevel>());
        assert_eq!(*app.world().resource::<State<AppState>>().get(), AppState::Gameplay);
    }

    #[test]
    fn missing_level_falls_back_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_levels(dir.path());
        app.world_mut().send_event(SceneRequest::Load("Nowhere".into()));
        run_until_loaded(&mut app);
        assert_eq!(app.world().resource::<CurrentScene>().name, MAIN_MENU_SCENE);
        assert_eq!(*app.world().resource::<State<AppState>>().get(), AppState::MainMenu);
    }

    #[test]
    fn second_request_while_loading_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_levels(dir.path());
        app.world_mut().send_event(SceneRequest::Load("A".into()));
        app.world_mut().send_event(SceneRequest::Load("B".into()));
        app.update();
        if let Some(load) = app.world().get_resource::<SceneLoad>() {
            assert_eq!(load.target, "A");
        }
    }
}
