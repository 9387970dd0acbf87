use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::GameConfig;

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}

impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
    primed: bool,
}

impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
            primed: false,
        }
    }
}

/// Polls the layered config files and swaps in the new `GameConfig` when one changes.
pub struct ConfigHotReloadPlugin;

impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfigReloadSettings>()
            .init_resource::<ConfigReloadState>()
            .add_systems(Update, poll_and_reload_config);
    }
}

fn poll_and_reload_config(
    time: Res<Time<Real>>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut windows: Query<&mut Window>,
) {
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }

    let mut dirty = false;
    for path in &settings.paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let prev = state.last_mod.insert(path.clone(), mod_time);
        dirty |= prev.is_none_or(|p| mod_time > p);
    }
    // The first poll only records timestamps.
    let primed = std::mem::replace(&mut state.primed, true);
    if !dirty || !primed {
        return;
    }

    let (new_cfg, used, errors) = GameConfig::load_layered(settings.paths.iter());
    for e in errors {
        warn!(target: "config", "hot reload issue: {e}");
    }
    for w in new_cfg.validate() {
        warn!(target: "config", "{w}");
    }
    if *cfg_res == new_cfg {
        return;
    }
    info!(target: "config", "hot reload applied from {:?}", used);
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height {
            window
                .resolution
                .set(new_cfg.window.width, new_cfg.window.height);
        }
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    *cfg_res = new_cfg;
}
