use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Javelin Strike".into(),
            auto_close: 0.0,
        }
    }
}

/// Movement and vitality tuning for the playable actor.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ActorConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub max_health: i32,
    pub starting_lives: u32,
    pub starting_rockets: u32,
    pub starting_javelins: u32,
    pub collider_radius: f32,
}
impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            walk_speed: 250.0,
            run_speed: 500.0,
            max_health: 500,
            starting_lives: 3,
            starting_rockets: 4,
            starting_javelins: 2,
            collider_radius: 14.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Cumulative score values granting one extra life each, lowest first.
    pub bonus_breakpoints: [u32; 3],
    /// How many times the bonus cue is stacked for each tier.
    pub bonus_cue_repeats: [u32; 3],
    /// Above this score a death costs 1/5 of it, otherwise 1/3.
    pub penalty_threshold: u32,
    pub hint_seconds: f32,
    pub grace_seconds: f32,
    pub death_proxy_seconds: f32,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bonus_breakpoints: [4000, 12500, 22000],
            bonus_cue_repeats: [1, 5, 7],
            penalty_threshold: 10_000,
            hint_seconds: 3.0,
            grace_seconds: 2.0,
            death_proxy_seconds: 0.028,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SaveConfig {
    pub dir: String,
    pub file_name: String,
}
impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            dir: "saves".into(),
            file_name: "player_data.json".into(),
        }
    }
}

/// Logical cue / track names mapped to asset paths. Unmapped names are only logged.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sounds: HashMap<String, String>,
    pub music: HashMap<String, String>,
    pub bonus_cue: String,
    pub volume: f32,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sounds: HashMap::new(),
            music: HashMap::new(),
            bonus_cue: "PickUpWeapon".into(),
            volume: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    /// `LogPlugin` filter string.
    pub log_filter: String,
    pub actor: ActorConfig,
    pub session: SessionConfig,
    pub save: SaveConfig,
    pub audio: AudioConfig,
    /// Scene names in build order; index 0 is the main menu.
    pub scenes: Vec<String>,
    pub levels_dir: String,
    pub rapier_debug: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            log_filter: "info,wgpu=error,naga=warn".into(),
            actor: Default::default(),
            session: Default::default(),
            save: Default::default(),
            audio: Default::default(),
            scenes: vec!["Main_Menu".into(), "Level_One".into()],
            levels_dir: "assets/levels".into(),
            rapier_debug: false,
        }
    }
}

impl GameConfig {
    /// Merge several RON files (later files override earlier keys) and deserialize the result.
    /// Returns the config, the files actually used and any errors met along the way.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let a = &self.actor;
        if a.walk_speed <= 0.0 {
            w.push("actor.walk_speed must be > 0".into());
        }
        if a.run_speed < a.walk_speed {
            w.push(format!(
                "actor.run_speed {} slower than walk_speed {}",
                a.run_speed, a.walk_speed
            ));
        }
        if a.max_health <= 0 {
            w.push("actor.max_health must be > 0".into());
        }
        if a.starting_lives == 0 {
            w.push("actor.starting_lives is 0; first death ends the game".into());
        }
        let s = &self.session;
        if !s.bonus_breakpoints.windows(2).all(|p| p[0] < p[1]) {
            w.push(format!(
                "session.bonus_breakpoints {:?} not strictly increasing",
                s.bonus_breakpoints
            ));
        }
        if s.grace_seconds < 0.0 {
            w.push("session.grace_seconds negative -> grace window disabled".into());
        }
        if s.death_proxy_seconds <= 0.0 {
            w.push("session.death_proxy_seconds must be > 0".into());
        }
        if self.save.file_name.trim().is_empty() {
            w.push("save.file_name empty".into());
        }
        if self.scenes.len() < 2 {
            w.push(format!(
                "scenes lists {} entries; need the main menu plus at least one level",
                self.scenes.len()
            ));
        }
        if !(0.0..=2.0).contains(&self.audio.volume) {
            w.push(format!("audio.volume {} outside 0..2", self.audio.volume));
        }
        w
    }

    /// Scene name that follows `current` in build order.
    pub fn next_scene(&self, current: &str) -> Option<&str> {
        let idx = self.scenes.iter().position(|s| s == current)?;
        self.scenes.get(idx + 1).map(String::as_str)
    }

    /// First gameplay scene (build index 1).
    pub fn first_level(&self) -> Option<&str> {
        self.scenes.get(1).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn next_scene_follows_build_order() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.next_scene("Main_Menu"), Some("Level_One"));
        assert_eq!(cfg.next_scene("Level_One"), None);
        assert_eq!(cfg.first_level(), Some("Level_One"));
    }

    #[test]
    fn unordered_breakpoints_warn() {
        let mut cfg = GameConfig::default();
        cfg.session.bonus_breakpoints = [5000, 4000, 22000];
        assert!(cfg
            .validate()
            .iter()
            .any(|w| w.contains("bonus_breakpoints")));
    }
}
