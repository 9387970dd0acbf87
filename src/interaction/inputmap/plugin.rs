use bevy::prelude::*;

use super::parse::parse_input_toml;
use super::systems::system_evaluate_bindings;
use super::types::InputMap;

/// Built-in bindings used when no config file is found on disk.
pub const DEFAULT_INPUT_TOML: &str = include_str!("../../../assets/config/input.toml");

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputActionUpdateSet;

pub struct InputActionsPlugin;
impl Plugin for InputActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputMap>()
            .configure_sets(PreUpdate, InputActionUpdateSet)
            .add_systems(PreStartup, load_initial_input_map)
            .add_systems(
                PreUpdate,
                system_evaluate_bindings.in_set(InputActionUpdateSet),
            );
    }
}

pub fn input_config_path() -> String {
    std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| "assets/config/input.toml".into())
}

fn load_initial_input_map(mut commands: Commands) {
    let path = input_config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(target: "input", "input config {path} unreadable ({e}); using built-in bindings");
            DEFAULT_INPUT_TOML.to_string()
        }
    };
    let parsed = parse_input_toml(&raw, cfg!(feature = "debug"));
    if !parsed.errors.is_empty() {
        for e in parsed.errors {
            error!(target: "input", "INPUT MAP ERROR: {e}");
        }
    } else {
        info!(target: "input", "Input map loaded: {} actions", parsed.input_map.actions.len());
    }
    commands.insert_resource(parsed.input_map);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::inputmap::types::actions;

    #[test]
    fn built_in_bindings_cover_gameplay_actions() {
        let parsed = parse_input_toml(DEFAULT_INPUT_TOML, true);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        for name in [
            actions::MOVE_UP,
            actions::MOVE_DOWN,
            actions::MOVE_LEFT,
            actions::MOVE_RIGHT,
            actions::RUN,
            actions::PAUSE,
            actions::MAP,
            actions::CONTINUE,
            actions::RESTART,
            actions::MAIN_MENU,
            actions::NEXT_LEVEL,
            actions::SAVE,
            actions::QUIT,
            actions::SWITCH_SPECIAL,
            actions::NEW_GAME,
            actions::LOAD_GAME,
            actions::DEBUG_DUMP,
        ] {
            let id = parsed.input_map.name_to_id.get(name);
            assert!(id.is_some(), "missing action {name}");
            assert!(parsed.input_map.bindings.contains_key(id.unwrap()), "{name} unbound");
        }
    }

    #[test]
    fn evaluates_in_pre_update() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins(InputActionsPlugin);
        // Replace whatever was loaded from disk with the built-in map.
        app.update();
        app.insert_resource(parse_input_toml(DEFAULT_INPUT_TOML, false).input_map);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        assert!(app.world().resource::<InputMap>().just_pressed("Pause"));
    }
}
