use super::types::*;
use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ParsedInputConfig {
    pub input_map: InputMap,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ActionDecl {
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    actions: Option<BTreeMap<String, ActionDecl>>,
    bindings: Option<HashMap<String, Vec<String>>>,
    #[serde(rename = "debug_bindings")]
    debug_bindings: Option<HashMap<String, Vec<String>>>,
}

/// Parses the action/binding TOML. Bad entries are reported and skipped; the rest still loads.
pub fn parse_input_toml(raw: &str, debug_layer: bool) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            result.errors.push(format!("Top-level parse: {e}"));
            return result;
        }
    };
    let mut input_map = InputMap::default();
    if let Some(map) = root.actions {
        for (name, decl) in map {
            if !validate_action_name(&name) {
                result
                    .errors
                    .push(format!("Invalid action name '{}': must be PascalCase", name));
                continue;
            }
            input_map.register_action(&name, decl.description.as_deref().unwrap_or_default());
        }
    }

    let mut all_bindings: HashMap<String, Vec<String>> = HashMap::new();
    if let Some(b) = root.bindings {
        for (k, v) in b {
            all_bindings.entry(k).or_default().extend(v);
        }
    }
    if debug_layer {
        if let Some(db) = root.debug_bindings {
            for (k, v) in db {
                all_bindings.entry(k).or_default().extend(v);
            }
        }
    }

    for (action_name, list) in all_bindings {
        if !input_map.name_to_id.contains_key(&action_name) {
            result
                .errors
                .push(format!("Binding references unknown action '{}'", action_name));
            continue;
        }
        for spec in &list {
            match parse_chord(spec) {
                Ok(chord) => input_map.bind(&action_name, &chord),
                Err(err) => result
                    .errors
                    .push(format!("[binding {} '{}'] {err}", action_name, spec)),
            }
        }
    }
    result.input_map = input_map;
    result
}

fn validate_action_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// `"ControlLeft+KeyS"` -> both keys.
fn parse_chord(spec: &str) -> Result<SmallVec<[KeyCode; 2]>, String> {
    let mut keys: SmallVec<[KeyCode; 2]> = SmallVec::new();
    let mut seen = HashSet::new();
    for part in spec.split('+') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        let name = p.strip_prefix("Key:").unwrap_or(p);
        let key = parse_keycode(name)?;
        if !seen.insert(key) {
            return Err(format!("Duplicate key in chord: {:?}", key));
        }
        keys.push(key);
    }
    if keys.is_empty() {
        return Err("Empty binding".into());
    }
    Ok(keys)
}

fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    use bevy::input::keyboard::KeyCode::*;
    let letter = |c: char| -> Option<KeyCode> {
        const LETTERS: [KeyCode; 26] = [
            KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM, KeyN,
            KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        ];
        c.is_ascii_uppercase()
            .then(|| LETTERS[(c as u8 - b'A') as usize])
    };
    let single = name.strip_prefix("Key").unwrap_or(name);
    if single.len() == 1 {
        if let Some(k) = single.chars().next().and_then(letter) {
            return Ok(k);
        }
    }
    let kc = match name {
        "Digit0" => Digit0,
        "Digit1" => Digit1,
        "Digit2" => Digit2,
        "Digit3" => Digit3,
        "Digit4" => Digit4,
        "Digit5" => Digit5,
        "Digit6" => Digit6,
        "Digit7" => Digit7,
        "Digit8" => Digit8,
        "Digit9" => Digit9,
        "F1" => F1,
        "F2" => F2,
        "F3" => F3,
        "F4" => F4,
        "F5" => F5,
        "F6" => F6,
        "F7" => F7,
        "F8" => F8,
        "F9" => F9,
        "F10" => F10,
        "F11" => F11,
        "F12" => F12,
        "Space" => Space,
        "Enter" => Enter,
        "Escape" => Escape,
        "Backspace" => Backspace,
        "Tab" => Tab,
        "ShiftLeft" => ShiftLeft,
        "ShiftRight" => ShiftRight,
        "ControlLeft" => ControlLeft,
        "ControlRight" => ControlRight,
        "AltLeft" => AltLeft,
        "ArrowUp" => ArrowUp,
        "ArrowDown" => ArrowDown,
        "ArrowLeft" => ArrowLeft,
        "ArrowRight" => ArrowRight,
        other => return Err(format!("Unsupported KeyCode '{}' (extend parser)", other)),
    };
    Ok(kc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [actions]
        Pause = { description = "Toggle pause" }
        Save = {}
        Run = {}

        [bindings]
        Pause = ["Escape", "KeyP"]
        Save = ["ControlLeft+S"]
        Run = ["Key:ShiftLeft"]

        [debug_bindings]
        Pause = ["F12"]
    "#;

    #[test]
    fn parses_actions_and_chords() {
        let parsed = parse_input_toml(SAMPLE, false);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let map = &parsed.input_map;
        assert_eq!(map.actions.len(), 3);
        let pause = map.name_to_id["Pause"];
        assert_eq!(map.bindings[&pause].len(), 2);
        let save = map.name_to_id["Save"];
        assert_eq!(
            map.bindings[&save][0].chord.as_slice(),
            &[KeyCode::ControlLeft, KeyCode::KeyS]
        );
    }

    #[test]
    fn shipped_chords_avoid_movement_keys() {
        let parsed = parse_input_toml(include_str!("../../../assets/config/input.toml"), true);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let map = &parsed.input_map;
        let movement: HashSet<ActionId> = ["MoveUp", "MoveDown", "MoveLeft", "MoveRight"]
            .iter()
            .map(|n| map.name_to_id[*n])
            .collect();
        let movement_keys: HashSet<KeyCode> = movement
            .iter()
            .flat_map(|id| map.bindings[id].iter().flat_map(|b| b.chord.iter().copied()))
            .collect();
        for (id, bindings) in &map.bindings {
            if movement.contains(id) {
                continue;
            }
            for b in bindings {
                assert!(
                    b.chord.iter().all(|k| !movement_keys.contains(k)),
                    "{:?} shares a movement key",
                    b.chord
                );
            }
        }
    }

    #[test]
    fn debug_layer_adds_bindings() {
        let parsed = parse_input_toml(SAMPLE, true);
        let pause = parsed.input_map.name_to_id["Pause"];
        assert_eq!(parsed.input_map.bindings[&pause].len(), 3);
    }

    #[test]
    fn bad_entries_are_reported_not_fatal() {
        let raw = r#"
            [actions]
            lowercase = {}
            Jump = {}
            [bindings]
            Jump = ["Space", "Hyper"]
            Ghost = ["KeyG"]
        "#;
        let parsed = parse_input_toml(raw, false);
        assert_eq!(parsed.errors.len(), 3, "{:?}", parsed.errors);
        assert!(parsed.input_map.name_to_id.contains_key("Jump"));
        let jump = parsed.input_map.name_to_id["Jump"];
        assert_eq!(parsed.input_map.bindings[&jump].len(), 1);
    }

    #[test]
    fn garbage_toml_reports_top_level_error() {
        let parsed = parse_input_toml("[[[", false);
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.input_map.actions.is_empty());
    }
}
