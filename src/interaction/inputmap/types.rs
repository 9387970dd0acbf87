use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u16); // internal index (array position)

#[derive(Debug, Clone)]
pub struct ActionMeta {
    pub id: ActionId,
    pub name: String,
    pub description: String,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStateBinary {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl ActionStateBinary {
    /// Feeds this frame's raw activity and derives the edges from the previous frame.
    pub fn advance(&mut self, active: bool) {
        self.just_pressed = active && !self.pressed;
        self.just_released = !active && self.pressed;
        self.pressed = active;
    }
}

/// Keys that must all be held for the binding to be active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub chord: SmallVec<[KeyCode; 2]>,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct InputMap {
    pub actions: Vec<ActionMeta>,
    pub name_to_id: HashMap<String, ActionId>,
    pub bindings: HashMap<ActionId, Vec<Binding>>,
    pub states: Vec<ActionStateBinary>,
    pub frame_counter: u64,
}

impl InputMap {
    pub fn register_action(&mut self, name: &str, description: &str) -> ActionId {
        if let Some(id) = self.name_to_id.get(name) {
            return *id;
        }
        let id = ActionId(self.actions.len() as u16);
        self.actions.push(ActionMeta {
            id,
            name: name.to_string(),
            description: description.to_string(),
        });
        self.name_to_id.insert(name.to_string(), id);
        self.states.push(ActionStateBinary::default());
        id
    }

    pub fn bind(&mut self, name: &str, chord: &[KeyCode]) {
        let id = self.register_action(name, "");
        self.bindings.entry(id).or_default().push(Binding {
            chord: SmallVec::from_slice(chord),
        });
    }

    pub fn get_state(&self, name: &str) -> Option<&ActionStateBinary> {
        self.name_to_id
            .get(name)
            .and_then(|id| self.states.get(id.0 as usize))
    }

    pub fn pressed(&self, name: &str) -> bool {
        self.get_state(name).is_some_and(|s| s.pressed)
    }

    pub fn just_pressed(&self, name: &str) -> bool {
        self.get_state(name).is_some_and(|s| s.just_pressed)
    }

    pub fn just_released(&self, name: &str) -> bool {
        self.get_state(name).is_some_and(|s| s.just_released)
    }

    /// Evaluates every binding against the keyboard and advances the action states.
    pub fn update_from_keys(&mut self, keys: &ButtonInput<KeyCode>) {
        self.frame_counter += 1;
        for (idx, state) in self.states.iter_mut().enumerate() {
            let id = ActionId(idx as u16);
            let active = self.bindings.get(&id).is_some_and(|list| {
                list.iter()
                    .any(|b| !b.chord.is_empty() && b.chord.iter().all(|k| keys.pressed(*k)))
            });
            state.advance(active);
        }
    }

    /// Overrides one action's raw activity for this frame (scripted input, tests).
    pub fn feed(&mut self, name: &str, active: bool) {
        if let Some(id) = self.name_to_id.get(name).copied() {
            if let Some(st) = self.states.get_mut(id.0 as usize) {
                st.advance(active);
            }
        }
    }
}

/// Action names used by gameplay systems.
pub mod actions {
    pub const MOVE_UP: &str = "MoveUp";
    pub const MOVE_DOWN: &str = "MoveDown";
    pub const MOVE_LEFT: &str = "MoveLeft";
    pub const MOVE_RIGHT: &str = "MoveRight";
    pub const RUN: &str = "Run";
    pub const PAUSE: &str = "Pause";
    pub const MAP: &str = "Map";
    pub const CONTINUE: &str = "Continue";
    pub const RESTART: &str = "Restart";
    pub const MAIN_MENU: &str = "MainMenu";
    pub const NEXT_LEVEL: &str = "NextLevel";
    pub const SAVE: &str = "Save";
    pub const QUIT: &str = "Quit";
    pub const SWITCH_SPECIAL: &str = "SwitchSpecial";
    pub const NEW_GAME: &str = "NewGame";
    pub const LOAD_GAME: &str = "LoadGame";
    pub const DEBUG_DUMP: &str = "DebugDump";
}
