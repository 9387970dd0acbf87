//! Systems for input action evaluation.
use super::types::*;
use bevy::prelude::*;

pub fn system_evaluate_bindings(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_map: ResMut<InputMap>,
) {
    input_map.update_from_keys(&keyboard);
}
