use bevy::prelude::*;

use crate::core::actor::Actor;
use crate::core::components::{Arsenal, CheckpointMarker, Player};
use crate::gameplay::spawn::PendingSceneValidation;
use crate::rendering::hud::HudRoot;

/// Refuses to run a gameplay scene that lacks the actor, the checkpoint or the HUD.
pub struct SceneValidationPlugin;

impl Plugin for SceneValidationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            validate_scene.run_if(resource_exists::<PendingSceneValidation>),
        );
    }
}

pub fn missing_scene_parts(players: usize, checkpoints: usize, huds: usize) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if players != 1 {
        missing.push("exactly one player with Actor and Arsenal");
    }
    if checkpoints == 0 {
        missing.push("checkpoint");
    }
    if huds == 0 {
        missing.push("HUD");
    }
    missing
}

fn validate_scene(
    mut commands: Commands,
    q_player: Query<(), (With<Player>, With<Actor>, With<Arsenal>)>,
    q_checkpoint: Query<(), With<CheckpointMarker>>,
    q_hud: Query<(), With<HudRoot>>,
    mut exit: EventWriter<AppExit>,
) {
    commands.remove_resource::<PendingSceneValidation>();
    let missing = missing_scene_parts(
        q_player.iter().count(),
        q_checkpoint.iter().count(),
        q_hud.iter().count(),
    );
    if missing.is_empty() {
        debug!(target: "level", "scene validated");
        return;
    }
    error!(target: "level", "scene is not playable; missing: {}", missing.join(", "));
    exit.write(AppExit::error());
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::event::Events;

    #[test]
    fn reports_each_missing_part() {
        assert!(missing_scene_parts(1, 1, 1).is_empty());
        assert_eq!(missing_scene_parts(0, 1, 1).len(), 1);
        assert_eq!(missing_scene_parts(2, 0, 0).len(), 3);
    }

    #[test]
    fn incomplete_scene_requests_error_exit() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<AppExit>();
        app.add_plugins(SceneValidationPlugin);
        app.insert_resource(PendingSceneValidation);
        app.world_mut().spawn(CheckpointMarker);
        app.update();
        let events = app.world().resource::<Events<AppExit>>();
        let exits: Vec<_> = events.get_cursor().read(events).cloned().collect();
        assert_eq!(exits.len(), 1);
        assert!(exits[0].is_error());
        assert!(!app.world().contains_resource::<PendingSceneValidation>());
    }
}
