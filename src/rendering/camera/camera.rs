use bevy::prelude::*;

use crate::core::components::Player;
use crate::core::system::system_order::PresentationSet;

/// Fraction of the remaining distance covered per second while following the actor.
const FOLLOW_RATE: f32 = 6.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, follow_player.in_set(PresentationSet));
    }
}

fn setup_camera(mut commands: Commands) {
    // Required components supply the rest of the camera defaults.
    commands.spawn(Camera2d);
}

fn follow_player(
    time: Res<Time<Real>>,
    q_player: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut q_cam: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(target) = q_player.single() else {
        return;
    };
    let Ok(mut cam) = q_cam.single_mut() else {
        return;
    };
    let t = (FOLLOW_RATE * time.delta_secs()).clamp(0.0, 1.0);
    let goal = target.translation.truncate();
    let pos = cam.translation.truncate().lerp(goal, t);
    cam.translation.x = pos.x;
    cam.translation.y = pos.y;
}
