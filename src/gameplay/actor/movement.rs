use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::Velocity;

use crate::core::actor::{aim_angle_deg, direction_from_axes, Actor, Facing};
use crate::core::components::{AimParams, Player};
use crate::interaction::inputmap::{actions, InputMap};

/// Cursor position in world space, when a primary window and a 2D camera can project it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CursorWorld(pub Option<Vec2>);

/// Projects the window cursor through the camera. Without a window the last value stays.
pub fn track_cursor(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut cursor: ResMut<CursorWorld>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, cam_tf)) = cameras.single() else {
        return;
    };
    cursor.0 = window
        .cursor_position()
        .and_then(|p| camera.viewport_to_world_2d(cam_tf, p).ok());
}

fn directional_state(input: &InputMap) -> [bool; 4] {
    [
        input.pressed(actions::MOVE_UP),
        input.pressed(actions::MOVE_DOWN),
        input.pressed(actions::MOVE_LEFT),
        input.pressed(actions::MOVE_RIGHT),
    ]
}

/// Movement intent, aim and facing for the live actor.
pub fn read_movement_input(
    input: Res<InputMap>,
    cursor: Res<CursorWorld>,
    mut q: Query<(&mut Actor, &Transform, &mut AimParams), With<Player>>,
) {
    let [up, down, left, right] = directional_state(&input);
    for (mut actor, tf, mut aim) in &mut q {
        if !actor.is_alive() {
            continue;
        }
        actor.move_direction = direction_from_axes(up, down, left, right);
        if let Some(target) = cursor.0 {
            let difference = target - tf.translation.truncate();
            let facing = Facing::from_aim(aim_angle_deg(difference), actor.facing);
            if facing != actor.facing {
                actor.facing = facing;
            }
            let dir = difference.normalize_or_zero();
            aim.horizontal = dir.x;
            aim.vertical = dir.y;
        }
        aim.speed = actor.move_direction.length_squared();
    }
}

/// Fixed-step velocity: running needs a direction held together with the Run modifier.
pub fn apply_actor_velocity(
    input: Res<InputMap>,
    mut q: Query<(&mut Actor, &mut Velocity), With<Player>>,
) {
    let moving = directional_state(&input).into_iter().any(|held| held);
    let running = moving && input.pressed(actions::RUN);
    for (mut actor, mut vel) in &mut q {
        if !actor.is_alive() {
            continue;
        }
        if actor.is_running != running {
            actor.set_running(running);
        }
        vel.linvel = actor.velocity();
    }
}

pub fn apply_facing_to_sprite(mut q: Query<(&Actor, &mut Sprite), (With<Player>, Changed<Actor>)>) {
    for (actor, mut sprite) in &mut q {
        sprite.flip_x = actor.facing == Facing::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_actor() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<InputMap>();
        app.init_resource::<CursorWorld>();
        {
            let mut map = app.world_mut().resource_mut::<InputMap>();
            for name in [
                actions::MOVE_UP,
                actions::MOVE_DOWN,
                actions::MOVE_LEFT,
                actions::MOVE_RIGHT,
                actions::RUN,
            ] {
                map.register_action(name, "");
            }
        }
        app.add_systems(Update, (read_movement_input, apply_actor_velocity).chain());
        let e = app
            .world_mut()
            .spawn((
                Player,
                Actor::default(),
                AimParams::default(),
                Transform::default(),
                Velocity::zero(),
            ))
            .id();
        (app, e)
    }

    #[test]
    fn diagonal_run_is_normalized() {
        let (mut app, e) = app_with_actor();
        {
            let mut map = app.world_mut().resource_mut::<InputMap>();
            map.feed(actions::MOVE_UP, true);
            map.feed(actions::MOVE_RIGHT, true);
            map.feed(actions::RUN, true);
        }
        app.update();
        let actor = app.world().get::<Actor>(e).unwrap();
        assert!(actor.is_running);
        assert!((actor.move_direction.length() - 1.0).abs() < 1e-5);
        let vel = app.world().get::<Velocity>(e).unwrap();
        assert!((vel.linvel.length() - actor.run_speed).abs() < 1e-3);
        assert!((app.world().get::<AimParams>(e).unwrap().speed - 1.0).abs() < 1e-5);
    }

    #[test]
    fn run_modifier_alone_does_not_run() {
        let (mut app, e) = app_with_actor();
        app.world_mut()
            .resource_mut::<InputMap>()
            .feed(actions::RUN, true);
        app.update();
        let actor = app.world().get::<Actor>(e).unwrap();
        assert!(!actor.is_running);
        assert_eq!(actor.move_speed, actor.walk_speed);
        assert_eq!(app.world().get::<Velocity>(e).unwrap().linvel, Vec2::ZERO);
    }

    #[test]
    fn cursor_sets_facing_and_vertical_keeps_it() {
        let (mut app, e) = app_with_actor();
        app.insert_resource(CursorWorld(Some(Vec2::new(-10.0, 10.0))));
        app.update();
        assert_eq!(app.world().get::<Actor>(e).unwrap().facing, Facing::Left);
        app.insert_resource(CursorWorld(Some(Vec2::new(0.0, 50.0))));
        app.update();
        assert_eq!(app.world().get::<Actor>(e).unwrap().facing, Facing::Left);
        app.insert_resource(CursorWorld(Some(Vec2::new(30.0, 30.0))));
        app.update();
        assert_eq!(app.world().get::<Actor>(e).unwrap().facing, Facing::Right);
    }
}
