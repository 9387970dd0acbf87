use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Pixels per Rapier meter; actor speeds are authored in pixels per second.
pub const PIXELS_PER_METER: f32 = 50.0;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier for a top-down scene

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER)
                .in_fixed_schedule(),
        )
        .add_systems(Update, disable_gravity);
        let debug_render = app
            .world()
            .get_resource::<GameConfig>()
            .is_some_and(|cfg| cfg.rapier_debug);
        if debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

// Top-down view: no global gravity. Runs once when Rapier creates its context.
fn disable_gravity(mut q: Query<&mut RapierConfiguration, Added<RapierConfiguration>>) {
    for mut rapier_cfg in &mut q {
        rapier_cfg.gravity = Vect::ZERO;
        debug!(target: "physics", "rapier gravity disabled");
    }
}
