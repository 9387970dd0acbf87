use bevy::prelude::*;

use crate::core::components::{GraceWindow, Lifetime, Targetable};

/// Timer-driven deferred work. All timers tick on virtual time, so a frozen session holds them.
pub struct LifetimePlugin;

impl Plugin for LifetimePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (tick_lifetimes, tick_grace_windows));
    }
}

pub fn tick_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime)>,
) {
    for (e, mut lifetime) in &mut q {
        if lifetime.tick(time.delta()).finished() {
            commands.entity(e).despawn();
        }
    }
}

pub fn tick_grace_windows(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut GraceWindow)>,
) {
    for (e, mut grace) in &mut q {
        if grace.tick(time.delta()).finished() {
            commands
                .entity(e)
                .remove::<GraceWindow>()
                .insert(Targetable);
            debug!(target: "actor", "grace window over; {:?} targetable again", e);
        }
    }
}
