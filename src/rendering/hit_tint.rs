use bevy::prelude::*;

use crate::core::components::{HitReaction, Player};
use crate::core::system::system_order::PresentationSet;
use crate::rendering::palette::palette;

/// Red tint on the actor sprite while a `HitReaction` runs.
pub struct HitTintPlugin;

impl Plugin for HitTintPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, tint_hit_actors.in_set(PresentationSet));
    }
}

pub fn tint_hit_actors(
    mut commands: Commands,
    time: Res<Time<Virtual>>,
    mut q: Query<(Entity, &mut HitReaction, &mut Sprite), With<Player>>,
) {
    for (e, mut hit, mut sprite) in &mut q {
        if hit.tick(time.delta()).finished() {
            sprite.color = palette::PLAYER;
            commands.entity(e).remove::<HitReaction>();
        } else {
            sprite.color = palette::HIT_TINT;
        }
    }
}
