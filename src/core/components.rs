use bevy::prelude::*;
use serde::Deserialize;

use crate::core::session::SpecialWeapon;

/// Marker component identifying the playable actor (holds physics body & collider).
#[derive(Component)]
pub struct Player;

/// Present while enemies may treat the entity as a live target and damage applies.
#[derive(Component)]
pub struct Targetable;

/// Respawn transform used by Continue.
#[derive(Component)]
pub struct CheckpointMarker;

/// Everything spawned for the current scene; despawned when the scene is left.
#[derive(Component)]
pub struct LevelEntity;

/// Gun models the actor can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum WeaponKind {
    StarterPistol,
    PistolB,
}

impl WeaponKind {
    /// Primary ammo granted on pickup; 0 means unlimited.
    pub fn clip_capacity(self) -> u32 {
        match self {
            WeaponKind::StarterPistol => 0,
            WeaponKind::PistolB => 60,
        }
    }

    pub fn color(self) -> Color {
        match self {
            WeaponKind::StarterPistol => Color::srgb(0.75, 0.75, 0.8),
            WeaponKind::PistolB => Color::srgb(0.95, 0.65, 0.2),
        }
    }
}

/// Weapon child entity; its transform is the fire origin.
#[derive(Component, Debug, Clone, Copy)]
pub struct Weapon {
    pub kind: WeaponKind,
}

/// Ammo counters and special selection owned by the weapon subsystem.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Arsenal {
    pub clip_ammo: u32,
    pub rockets_ammo: u32,
    pub javelin_ammo: u32,
    pub selected_special: SpecialWeapon,
    pub fire_origin: Option<Entity>,
}

/// Sensor colliders the actor reacts to on overlap, dispatched by kind.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum TriggerKind {
    Damage { amount: i32 },
    Heal { amount: i32 },
    Gun { weapon: WeaponKind },
    Ammo { javelins: u32 },
}

/// Pickup already collected; hidden with its collider disabled.
#[derive(Component)]
pub struct Consumed;

/// Short-lived stand-in left where the actor died.
#[derive(Component)]
pub struct DeathProxy;

/// Despawns the entity when the timer finishes.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

/// Untargetable period after a respawn; `Targetable` returns when it finishes.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct GraceWindow(pub Timer);

/// Parameters read by the external animation driver.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AimParams {
    pub horizontal: f32,
    pub vertical: f32,
    pub speed: f32,
}

/// Brief tint played on the actor sprite after a hit.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct HitReaction(pub Timer);

/// Set by boss scripts while a boss fight is on; picks the music after Continue.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct BossEncounter {
    pub active: bool,
}
