use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::core::actor::Actor;
use crate::core::components::{
    Arsenal, Consumed, HitReaction, Player, Targetable, TriggerKind, Weapon, WeaponKind,
};
use crate::core::events::{AudioCue, ScreenFlash};
use crate::core::session::SessionState;
use crate::gameplay::weapons::{consume_pickup, spawn_weapon, WEAPON_OFFSET};

const HIT_REACTION_SECS: f32 = 0.2;

/// Replace the held weapon. `GunSwap::basic()` is the starter pistol reload.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GunSwap {
    pub weapon: WeaponKind,
}

impl GunSwap {
    pub fn basic() -> Self {
        Self {
            weapon: WeaponKind::StarterPistol,
        }
    }
}

/// Dispatches sensor overlaps between the actor and trigger entities by kind.
/// Ammo pickups belong to the weapon subsystem and are skipped here.
pub fn resolve_trigger_contacts(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    mut q_actor: Query<(Entity, &mut Actor, Has<Targetable>), With<Player>>,
    q_triggers: Query<&TriggerKind, Without<Consumed>>,
    mut audio: EventWriter<AudioCue>,
    mut flash: EventWriter<ScreenFlash>,
    mut swaps: EventWriter<GunSwap>,
) {
    let Ok((player, mut actor, targetable)) = q_actor.single_mut() else {
        collisions.clear();
        return;
    };
    let mut consumed_now: Vec<Entity> = Vec::new();
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _) = ev else {
            continue;
        };
        let other = if *a == player {
            *b
        } else if *b == player {
            *a
        } else {
            continue;
        };
        let Ok(kind) = q_triggers.get(other) else {
            continue;
        };
        if !actor.is_alive() || consumed_now.contains(&other) {
            continue;
        }
        match *kind {
            TriggerKind::Damage { amount } => {
                if !targetable {
                    debug!(target: "actor", "untargetable; ignoring {} damage", amount);
                    continue;
                }
                actor.take_damage(amount);
                commands
                    .entity(player)
                    .insert(HitReaction(Timer::from_seconds(HIT_REACTION_SECS, TimerMode::Once)));
                flash.write(ScreenFlash::Damage);
                info!(target: "actor", "took {} damage, health {}", amount, actor.health);
            }
            TriggerKind::Heal { amount } => {
                actor.heal(amount);
                consumed_now.push(other);
                consume_pickup(&mut commands, other);
                audio.write(AudioCue::sound("Heal"));
                info!(target: "actor", "healed {}, health {}", amount, actor.health);
            }
            TriggerKind::Gun { weapon } => {
                consumed_now.push(other);
                consume_pickup(&mut commands, other);
                swaps.write(GunSwap { weapon });
                audio.write(AudioCue::sound("PickUpWeapon"));
            }
            TriggerKind::Ammo { .. } => {}
        }
    }
}

/// Swaps the weapon child and resets the ammo counters to the checkpoint snapshot.
pub fn apply_gun_swaps(
    mut commands: Commands,
    mut swaps: EventReader<GunSwap>,
    mut q_actor: Query<(Entity, &mut Arsenal), With<Player>>,
    q_weapons: Query<&Transform, With<Weapon>>,
    mut session: ResMut<SessionState>,
) {
    let Ok((player, mut arsenal)) = q_actor.single_mut() else {
        swaps.clear();
        return;
    };
    // Several swaps in one frame chain through weapons not yet spawned; carry the local transform.
    let mut carried: Option<Transform> = None;
    for swap in swaps.read() {
        session.checkpoint.selected_special = arsenal.selected_special;
        let local = match arsenal.fire_origin {
            Some(old) => {
                let local = carried
                    .or_else(|| q_weapons.get(old).ok().copied())
                    .unwrap_or_else(|| Transform::from_translation(WEAPON_OFFSET));
                commands.entity(old).despawn();
                local
            }
            None => Transform::from_translation(WEAPON_OFFSET),
        };
        let new_weapon = spawn_weapon(&mut commands, player, swap.weapon, local);
        carried = Some(local);
        arsenal.fire_origin = Some(new_weapon);
        arsenal.clip_ammo = swap.weapon.clip_capacity();
        let cp = &session.checkpoint;
        arsenal.rockets_ammo = cp.rockets_ammo;
        arsenal.javelin_ammo = cp.javelin_ammo;
        arsenal.selected_special = cp.selected_special;
        info!(
            target: "actor",
            "weapon -> {:?} (clip {}, rockets {}, javelins {})",
            swap.weapon,
            arsenal.clip_ammo,
            arsenal.rockets_ammo,
            arsenal.javelin_ammo
        );
    }
}
