use bevy::prelude::*;
use bevy_rapier2d::prelude::{ColliderDisabled, CollisionEvent};

use crate::app::state::SessionPhase;
use crate::core::actor::Actor;
use crate::core::components::{Arsenal, Consumed, Player, TriggerKind, Weapon, WeaponKind};
use crate::core::events::AudioCue;
use crate::core::system::system_order::{ActorInputSet, ActorSet};
use crate::gameplay::actor::GunSwap;
use crate::interaction::inputmap::{actions, InputMap};

/// Local offset of the held weapon relative to the actor.
pub const WEAPON_OFFSET: Vec3 = Vec3::new(12.0, -4.0, 0.1);

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .add_systems(
                Update,
                switch_special_weapon
                    .in_set(ActorInputSet)
                    .run_if(in_state(SessionPhase::Running)),
            )
            .add_systems(
                Update,
                (collect_ammo_pickups, fall_back_to_basic_gun)
                    .in_set(ActorSet)
                    .run_if(in_state(SessionPhase::Running)),
            );
    }
}

/// Spawns a weapon as a child of `owner` and returns it. The caller stores it as the fire origin.
pub fn spawn_weapon(
    commands: &mut Commands,
    owner: Entity,
    kind: WeaponKind,
    local: Transform,
) -> Entity {
    commands
        .spawn((
            Weapon { kind },
            Sprite::from_color(kind.color(), Vec2::new(16.0, 5.0)),
            local,
            ChildOf(owner),
        ))
        .id()
}

/// Hides a pickup and disables its collider so it cannot fire again.
pub fn consume_pickup(commands: &mut Commands, pickup: Entity) {
    commands
        .entity(pickup)
        .insert((Consumed, ColliderDisabled, Visibility::Hidden));
}

fn switch_special_weapon(
    input: Res<InputMap>,
    mut q: Query<(&Actor, &mut Arsenal), With<Player>>,
) {
    if !input.just_pressed(actions::SWITCH_SPECIAL) {
        return;
    }
    for (actor, mut arsenal) in &mut q {
        if !actor.is_alive() {
            continue;
        }
        arsenal.selected_special = arsenal.selected_special.toggled();
        info!(target: "actor", "special weapon -> {}", arsenal.selected_special.label());
    }
}

fn collect_ammo_pickups(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    mut q_actor: Query<(Entity, &Actor, &mut Arsenal), With<Player>>,
    q_pickups: Query<&TriggerKind, Without<Consumed>>,
    mut audio: EventWriter<AudioCue>,
) {
    let Ok((player, actor, mut arsenal)) = q_actor.single_mut() else {
        collisions.clear();
        return;
    };
    let mut taken: Vec<Entity> = Vec::new();
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
        let Ok(TriggerKind::Ammo { javelins }) = q_pickups.get(other) else {
            continue;
        };
        if !actor.is_alive() || taken.contains(&other) {
            continue;
        }
        taken.push(other);
        arsenal.javelin_ammo = arsenal.javelin_ammo.saturating_add(*javelins);
        consume_pickup(&mut commands, other);
        audio.write(AudioCue::sound("PickUpAmmo"));
        info!(target: "actor", "picked up {} javelins (now {})", javelins, arsenal.javelin_ammo);
    }
}

/// A pickup gun whose clip ran dry goes back to the starter pistol.
pub fn fall_back_to_basic_gun(
    q_actor: Query<&Arsenal, (With<Player>, Changed<Arsenal>)>,
    q_weapons: Query<&Weapon>,
    mut swaps: EventWriter<GunSwap>,
) {
    for arsenal in &q_actor {
        if arsenal.clip_ammo > 0 {
            continue;
        }
        let Some(held) = arsenal.fire_origin.and_then(|e| q_weapons.get(e).ok()) else {
            continue;
        };
        if held.kind.clip_capacity() > 0 {
            debug!(target: "actor", "{:?} clip empty; loading starter pistol", held.kind);
            swaps.write(GunSwap::basic());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;
    use bevy::state::app::StatesPlugin;
    use bevy::ecs::event::Events;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.insert_state(AppState::Gameplay);
        app.add_sub_state::<SessionPhase>();
        app.add_event::<AudioCue>();
        app.add_event::<GunSwap>();
        app.init_resource::<InputMap>();
        app.add_plugins(WeaponsPlugin);
        app
    }

    #[test]
    fn ammo_pickup_is_taken_once() {
        let mut app = app();
        let player = app
            .world_mut()
            .spawn((Player, Actor::default(), Arsenal::default()))
            .id();
        let pickup = app
            .world_mut()
            .spawn(TriggerKind::Ammo { javelins: 3 })
            .id();
        app.update();
        let ev = CollisionEvent::Started(player, pickup, CollisionEventFlags::SENSOR);
        app.world_mut().send_event(ev);
        app.world_mut().send_event(ev);
        app.update();
        assert_eq!(app.world().get::<Arsenal>(player).unwrap().javelin_ammo, 3);
        assert!(app.world().get::<Consumed>(pickup).is_some());

        app.world_mut().send_event(ev);
        app.update();
        assert_eq!(app.world().get::<Arsenal>(player).unwrap().javelin_ammo, 3);
    }

    #[test]
    fn switch_special_toggles_selection() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<InputMap>()
            .register_action(actions::SWITCH_SPECIAL, "");
        let player = app
            .world_mut()
            .spawn((Player, Actor::default(), Arsenal::default()))
            .id();
        app.update();
        // Systems see the fed edge this frame; evaluation never runs without the input plugin.
        app.world_mut()
            .resource_mut::<InputMap>()
            .feed(actions::SWITCH_SPECIAL, true);
        app.update();
        assert_eq!(
            app.world().get::<Arsenal>(player).unwrap().selected_special,
            crate::core::session::SpecialWeapon::Javelin
        );
    }

    #[test]
    fn empty_pickup_clip_requests_starter_pistol() {
        let mut app = app();
        let player = app.world_mut().spawn((Player, Actor::default())).id();
        let gun = app.world_mut().spawn(Weapon { kind: WeaponKind::PistolB }).id();
        app.world_mut().entity_mut(player).insert(Arsenal {
            clip_ammo: 0,
            fire_origin: Some(gun),
            ..Default::default()
        });
        app.update();
        let events = app.world().resource::<Events<GunSwap>>();
        let swaps: Vec<_> = events.get_cursor().read(events).copied().collect();
        assert_eq!(swaps, vec![GunSwap::basic()]);
    }
}
