use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::AppState;
use crate::core::actor::Actor;
use crate::core::components::{
    AimParams, Arsenal, BossEncounter, CheckpointMarker, LevelEntity, Player, Targetable,
    TriggerKind, WeaponKind,
};
use crate::core::config::GameConfig;
use crate::core::level::{LevelLayout, LoadedLevel};
use crate::core::save::{distribute_record, ActorSaveSlot, ResumeFromSave, SaveStore, Saveable};
use crate::core::session::{Checkpoint, SessionState};
use crate::gameplay::weapons::{spawn_weapon, WEAPON_OFFSET};
use crate::rendering::palette::palette;

/// Resource present between a level spawn and the check that the scene is playable.
#[derive(Resource, Debug, Default)]
pub struct PendingSceneValidation;

pub struct LevelSpawnPlugin;

impl Plugin for LevelSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Gameplay), spawn_level)
            .add_systems(OnExit(AppState::Gameplay), despawn_level);
    }
}

/// Components of the playable actor. The weapon child and `Arsenal.fire_origin` are added by `spawn_level`.
pub fn player_bundle(cfg: &GameConfig, actor: Actor, transform: Transform) -> impl Bundle {
    (
        (Player, LevelEntity, Targetable, actor, AimParams::default()),
        Sprite::from_color(palette::PLAYER, Vec2::splat(cfg.actor.collider_radius * 2.0)),
        transform,
        Visibility::Visible,
        (
            RigidBody::Dynamic,
            Collider::ball(cfg.actor.collider_radius),
            Velocity::zero(),
            GravityScale(0.0),
            LockedAxes::ROTATION_LOCKED,
            Damping {
                linear_damping: 0.0,
                angular_damping: 0.0,
            },
            ActiveEvents::COLLISION_EVENTS,
        ),
    )
}

fn trigger_color(kind: &TriggerKind) -> Color {
    match kind {
        TriggerKind::Damage { .. } => palette::HAZARD,
        TriggerKind::Heal { .. } => palette::HEAL,
        TriggerKind::Gun { weapon } => weapon.color(),
        TriggerKind::Ammo { .. } => palette::AMMO,
    }
}

/// Spawns the scene described by the loaded layout and seeds the checkpoint from the fresh actor.
pub fn spawn_level(
    mut commands: Commands,
    level: Option<Res<LoadedLevel>>,
    cfg: Res<GameConfig>,
    store: Res<SaveStore>,
    resume: Option<Res<ResumeFromSave>>,
    mut session: ResMut<SessionState>,
    mut boss: ResMut<BossEncounter>,
) {
    commands.insert_resource(PendingSceneValidation);
    let Some(level) = level else {
        error!(target: "level", "entered gameplay without a loaded level");
        return;
    };
    let layout: &LevelLayout = &level.0;
    let mut actor = Actor::from_config(&cfg.actor);
    let mut transform = Transform::from_translation(Vec2::from(layout.player_spawn).extend(2.0));

    if resume.is_some() {
        commands.remove_resource::<ResumeFromSave>();
        match store.read() {
            Ok(Some(record)) => {
                let mut slot = ActorSaveSlot {
                    actor: &mut actor,
                    transform: &mut transform,
                };
                let mut parts: [&mut dyn Saveable; 2] = [&mut *session, &mut slot];
                distribute_record(&record, &mut parts);
                info!(target: "save", "resumed from {}", store.path().display());
            }
            Ok(None) => warn!(target: "save", "no save to resume; starting fresh"),
            Err(e) => error!(target: "save", "could not resume: {e:#}"),
        }
    }

    let starter = WeaponKind::StarterPistol;
    let mut arsenal = Arsenal {
        clip_ammo: starter.clip_capacity(),
        rockets_ammo: cfg.actor.starting_rockets,
        javelin_ammo: cfg.actor.starting_javelins,
        ..Default::default()
    };
    session.checkpoint = Checkpoint {
        lives: actor.lives,
        javelin_ammo: arsenal.javelin_ammo,
        rockets_ammo: arsenal.rockets_ammo,
        selected_special: arsenal.selected_special,
    };
    session.is_game_over = false;

    let player = commands.spawn(player_bundle(&cfg, actor, transform)).id();
    let weapon = spawn_weapon(
        &mut commands,
        player,
        starter,
        Transform::from_translation(WEAPON_OFFSET),
    );
    arsenal.fire_origin = Some(weapon);
    commands.entity(player).insert(arsenal);

    commands.spawn((CheckpointMarker, LevelEntity, layout.checkpoint.transform()));

    for trigger in &layout.triggers {
        commands.spawn((
            trigger.kind,
            LevelEntity,
            Sprite::from_color(trigger_color(&trigger.kind), Vec2::splat(trigger.radius * 2.0)),
            Transform::from_translation(Vec2::from(trigger.position).extend(0.5)),
            Collider::ball(trigger.radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
    for wall in &layout.walls {
        let size = Vec2::from(wall.size);
        commands.spawn((
            LevelEntity,
            Sprite::from_color(palette::WALL, size),
            Transform::from_translation(Vec2::from(wall.center).extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
        ));
    }
    boss.active = layout.boss_active;
    info!(
        target: "level",
        "spawned '{}': {} triggers, {} walls",
        layout.name,
        layout.triggers.len(),
        layout.walls.len()
    );
}

pub fn despawn_level(mut commands: Commands, q: Query<Entity, With<LevelEntity>>) {
    let mut n = 0usize;
    for e in &q {
        commands.entity(e).despawn();
        n += 1;
    }
    debug!(target: "level", "despawned {} level entities", n);
}
