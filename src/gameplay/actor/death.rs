use bevy::prelude::*;
use bevy_rapier2d::prelude::{ColliderDisabled, Velocity};

use crate::core::actor::{Actor, LifeState};
use crate::core::components::{Arsenal, DeathProxy, GraceWindow, LevelEntity, Lifetime, Player};
use crate::core::config::GameConfig;
use crate::core::events::{tracks, AudioCue};
use crate::core::session::{Checkpoint, SessionState};
use crate::rendering::palette::palette;

/// Lives, score penalty and checkpoint bookkeeping for one death. Returns the points lost.
pub fn record_death(
    actor: &mut Actor,
    arsenal: &Arsenal,
    session: &mut SessionState,
    penalty_threshold: u32,
) -> u32 {
    actor.lives = actor.lives.saturating_sub(1);
    actor.life = LifeState::Dead;
    actor.move_direction = Vec2::ZERO;
    let lost = session.apply_death_penalty(penalty_threshold);
    session.checkpoint = Checkpoint {
        lives: actor.lives,
        javelin_ammo: arsenal.javelin_ammo,
        rockets_ammo: arsenal.rockets_ammo,
        selected_special: arsenal.selected_special,
    };
    lost
}

/// Restores a dead actor from the checkpoint: full health, checkpoint lives, ammo and selection.
pub fn revive(actor: &mut Actor, arsenal: &mut Arsenal, checkpoint: &Checkpoint) {
    actor.life = LifeState::Alive;
    actor.lives = checkpoint.lives;
    actor.health = actor.max_health;
    actor.move_direction = Vec2::ZERO;
    arsenal.rockets_ammo = checkpoint.rockets_ammo;
    arsenal.javelin_ammo = checkpoint.javelin_ammo;
    arsenal.selected_special = checkpoint.selected_special;
}

/// Runs Die once for an actor whose health dropped to zero, then plays the death cues.
pub fn check_actor_death(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut session: ResMut<SessionState>,
    mut q: Query<
        (
            Entity,
            &mut Actor,
            &Arsenal,
            &Transform,
            &mut Visibility,
            &mut Velocity,
        ),
        With<Player>,
    >,
    mut audio: EventWriter<AudioCue>,
) {
    for (entity, mut actor, arsenal, tf, mut vis, mut vel) in &mut q {
        if !actor.needs_death() {
            continue;
        }
        let lost = record_death(
            &mut actor,
            arsenal,
            &mut session,
            cfg.session.penalty_threshold,
        );
        *vis = Visibility::Hidden;
        vel.linvel = Vec2::ZERO;
        vel.angvel = 0.0;
        commands
            .entity(entity)
            .insert(ColliderDisabled)
            .remove::<GraceWindow>();
        commands.spawn((
            DeathProxy,
            LevelEntity,
            Sprite::from_color(palette::DEATH_PROXY, Vec2::splat(24.0)),
            *tf,
            Lifetime(Timer::from_seconds(
                cfg.session.death_proxy_seconds.max(0.0),
                TimerMode::Once,
            )),
        ));
        info!(
            target: "actor",
            "actor died: lives left {}, score -{} -> {}",
            actor.lives,
            lost,
            session.score
        );
        audio.write(AudioCue::StopAmbient);
        audio.write(AudioCue::voice("MCdead"));
        audio.write(AudioCue::music(tracks::DIE));
        audio.write(AudioCue::sound("PlayerDeath"));
    }
}

/// Keeps the checkpoint ammo and selection in step with the live arsenal.
pub fn mirror_checkpoint(
    q: Query<(&Actor, &Arsenal), With<Player>>,
    mut session: ResMut<SessionState>,
) {
    let Ok((actor, arsenal)) = q.single() else {
        return;
    };
    if !actor.is_alive() {
        return;
    }
    let cp = &session.checkpoint;
    if cp.rockets_ammo == arsenal.rockets_ammo
        && cp.javelin_ammo == arsenal.javelin_ammo
        && cp.selected_special == arsenal.selected_special
    {
        return;
    }
    let cp = &mut session.checkpoint;
    cp.rockets_ammo = arsenal.rockets_ammo;
    cp.javelin_ammo = arsenal.javelin_ammo;
    cp.selected_special = arsenal.selected_special;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SpecialWeapon;
    use bevy::ecs::event::Events;

    #[test]
    fn record_death_updates_checkpoint_and_score() {
        let mut actor = Actor::default();
        actor.lives = 3;
        let arsenal = Arsenal {
            rockets_ammo: 2,
            javelin_ammo: 7,
            selected_special: SpecialWeapon::Javelin,
            ..Default::default()
        };
        let mut session = SessionState::new_session();
        session.score = 12_000;
        let lost = record_death(&mut actor, &arsenal, &mut session, 10_000);
        assert_eq!(lost, 2400);
        assert_eq!(session.score, 9600);
        assert_eq!(actor.lives, 2);
        assert_eq!(actor.life, LifeState::Dead);
        assert_eq!(
            session.checkpoint,
            Checkpoint {
                lives: 2,
                javelin_ammo: 7,
                rockets_ammo: 2,
                selected_special: SpecialWeapon::Javelin
            }
        );
    }

    #[test]
    fn lives_never_underflow() {
        let mut actor = Actor::default();
        actor.lives = 0;
        let mut session = SessionState::new_session();
        record_death(&mut actor, &Arsenal::default(), &mut session, 10_000);
        assert_eq!(actor.lives, 0);
    }

    #[test]
    fn death_runs_once() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default())
            .init_resource::<SessionState>()
            .add_event::<AudioCue>()
            .add_systems(Update, check_actor_death);
        let mut actor = Actor::default();
        actor.health = -30;
        let e = app
            .world_mut()
            .spawn((
                Player,
                actor,
                Arsenal::default(),
                Transform::default(),
                Visibility::Visible,
                Velocity::linear(Vec2::new(10.0, 0.0)),
                GraceWindow(Timer::from_seconds(2.0, TimerMode::Once)),
            ))
            .id();
        app.update();
        app.update();
        let world = app.world_mut();
        assert_eq!(world.get::<Actor>(e).unwrap().lives, 2);
        assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
        assert_eq!(world.get::<Velocity>(e).unwrap().linvel, Vec2::ZERO);
        assert!(world.get::<ColliderDisabled>(e).is_some());
        assert!(world.get::<GraceWindow>(e).is_none());
        let proxies = world
            .query_filtered::<&Lifetime, With<DeathProxy>>()
            .iter(world)
            .count();
        assert_eq!(proxies, 1);
        let events = world.resource::<Events<AudioCue>>();
        let cues: Vec<_> = events.get_cursor().read(events).cloned().collect();
        assert_eq!(cues.len(), 4);
        assert_eq!(cues[0], AudioCue::StopAmbient);
        assert_eq!(cues[2], AudioCue::music(tracks::DIE));
    }

    #[test]
    fn revive_restores_checkpoint_values() {
        let mut actor = Actor::default();
        actor.health = -10;
        actor.life = LifeState::Dead;
        let mut arsenal = Arsenal::default();
        let cp = Checkpoint {
            lives: 1,
            javelin_ammo: 5,
            rockets_ammo: 3,
            selected_special: SpecialWeapon::Javelin,
        };
        revive(&mut actor, &mut arsenal, &cp);
        assert!(actor.is_alive());
        assert_eq!(actor.health, actor.max_health);
        assert_eq!(actor.lives, 1);
        assert_eq!(arsenal.javelin_ammo, 5);
        assert_eq!(arsenal.rockets_ammo, 3);
        assert_eq!(arsenal.selected_special, SpecialWeapon::Javelin);
    }
}
