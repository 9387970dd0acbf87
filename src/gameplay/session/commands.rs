use bevy::prelude::*;
use bevy_rapier2d::prelude::ColliderDisabled;

use crate::app::state::SessionPhase;
use crate::core::actor::Actor;
use crate::core::components::{
    Arsenal, BossEncounter, CheckpointMarker, GraceWindow, Player, Targetable,
};
use crate::core::config::GameConfig;
use crate::core::events::{
    tracks, AudioCue, GameFlowEvent, SceneRequest, SessionCommand, MAIN_MENU_SCENE,
};
use crate::core::level::CurrentScene;
use crate::core::save::SaveStore;
use crate::core::session::SessionState;
use crate::gameplay::actor::revive;
use crate::interaction::inputmap::{actions, InputMap};

use super::lifecycle::{build_record, run_game_over};

/// Phases in which each keyboard action issues its command.
pub fn command_for_action(action: &str, phase: SessionPhase) -> Option<SessionCommand> {
    use SessionPhase::*;
    match action {
        actions::CONTINUE if phase == ContinuePending => Some(SessionCommand::Continue),
        actions::RESTART if matches!(phase, GameOver | Paused) => Some(SessionCommand::Restart),
        actions::MAIN_MENU if matches!(phase, GameOver | Paused) => {
            Some(SessionCommand::ToMainMenu)
        }
        actions::SAVE if matches!(phase, Running | Paused) => Some(SessionCommand::Save),
        actions::NEXT_LEVEL if matches!(phase, Running | Paused) => Some(SessionCommand::NextLevel),
        actions::QUIT => Some(SessionCommand::Quit),
        _ => None,
    }
}

pub fn session_keyboard_commands(
    input: Res<InputMap>,
    phase: Res<State<SessionPhase>>,
    mut out: EventWriter<SessionCommand>,
) {
    for action in [
        actions::CONTINUE,
        actions::RESTART,
        actions::MAIN_MENU,
        actions::SAVE,
        actions::NEXT_LEVEL,
        actions::QUIT,
    ] {
        if !input.just_pressed(action) {
            continue;
        }
        if let Some(cmd) = command_for_action(action, *phase.get()) {
            out.write(cmd);
        }
    }
}

/// Continue: respawn at the checkpoint with full health and a grace window.
pub fn continue_from_checkpoint(
    mut commands: Commands,
    mut reader: EventReader<SessionCommand>,
    phase: Res<State<SessionPhase>>,
    mut next_phase: ResMut<NextState<SessionPhase>>,
    cfg: Res<GameConfig>,
    session: Res<SessionState>,
    boss: Res<BossEncounter>,
    mut q_actor: Query<
        (Entity, &mut Actor, &mut Arsenal, &mut Transform, &mut Visibility),
        With<Player>,
    >,
    q_checkpoint: Query<&Transform, (With<CheckpointMarker>, Without<Player>)>,
    mut audio: EventWriter<AudioCue>,
) {
    let requested = reader.read().any(|c| *c == SessionCommand::Continue);
    if !requested {
        return;
    }
    if *phase.get() != SessionPhase::ContinuePending {
        warn!(target: "session", "Continue ignored in phase {:?}", phase.get());
        return;
    }
    let Ok(checkpoint_tf) = q_checkpoint.single() else {
        error!(target: "session", "Continue without a checkpoint in the scene");
        return;
    };
    let Ok((entity, mut actor, mut arsenal, mut tf, mut vis)) = q_actor.single_mut() else {
        error!(target: "session", "Continue without an actor in the scene");
        return;
    };
    tf.translation = checkpoint_tf.translation;
    tf.rotation = checkpoint_tf.rotation;
    *vis = Visibility::Inherited;
    revive(&mut actor, &mut arsenal, &session.checkpoint);

    let grace = cfg.session.grace_seconds;
    let mut e = commands.entity(entity);
    e.remove::<ColliderDisabled>();
    if grace > 0.0 {
        e.remove::<Targetable>()
            .insert(GraceWindow(Timer::from_seconds(grace, TimerMode::Once)));
    } else {
        e.insert(Targetable);
    }

    next_phase.set(SessionPhase::Running);
    let track = if boss.active {
        tracks::BOSS_FIGHT
    } else {
        tracks::LEVEL_ONE
    };
    audio.write(AudioCue::music(track));
    info!(
        target: "session",
        "continued at checkpoint with {} lives, grace {:.1}s",
        actor.lives,
        grace
    );
}

/// Every other session command: restart, main menu, next level, save, quit.
pub fn handle_session_commands(
    mut reader: EventReader<SessionCommand>,
    phase: Res<State<SessionPhase>>,
    cfg: Res<GameConfig>,
    current: Res<CurrentScene>,
    mut session: ResMut<SessionState>,
    mut store: ResMut<SaveStore>,
    mut q_actor: Query<(&mut Actor, &mut Transform), With<Player>>,
    mut flow: EventWriter<GameFlowEvent>,
    mut audio: EventWriter<AudioCue>,
    mut scenes: EventWriter<SceneRequest>,
    mut exit: EventWriter<AppExit>,
) {
    let phase = *phase.get();
    for cmd in reader.read() {
        match cmd {
            SessionCommand::Continue => {}
            SessionCommand::Restart => {
                if !matches!(phase, SessionPhase::GameOver | SessionPhase::Paused) {
                    warn!(target: "session", "Restart ignored in phase {:?}", phase);
                    continue;
                }
                *session = SessionState::new_session();
                store.is_new_game = true;
                flow.write(GameFlowEvent::StartGame);
                audio.write(AudioCue::music(tracks::LEVEL_ONE));
                scenes.write(SceneRequest::ReloadCurrent);
                info!(target: "session", "restarting '{}'", current.name);
            }
            SessionCommand::ToMainMenu => {
                if phase != SessionPhase::GameOver {
                    run_game_over(&store, &mut session, &mut flow);
                }
                scenes.write(SceneRequest::Load(MAIN_MENU_SCENE.to_string()));
            }
            SessionCommand::NextLevel => match cfg.next_scene(&current.name) {
                Some(next) => {
                    info!(target: "session", "advancing '{}' -> '{}'", current.name, next);
                    scenes.write(SceneRequest::Load(next.to_string()));
                }
                None => warn!(target: "session", "no scene after '{}'", current.name),
            },
            SessionCommand::Save => {
                let record = match q_actor.single_mut() {
                    Ok((mut actor, mut tf)) => {
                        build_record(&session, Some((&mut *actor, &mut *tf)))
                    }
                    Err(_) => build_record(&session, None),
                };
                match store.write(&record) {
                    Ok(()) => {
                        store.times_saved += 1;
                        info!(
                            target: "save",
                            "saved to {} ({} saves this session)",
                            store.path().display(),
                            store.times_saved
                        );
                    }
                    Err(e) => error!(target: "save", "save failed: {e:#}"),
                }
            }
            SessionCommand::Quit => {
                info!(target: "session", "quit requested");
                exit.write(AppExit::Success);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_commands_respect_phase() {
        use SessionPhase::*;
        assert_eq!(
            command_for_action(actions::CONTINUE, ContinuePending),
            Some(SessionCommand::Continue)
        );
        assert_eq!(command_for_action(actions::CONTINUE, Running), None);
        assert_eq!(
            command_for_action(actions::RESTART, GameOver),
            Some(SessionCommand::Restart)
        );
        assert_eq!(command_for_action(actions::RESTART, Running), None);
        assert_eq!(command_for_action(actions::SAVE, GameOver), None);
        assert_eq!(command_for_action(actions::QUIT, MapOpen), Some(SessionCommand::Quit));
        assert_eq!(command_for_action("Jump", Running), None);
    }
}
