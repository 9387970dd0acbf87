use bevy::prelude::*;

use crate::app::state::SessionPhase;
use crate::core::actor::Actor;
use crate::core::components::Player;
use crate::core::config::GameConfig;
use crate::core::events::{AudioCue, HintRequested, ScoreAwarded};
use crate::core::session::{bonus_cue_repeats, SessionState};
use crate::interaction::inputmap::{actions, InputMap};

/// Pause key transition. Only Running and Paused respond.
pub fn pause_toggle(phase: SessionPhase) -> Option<SessionPhase> {
    match phase {
        SessionPhase::Running => Some(SessionPhase::Paused),
        SessionPhase::Paused => Some(SessionPhase::Running),
        _ => None,
    }
}

/// Map key transition. Only Running and MapOpen respond.
pub fn map_toggle(phase: SessionPhase) -> Option<SessionPhase> {
    match phase {
        SessionPhase::Running => Some(SessionPhase::MapOpen),
        SessionPhase::MapOpen => Some(SessionPhase::Running),
        _ => None,
    }
}

pub fn freeze_simulation(mut time: ResMut<Time<Virtual>>) {
    if !time.is_paused() {
        time.pause();
        debug!(target: "session", "simulation frozen");
    }
}

pub fn thaw_simulation(mut time: ResMut<Time<Virtual>>) {
    if time.is_paused() {
        time.unpause();
        debug!(target: "session", "simulation resumed");
    }
}

pub fn apply_score_awards(mut awards: EventReader<ScoreAwarded>, mut session: ResMut<SessionState>) {
    for ScoreAwarded(points) in awards.read() {
        session.add_score(*points);
    }
}

/// Per-frame session tick: pause toggle, then bonus lives while running, then map toggle.
pub fn session_tick(
    input: Res<InputMap>,
    cfg: Res<GameConfig>,
    phase: Res<State<SessionPhase>>,
    mut next_phase: ResMut<NextState<SessionPhase>>,
    mut session: ResMut<SessionState>,
    mut q_actor: Query<&mut Actor, With<Player>>,
    mut hints: EventWriter<HintRequested>,
    mut audio: EventWriter<AudioCue>,
) {
    let mut current = *phase.get();
    let mut changed = false;

    if input.just_pressed(actions::PAUSE) {
        if let Some(p) = pause_toggle(current) {
            current = p;
            changed = true;
        }
    }

    if current == SessionPhase::Running {
        if let Some(tier) = session.check_score(&cfg.session.bonus_breakpoints) {
            if let Ok(mut actor) = q_actor.single_mut() {
                actor.lives = actor.lives.saturating_add(1);
                info!(
                    target: "session",
                    "bonus life {} at score {} (lives {})",
                    tier.0 + 1,
                    session.score,
                    actor.lives
                );
            }
            hints.write(HintRequested {
                key: "score".into(),
                seconds: cfg.session.hint_seconds,
            });
            for _ in 0..bonus_cue_repeats(&cfg.session, tier) {
                audio.write(AudioCue::Sound(cfg.audio.bonus_cue.clone()));
            }
        }
    }

    if input.just_pressed(actions::MAP) {
        if let Some(p) = map_toggle(current) {
            current = p;
            changed = true;
        }
    }

    if changed && current != *phase.get() {
        info!(target: "session", "phase {:?} -> {:?}", phase.get(), current);
        next_phase.set(current);
    }
}

/// Fixed-step check after a death: continue prompt while lives remain, otherwise game over.
pub fn health_gate(
    q_actor: Query<&Actor, With<Player>>,
    session: Res<SessionState>,
    mut next_phase: ResMut<NextState<SessionPhase>>,
) {
    let Ok(actor) = q_actor.single() else {
        return;
    };
    // Wait for the death check so `lives` already reflects this death.
    if actor.health > 0 || actor.is_alive() {
        return;
    }
    if actor.lives > 0 {
        info!(
            target: "session",
            "continue? {} lives at checkpoint",
            session.checkpoint.lives
        );
        next_phase.set(SessionPhase::ContinuePending);
    } else {
        next_phase.set(SessionPhase::GameOver);
    }
}
