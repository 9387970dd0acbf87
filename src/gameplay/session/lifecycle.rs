use anyhow::{Context, Result};
use bevy::prelude::*;

use crate::core::actor::Actor;
use crate::core::components::Player;
use crate::core::events::GameFlowEvent;
use crate::core::save::{collect_record, ActorSaveSlot, SaveRecord, SaveSealer, SaveStore, Saveable};
use crate::core::session::SessionState;

/// Gathers every saveable part. The actor part is skipped when no actor is spawned.
pub fn build_record(
    session: &SessionState,
    actor: Option<(&mut Actor, &mut Transform)>,
) -> SaveRecord {
    match actor {
        Some((actor, transform)) => {
            let slot = ActorSaveSlot { actor, transform };
            collect_record(&[session as &dyn Saveable, &slot])
        }
        None => collect_record(&[session as &dyn Saveable]),
    }
}

/// Game-over effects shared by the GameOver phase and the return to the main menu.
pub fn run_game_over(
    store: &SaveStore,
    session: &mut SessionState,
    flow: &mut EventWriter<GameFlowEvent>,
) {
    flow.write(GameFlowEvent::GameOver);
    match store.delete() {
        Ok(true) => info!(target: "save", "save file {} removed", store.path().display()),
        Ok(false) => debug!(target: "save", "no save file to remove"),
        Err(e) => error!(target: "save", "{e:#}"),
    }
    session.is_game_over = true;
    info!(target: "session", "game over at score {}", session.score);
}

pub fn on_enter_game_over(
    store: Res<SaveStore>,
    mut session: ResMut<SessionState>,
    mut flow: EventWriter<GameFlowEvent>,
) {
    run_game_over(&store, &mut session, &mut flow);
}

/// Hands the just-written plaintext to the sealer when the store policy asks for it.
pub fn seal_after_write(store: &SaveStore, sealer: &SaveSealer) -> Result<()> {
    if !store.should_seal_on_exit() {
        return Ok(());
    }
    let plaintext = store.read_plaintext()?;
    sealer
        .0
        .seal(&store.path(), &plaintext)
        .context("seal save record")
}

/// Actor as it will be after Continue, so a resumed dead actor does not die a second time.
pub fn exit_snapshot(actor: &Actor, session: &SessionState) -> Actor {
    let mut snapshot = actor.clone();
    if !snapshot.is_alive() {
        snapshot.health = snapshot.max_health;
        snapshot.lives = session.checkpoint.lives;
    }
    snapshot
}

/// Shutdown hook: always save on exit, then seal continued games that were never saved explicitly.
pub fn save_on_exit(
    mut exits: EventReader<AppExit>,
    store: Res<SaveStore>,
    sealer: Res<SaveSealer>,
    session: Res<SessionState>,
    q_actor: Query<(&Actor, &Transform), With<Player>>,
) {
    if exits.is_empty() {
        return;
    }
    exits.clear();
    if session.is_game_over {
        info!(target: "save", "game over; nothing saved on exit");
        return;
    }
    let record = match q_actor.single() {
        Ok((actor, transform)) => {
            let mut snapshot = exit_snapshot(actor, &session);
            let mut transform = *transform;
            build_record(&session, Some((&mut snapshot, &mut transform)))
        }
        Err(_) => build_record(&session, None),
    };
    if let Err(e) = store.write(&record) {
        error!(target: "save", "exit save failed: {e:#}");
        return;
    }
    info!(target: "save", "progress saved to {}", store.path().display());
    if let Err(e) = seal_after_write(&store, &sealer) {
        error!(target: "save", "{e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::save::RecordSealer;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<String>>>);

    impl RecordSealer for Recording {
        fn seal(&self, _path: &Path, plaintext: &str) -> Result<()> {
            self.0
                .lock()
                .map_err(|_| anyhow::anyhow!("poisoned"))?
                .push(plaintext.to_string());
            Ok(())
        }
    }

    #[test]
    fn record_without_actor_has_only_score() {
        let mut session = SessionState::new_session();
        session.score = 77;
        let record = build_record(&session, None);
        assert_eq!(record.score_data.unwrap().score, 77);
        assert!(record.player_data.is_none());
    }

    #[test]
    fn dead_actor_is_saved_revived_at_checkpoint_lives() {
        let mut session = SessionState::new_session();
        session.checkpoint.lives = 2;
        let mut actor = Actor::default();
        actor.health = -40;
        actor.lives = 2;
        actor.life = crate::core::actor::LifeState::Dead;
        let snapshot = exit_snapshot(&actor, &session);
        assert_eq!(snapshot.health, snapshot.max_health);
        assert_eq!(snapshot.lives, 2);

        actor.life = crate::core::actor::LifeState::Alive;
        actor.health = 120;
        assert_eq!(exit_snapshot(&actor, &session).health, 120);
    }

    #[test]
    fn seal_policy_follows_store_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SaveStore::new(dir.path(), "player_data.json");
        store
            .write(&build_record(&SessionState::new_session(), None))
            .unwrap();
        let rec = Recording::default();
        let sealer = SaveSealer(Box::new(rec.clone()));

        // New game: never sealed.
        seal_after_write(&store, &sealer).unwrap();
        assert!(rec.0.lock().unwrap().is_empty());

        // Continued game never saved explicitly: sealed.
        store.is_new_game = false;
        seal_after_write(&store, &sealer).unwrap();
        assert_eq!(rec.0.lock().unwrap().len(), 1);
        assert!(rec.0.lock().unwrap()[0].contains("score_data"));

        // Continued game with an explicit save: left alone.
        store.times_saved = 1;
        seal_after_write(&store, &sealer).unwrap();
        assert_eq!(rec.0.lock().unwrap().len(), 1);
    }
}
