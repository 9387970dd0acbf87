use bevy::prelude::*;

use crate::app::state::{AppState, SessionPhase};
use crate::core::config::GameConfig;
use crate::core::session::SessionState;

/// Remaining time of a smoke run; absent when `window.auto_close` is 0.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct SmokeRunTimer(pub Timer);

/// Exits after `window.auto_close` seconds and logs where the run ended up.
pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_smoke_run).add_systems(
            Update,
            finish_smoke_run.run_if(resource_exists::<SmokeRunTimer>),
        );
    }
}

pub fn smoke_run_seconds(cfg: &GameConfig) -> Option<f32> {
    let secs = cfg.window.auto_close;
    (secs > 0.0).then_some(secs)
}

fn arm_smoke_run(mut commands: Commands, cfg: Res<GameConfig>) {
    let Some(secs) = smoke_run_seconds(&cfg) else {
        return;
    };
    info!(target: "app", "smoke run: exiting after {secs} seconds");
    commands.insert_resource(SmokeRunTimer(Timer::from_seconds(secs, TimerMode::Once)));
}

// Real time: a paused session must not hold the exit back.
fn finish_smoke_run(
    mut commands: Commands,
    time: Res<Time<Real>>,
    mut timer: ResMut<SmokeRunTimer>,
    app_state: Res<State<AppState>>,
    phase: Option<Res<State<SessionPhase>>>,
    session: Res<SessionState>,
    mut exit: EventWriter<AppExit>,
) {
    if !timer.tick(time.delta()).just_finished() {
        return;
    }
    info!(
        target: "app",
        "smoke run over in {:?} / {:?}, score {}; requesting exit",
        app_state.get(),
        phase.map(|p| *p.get()),
        session.score
    );
    commands.remove_resource::<SmokeRunTimer>();
    exit.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::event::Events;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn app(auto_close: f32) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        let mut cfg = GameConfig::default();
        cfg.window.auto_close = auto_close;
        app.insert_resource(cfg)
            .init_resource::<SessionState>()
            .init_state::<AppState>()
            .add_plugins(AutoClosePlugin);
        app
    }

    fn exits(app: &App) -> usize {
        let events = app.world().resource::<Events<AppExit>>();
        events.get_cursor().read(events).count()
    }

    #[test]
    fn zero_disables_the_timer() {
        let mut app = app(0.0);
        for _ in 0..5 {
            app.update();
        }
        assert!(!app.world().contains_resource::<SmokeRunTimer>());
        assert_eq!(exits(&app), 0);
    }

    #[test]
    fn exits_once_after_the_configured_time() {
        let mut app = app(0.25);
        app.update();
        assert!(app.world().contains_resource::<SmokeRunTimer>());
        let mut frames = 0;
        while app.world().contains_resource::<SmokeRunTimer>() {
            assert!(frames < 20, "smoke run never finished");
            app.update();
            frames += 1;
        }
        assert!(frames >= 3);
        assert_eq!(exits(&app), 1);
    }
}
