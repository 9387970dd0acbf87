use bevy::prelude::*;

use crate::core::actor::Actor;
use crate::core::components::{Arsenal, Player};
use crate::core::events::{HintRequested, ScreenFlash, SessionCommand};
use crate::core::session::{SessionState, SpecialWeapon};
use crate::rendering::palette::palette;

use super::widgets::{DamageFlash, HealthBarFill, HintPanel, HintText, HudField, SessionButton};

/// Alpha lost per real second by the damage flash.
pub const FLASH_DECAY_PER_SEC: f32 = 1.5;

/// Remaining display time of the current hint.
#[derive(Resource, Debug, Default)]
pub struct HintTimer(pub Option<Timer>);

/// Clip ammo label; 0 means the unlimited starter clip.
pub fn ammo_label(clip_ammo: u32) -> String {
    if clip_ammo == 0 {
        "- - -".to_string()
    } else {
        clip_ammo.to_string()
    }
}

pub fn hint_text(key: &str) -> String {
    match key {
        "score" => "Extra life!".to_string(),
        other => other.to_string(),
    }
}

pub fn field_text(
    field: HudField,
    session: &SessionState,
    actor: Option<(&Actor, &Arsenal)>,
) -> String {
    match (field, actor) {
        (HudField::Score, _) => format!("Score: {}", session.score),
        (HudField::CheckpointLives, _) => format!("Lives: {}", session.checkpoint.lives),
        (HudField::Lives, Some((a, _))) => format!("Lives: {}", a.lives),
        (HudField::Ammo, Some((_, ars))) => format!("Ammo: {}", ammo_label(ars.clip_ammo)),
        (HudField::Special, Some((_, ars))) => {
            let count = match ars.selected_special {
                SpecialWeapon::Rockets => ars.rockets_ammo,
                SpecialWeapon::Javelin => ars.javelin_ammo,
            };
            format!("{}: {}", ars.selected_special.label(), count)
        }
        (_, None) => String::new(),
    }
}

/// Bar width in percent. A dead actor shows a full bar until Continue refills it.
pub fn health_bar_percent(actor: &Actor) -> f32 {
    if actor.is_alive() {
        actor.health_fraction() * 100.0
    } else {
        100.0
    }
}

pub fn update_hud_texts(
    session: Res<SessionState>,
    q_actor: Query<(&Actor, &Arsenal), With<Player>>,
    mut q_text: Query<(&HudField, &mut Text)>,
    mut q_bar: Query<&mut Node, With<HealthBarFill>>,
) {
    let actor = q_actor.single().ok();
    for (field, mut text) in &mut q_text {
        let s = field_text(*field, &session, actor);
        if text.0 != s {
            text.0 = s;
        }
    }
    if let Some((a, _)) = actor {
        let pct = health_bar_percent(a);
        for mut node in &mut q_bar {
            node.width = Val::Percent(pct);
        }
    }
}

pub fn show_hints(
    mut reader: EventReader<HintRequested>,
    mut timer: ResMut<HintTimer>,
    mut q_text: Query<&mut Text, With<HintText>>,
    mut q_panel: Query<&mut Visibility, With<HintPanel>>,
) {
    let Some(req) = reader.read().last() else {
        return;
    };
    if let Ok(mut text) = q_text.single_mut() {
        text.0 = hint_text(&req.key);
    }
    for mut vis in &mut q_panel {
        *vis = Visibility::Inherited;
    }
    timer.0 = Some(Timer::from_seconds(req.seconds.max(0.0), TimerMode::Once));
    debug!(target: "hud", "hint '{}' for {:.1}s", req.key, req.seconds);
}

pub fn expire_hints(
    time: Res<Time<Virtual>>,
    mut timer: ResMut<HintTimer>,
    mut q_panel: Query<&mut Visibility, With<HintPanel>>,
) {
    let Some(t) = timer.0.as_mut() else {
        return;
    };
    if !t.tick(time.delta()).finished() {
        return;
    }
    timer.0 = None;
    for mut vis in &mut q_panel {
        *vis = Visibility::Hidden;
    }
}

pub fn drive_damage_flash(
    time: Res<Time<Real>>,
    mut reader: EventReader<ScreenFlash>,
    mut q: Query<(&mut DamageFlash, &mut BackgroundColor)>,
) {
    let flashed = reader.read().any(|f| *f == ScreenFlash::Damage);
    for (mut flash, mut bg) in &mut q {
        if flashed {
            flash.alpha = palette::FLASH_ALPHA;
        } else if flash.alpha > 0.0 {
            flash.alpha = (flash.alpha - FLASH_DECAY_PER_SEC * time.delta_secs()).max(0.0);
        } else {
            continue;
        }
        bg.0 = palette::damage_flash(flash.alpha);
    }
}

pub fn session_buttons(
    mut q: Query<(&Interaction, &SessionButton, &mut BackgroundColor), Changed<Interaction>>,
    mut out: EventWriter<SessionCommand>,
) {
    for (interaction, button, mut bg) in &mut q {
        match interaction {
            Interaction::Pressed => {
                debug!(target: "hud", "button {:?}", button.0);
                out.write(button.0);
            }
            Interaction::Hovered => bg.0 = palette::BUTTON_HOVER,
            Interaction::None => bg.0 = palette::BUTTON_BG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actor::LifeState;

    #[test]
    fn ammo_label_marks_unlimited_clip() {
        assert_eq!(ammo_label(0), "- - -");
        assert_eq!(ammo_label(42), "42");
    }

    #[test]
    fn score_hint_reads_as_extra_life() {
        assert_eq!(hint_text("score"), "Extra life!");
        assert_eq!(hint_text("Find the exit"), "Find the exit");
    }

    #[test]
    fn special_field_shows_selected_count() {
        let session = SessionState::new_session();
        let actor = Actor::default();
        let arsenal = Arsenal {
            rockets_ammo: 4,
            javelin_ammo: 9,
            selected_special: SpecialWeapon::Javelin,
            ..Default::default()
        };
        assert_eq!(
            field_text(HudField::Special, &session, Some((&actor, &arsenal))),
            "Javelin: 9"
        );
        assert_eq!(field_text(HudField::Lives, &session, None), "");
    }

    #[test]
    fn dead_actor_shows_full_bar() {
        let mut actor = Actor::default();
        actor.health = actor.max_health / 2;
        assert!((health_bar_percent(&actor) - 50.0).abs() < 1.0);
        actor.health = -20;
        actor.life = LifeState::Dead;
        assert_eq!(health_bar_percent(&actor), 100.0);
    }

    #[test]
    fn hud_texts_follow_session() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut session = SessionState::new_session();
        session.score = 1234;
        app.insert_resource(session)
            .add_systems(Update, update_hud_texts);
        let score = app
            .world_mut()
            .spawn((HudField::Score, Text::new("")))
            .id();
        app.update();
        assert_eq!(app.world().get::<Text>(score).unwrap().0, "Score: 1234");
    }
}
