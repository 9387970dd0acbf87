use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::AppState;
use crate::core::config::GameConfig;
use crate::core::events::{GameFlowEvent, SceneRequest};
use crate::core::save::{ResumeFromSave, SaveStore};
use crate::core::session::SessionState;
use crate::interaction::inputmap::{actions, InputMap};

/// Command-line overrides applied once at startup.
#[derive(Resource, Debug, Clone, Default)]
pub struct LaunchOptions {
    pub new_game: bool,
    pub level: Option<String>,
}

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LaunchOptions>()
            .add_systems(PostStartup, apply_launch_options)
            .add_systems(OnEnter(AppState::MainMenu), (show_menu_instructions, spawn_menu_ui))
            .add_systems(
                Update,
                (handle_menu_input, populate_menu_text).run_if(in_state(AppState::MainMenu)),
            )
            .add_systems(OnExit(AppState::MainMenu), despawn_menu_ui);
    }
}

/// Fresh session: everything reset, any previous save discarded.
pub fn begin_new_game(
    session: &mut SessionState,
    store: &mut SaveStore,
    flow: &mut EventWriter<GameFlowEvent>,
) {
    *session = SessionState::new_session();
    store.is_new_game = true;
    store.times_saved = 0;
    match store.delete() {
        Ok(true) => info!(target: "save", "discarded previous save"),
        Ok(false) => {}
        Err(e) => warn!(target: "save", "could not discard previous save: {e:#}"),
    }
    flow.write(GameFlowEvent::StartGame);
}

fn apply_launch_options(
    opts: Res<LaunchOptions>,
    cfg: Res<GameConfig>,
    mut session: ResMut<SessionState>,
    mut store: ResMut<SaveStore>,
    mut flow: EventWriter<GameFlowEvent>,
    mut scenes: EventWriter<SceneRequest>,
) {
    if !opts.new_game && opts.level.is_none() {
        return;
    }
    let target = opts
        .level
        .as_deref()
        .or_else(|| cfg.first_level())
        .map(str::to_string);
    let Some(target) = target else {
        warn!(target: "menu", "no gameplay scene configured; staying in the menu");
        return;
    };
    info!(target: "menu", "launching new game at '{}'", target);
    begin_new_game(&mut session, &mut store, &mut flow);
    scenes.write(SceneRequest::Load(target));
}

fn show_menu_instructions(store: Res<SaveStore>) {
    info!(target: "menu", "=== MAIN MENU ===");
    info!(target: "menu", "  N: new game");
    if store.exists() {
        info!(target: "menu", "  L: load game ({})", store.path().display());
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_menu_input(
    mut commands: Commands,
    input: Res<InputMap>,
    cfg: Res<GameConfig>,
    mut session: ResMut<SessionState>,
    mut store: ResMut<SaveStore>,
    mut flow: EventWriter<GameFlowEvent>,
    mut scenes: EventWriter<SceneRequest>,
    mut exit: EventWriter<AppExit>,
) {
    if input.just_pressed(actions::QUIT) {
        exit.write(AppExit::Success);
        return;
    }
    let Some(first) = cfg.first_level().map(str::to_string) else {
        return;
    };
    if input.just_pressed(actions::NEW_GAME) {
        info!(target: "menu", "new game");
        begin_new_game(&mut session, &mut store, &mut flow);
        scenes.write(SceneRequest::Load(first));
    } else if input.just_pressed(actions::LOAD_GAME) {
        if !store.exists() {
            info!(target: "menu", "no save to load");
            return;
        }
        info!(target: "menu", "load game");
        store.is_new_game = false;
        commands.insert_resource(ResumeFromSave);
        scenes.write(SceneRequest::Load(first));
    }
}

// === UI IMPLEMENTATION ===

#[derive(Component)]
struct MenuUiRoot;
#[derive(Component)]
struct MenuUiText;

pub fn menu_text(can_load: bool) -> String {
    let mut s = String::from("=== JAVELIN STRIKE ===\n\nN  New game\n");
    if can_load {
        s.push_str("L  Load game\n");
    }
    s.push_str("F10  Quit\n");
    s
}

fn spawn_menu_ui(mut commands: Commands) {
    commands
        .spawn((
            MenuUiRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.85)),
        ))
        .with_children(|p| {
            p.spawn((
                MenuUiText,
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..Default::default()
                },
            ));
        });
}

fn populate_menu_text(store: Res<SaveStore>, mut q_text: Query<&mut Text, With<MenuUiText>>) {
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    let s = menu_text(store.exists());
    if text.0 != s {
        text.0 = s;
    }
}

fn despawn_menu_ui(mut commands: Commands, q_root: Query<Entity, With<MenuUiRoot>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_entry_only_with_save() {
        assert!(!menu_text(false).contains("Load"));
        assert!(menu_text(true).contains("L  Load game"));
    }
}
