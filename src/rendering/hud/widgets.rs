use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node, PositionType};

use crate::core::events::SessionCommand;
use crate::rendering::palette::palette;

/// Root of every in-game overlay. Hidden outside gameplay.
#[derive(Component)]
pub struct HudRoot;

/// Text nodes refreshed from the session and actor each frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Score,
    Lives,
    Ammo,
    Special,
    /// Lives stored in the checkpoint; shown on the pause and continue panels.
    CheckpointLives,
}

#[derive(Component)]
pub struct HealthBarFill;

/// Full-screen red overlay; alpha decays after each hit.
#[derive(Component, Debug, Default)]
pub struct DamageFlash {
    pub alpha: f32,
}

#[derive(Component)]
pub struct PausePanel;
#[derive(Component)]
pub struct MapPanel;
#[derive(Component)]
pub struct ContinuePanel;
#[derive(Component)]
pub struct FailurePanel;
#[derive(Component)]
pub struct HintPanel;
#[derive(Component)]
pub struct HintText;

/// Overlay button issuing a session command when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub struct SessionButton(pub SessionCommand);

fn label(text: impl Into<String>, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..Default::default()
        },
        TextColor(palette::HUD_TEXT),
    )
}

fn panel_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(12.0),
        ..default()
    }
}

fn button(cmd: SessionCommand, text: &str) -> impl Bundle {
    (
        Button,
        SessionButton(cmd),
        Node {
            padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(palette::BUTTON_BG),
        children![label(text.to_owned(), 22.0)],
    )
}

/// Builds the whole overlay tree once; phase systems toggle its panels.
pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|root| {
            root.spawn((
                DamageFlash::default(),
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(palette::damage_flash(0.0)),
            ));

            // Top-left status block.
            root.spawn(Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            })
            .with_children(|p| {
                p.spawn((HudField::Score, label("Score: 0", 20.0)));
                p.spawn((HudField::Lives, label("Lives: 0", 20.0)));
                p.spawn((HudField::Ammo, label("Ammo: - - -", 20.0)));
                p.spawn((HudField::Special, label("", 20.0)));
                p.spawn((
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(palette::HEALTH_BACK),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        HealthBarFill,
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(palette::HEALTH_FILL),
                    ));
                });
            });

            root.spawn((
                HintPanel,
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Percent(20.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                Visibility::Hidden,
            ))
            .with_children(|p| {
                p.spawn((HintText, label("", 28.0)));
            });

            root.spawn((
                PausePanel,
                panel_node(),
                BackgroundColor(palette::PANEL_BG),
                Visibility::Hidden,
            ))
            .with_children(|p| {
                p.spawn(label("PAUSED", 40.0));
                p.spawn((HudField::CheckpointLives, label("", 22.0)));
                p.spawn(button(SessionCommand::Save, "Save"));
                p.spawn(button(SessionCommand::Restart, "Restart"));
                p.spawn(button(SessionCommand::ToMainMenu, "Main menu"));
                p.spawn(button(SessionCommand::Quit, "Quit"));
            });

            root.spawn((
                MapPanel,
                panel_node(),
                BackgroundColor(palette::PANEL_BG),
                Visibility::Hidden,
            ))
            .with_children(|p| {
                p.spawn(label("MAP", 40.0));
                p.spawn(label("Press M to return", 20.0));
            });

            root.spawn((
                ContinuePanel,
                panel_node(),
                BackgroundColor(palette::PANEL_BG),
                Visibility::Hidden,
            ))
            .with_children(|p| {
                p.spawn(label("YOU DIED", 40.0));
                p.spawn((HudField::CheckpointLives, label("", 22.0)));
                p.spawn(button(SessionCommand::Continue, "Continue"));
            });

            root.spawn((
                FailurePanel,
                panel_node(),
                BackgroundColor(palette::PANEL_BG),
                Visibility::Hidden,
            ))
            .with_children(|p| {
                p.spawn(label("GAME OVER", 40.0));
                p.spawn(button(SessionCommand::Restart, "Restart"));
                p.spawn(button(SessionCommand::ToMainMenu, "Main menu"));
            });
        });
}

pub fn show<M: Component>(mut q: Query<&mut Visibility, With<M>>) {
    for mut vis in &mut q {
        *vis = Visibility::Inherited;
    }
}

pub fn hide<M: Component>(mut q: Query<&mut Visibility, With<M>>) {
    for mut vis in &mut q {
        *vis = Visibility::Hidden;
    }
}
