use std::path::{Path, PathBuf};

use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use javelin_strike::app::menu::LaunchOptions;
use javelin_strike::core::save::SaveStore;
use javelin_strike::{GameConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(author, version, about = "Top-down shooter session", long_about = None)]
struct Args {
    /// Base config; `<stem>.local.ron` next to it overrides individual keys.
    #[arg(long, default_value = "assets/config/game.ron")]
    config: PathBuf,
    /// Overrides `save.dir`.
    #[arg(long)]
    save_dir: Option<PathBuf>,
    /// Skip the menu and start a new game at the first level.
    #[arg(long)]
    new_game: bool,
    /// Skip the menu and start a new game at this scene.
    #[arg(long)]
    level: Option<String>,
}

/// Config messages gathered before the log plugin exists; emitted at startup.
#[derive(Resource, Default)]
struct ConfigReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn load_config(path: &Path) -> (GameConfig, ConfigReport) {
    let local = path.with_extension("local.ron");
    let (cfg, used, errors) = GameConfig::load_layered([path, local.as_path()]);
    let warnings = cfg.validate();
    (
        cfg,
        ConfigReport {
            used,
            errors,
            warnings,
        },
    )
}

fn log_config_report(report: Res<ConfigReport>) {
    for e in &report.errors {
        warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "CONFIG VALIDATION: {w}");
    }
    if report.used.is_empty() {
        info!(target: "config", "no config layers found; using defaults");
    } else {
        info!(target: "config", "config layers loaded: {:?}", report.used);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (cfg, report) = load_config(&args.config);

    let save_dir = args
        .save_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.save.dir));
    let store = SaveStore::new(save_dir, cfg.save.file_name.clone());

    let exit = App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: cfg.log_filter.clone(),
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: cfg.window.title.clone(),
                        resolution: (cfg.window.width, cfg.window.height).into(),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(cfg)
        .insert_resource(store)
        .insert_resource(report)
        .insert_resource(LaunchOptions {
            new_game: args.new_game,
            level: args.level,
        })
        .add_systems(Startup, log_config_report)
        .add_plugins(GamePlugin)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("exited with error code {code}"),
    }
}
