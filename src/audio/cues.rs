use bevy::audio::Volume;
use bevy::prelude::*;

use crate::core::config::{AudioConfig, GameConfig};
use crate::core::events::AudioCue;

/// The single looping music source.
#[derive(Component)]
pub struct MusicPlayer;

/// Continuous ambient sources (helicopter, falling bombs, rocket thrust) cut by `StopAmbient`.
#[derive(Component)]
pub struct AmbientLoop;

pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AudioCue>()
            .add_systems(PostUpdate, play_audio_cues);
    }
}

/// Asset path for a one-shot cue or a music track; `None` when unmapped.
pub fn resolve_cue<'a>(audio: &'a AudioConfig, cue: &AudioCue) -> Option<&'a str> {
    let path = match cue {
        AudioCue::Sound(name) | AudioCue::Voice(name) => audio.sounds.get(name),
        AudioCue::Music(track) => audio.music.get(track),
        AudioCue::StopAmbient => None,
    };
    path.map(String::as_str)
}

fn play_audio_cues(
    mut commands: Commands,
    mut cues: EventReader<AudioCue>,
    cfg: Res<GameConfig>,
    asset_server: Res<AssetServer>,
    q_music: Query<Entity, With<MusicPlayer>>,
    q_ambient: Query<Entity, With<AmbientLoop>>,
) {
    let volume = Volume::Linear(cfg.audio.volume.max(0.0));
    for cue in cues.read() {
        match cue {
            AudioCue::StopAmbient => {
                for e in &q_ambient {
                    commands.entity(e).despawn();
                }
                continue;
            }
            AudioCue::Music(_) => {
                for e in &q_music {
                    commands.entity(e).despawn();
                }
            }
            AudioCue::Sound(_) | AudioCue::Voice(_) => {}
        }
        let Some(path) = resolve_cue(&cfg.audio, cue) else {
            debug!(target: "audio", "unmapped cue {:?}", cue);
            continue;
        };
        let source = AudioPlayer::new(asset_server.load(path.to_string()));
        match cue {
            AudioCue::Music(track) => {
                info!(target: "audio", "music -> {}", track);
                commands.spawn((
                    MusicPlayer,
                    source,
                    PlaybackSettings::LOOP.with_volume(volume),
                ));
            }
            _ => {
                commands.spawn((source, PlaybackSettings::DESPAWN.with_volume(volume)));
            }
        }
    }
}
