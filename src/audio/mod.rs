//! Resolves named `AudioCue` events to assets through the config maps.
pub mod cues;

pub use cues::{AmbientLoop, AudioCuePlugin, MusicPlayer};
