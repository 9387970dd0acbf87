use bevy::prelude::*;

/// Player-issued session requests (keyboard actions or overlay buttons).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Continue,
    Restart,
    ToMainMenu,
    NextLevel,
    Save,
    Quit,
}

/// Notifications for the game-state collaborator (menus, achievements, analytics).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameFlowEvent {
    GameOver,
    StartGame,
}

/// Points earned from an outside source (enemy kills, pickups, scripted rewards).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAwarded(pub u32);

/// Named audio requests; resolved to assets by the audio plugin.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum AudioCue {
    Sound(String),
    Voice(String),
    Music(String),
    /// Stop every continuous ambient source (helicopter, falling bombs, rocket thrust).
    StopAmbient,
}

impl AudioCue {
    pub fn sound(name: &str) -> Self {
        AudioCue::Sound(name.to_string())
    }
    pub fn voice(name: &str) -> Self {
        AudioCue::Voice(name.to_string())
    }
    pub fn music(track: &str) -> Self {
        AudioCue::Music(track.to_string())
    }
}

/// Show the hint panel for `key` during `seconds`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HintRequested {
    pub key: String,
    pub seconds: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenFlash {
    Damage,
}

/// Ask the scene loader to switch scenes.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum SceneRequest {
    Load(String),
    ReloadCurrent,
}

/// Music track names shared by both controllers.
pub mod tracks {
    pub const LEVEL_ONE: &str = "Level One";
    pub const BOSS_FIGHT: &str = "BossFight";
    pub const DIE: &str = "Die";
}

/// Scene name of the main menu.
pub const MAIN_MENU_SCENE: &str = "Main_Menu";
