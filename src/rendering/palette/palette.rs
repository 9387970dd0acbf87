use bevy::prelude::*;

// World sprites
pub const PLAYER: Color = Color::srgb(0.30, 0.75, 0.95);
pub const HIT_TINT: Color = Color::srgb(1.0, 0.30, 0.30);
pub const DEATH_PROXY: Color = Color::srgb(0.45, 0.10, 0.10);
pub const WALL: Color = Color::srgb(0.25, 0.27, 0.30);
pub const HAZARD: Color = Color::srgba(0.90, 0.20, 0.15, 0.80);
pub const HEAL: Color = Color::srgb(0.20, 0.85, 0.30);
pub const AMMO: Color = Color::srgb(0.85, 0.80, 0.30);

// HUD
pub const HUD_TEXT: Color = Color::srgb(0.92, 0.94, 0.96);
pub const PANEL_BG: Color = Color::srgba(0.02, 0.02, 0.05, 0.85);
pub const BUTTON_BG: Color = Color::srgb(0.18, 0.20, 0.26);
pub const BUTTON_HOVER: Color = Color::srgb(0.28, 0.32, 0.42);
pub const HEALTH_BACK: Color = Color::srgb(0.15, 0.05, 0.05);
pub const HEALTH_FILL: Color = Color::srgb(0.85, 0.15, 0.15);

/// Peak alpha of the full-screen damage flash.
pub const FLASH_ALPHA: f32 = 0.35;

#[inline]
pub fn damage_flash(alpha: f32) -> Color {
    Color::srgba(1.0, 0.0, 0.0, alpha.clamp(0.0, 1.0))
}
