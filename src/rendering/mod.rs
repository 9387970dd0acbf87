pub mod camera;
pub mod hit_tint;
pub mod hud;
pub mod palette;
