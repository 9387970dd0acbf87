use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::core::components::TriggerKind;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}
impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CheckpointDef {
    pub position: Vec2Def,
    /// Radians around Z.
    #[serde(default)]
    pub rotation: f32,
}

impl CheckpointDef {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec2::from(self.position).extend(1.0))
            .with_rotation(Quat::from_rotation_z(self.rotation))
    }
}

fn default_trigger_radius() -> f32 {
    12.0
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TriggerDef {
    pub kind: TriggerKind,
    pub position: Vec2Def,
    #[serde(default = "default_trigger_radius")]
    pub radius: f32,
}

/// Axis-aligned solid block.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WallDef {
    pub center: Vec2Def,
    pub size: Vec2Def,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LevelLayout {
    pub version: u32,
    pub name: String,
    pub player_spawn: Vec2Def,
    pub checkpoint: CheckpointDef,
    #[serde(default)]
    pub boss_active: bool,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
    #[serde(default)]
    pub walls: Vec<WallDef>,
}

impl LevelLayout {
    pub fn parse(txt: &str) -> Result<Self> {
        let layout: LevelLayout = ron::from_str(txt).context("parse level layout")?;
        if layout.version != 1 {
            bail!("LevelLayout version {} unsupported (expected 1)", layout.version);
        }
        for (i, trigger) in layout.triggers.iter().enumerate() {
            if let TriggerKind::Damage { amount } | TriggerKind::Heal { amount } = trigger.kind {
                if amount < 0 {
                    bail!("trigger {i}: amount {amount} must not be negative");
                }
            }
        }
        Ok(layout)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path)
            .with_context(|| format!("read level {}", path.display()))?;
        Self::parse(&txt).with_context(|| format!("level file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::WeaponKind;

    const SAMPLE: &str = r#"
        (
            version: 1,
            name: "Test_Level",
            player_spawn: (x: 0.0, y: -100.0),
            checkpoint: (position: (x: 10.0, y: 20.0), rotation: 0.5),
            triggers: [
                (kind: Heal(amount: 100), position: (x: 50.0, y: 0.0)),
                (kind: Gun(weapon: PistolB), position: (x: -50.0, y: 0.0), radius: 16.0),
                (kind: Damage(amount: 75), position: (x: 0.0, y: 80.0)),
                (kind: Ammo(javelins: 3), position: (x: 0.0, y: 40.0)),
            ],
            walls: [ (center: (x: 0.0, y: 300.0), size: (x: 1200.0, y: 20.0)) ],
        )
    "#;

    #[test]
    fn parses_sample_layout() {
        let layout = LevelLayout::parse(SAMPLE).unwrap();
        assert_eq!(layout.name, "Test_Level");
        assert!(!layout.boss_active);
        assert_eq!(layout.triggers.len(), 4);
        assert_eq!(layout.triggers[0].radius, 12.0);
        assert_eq!(
            layout.triggers[1].kind,
            TriggerKind::Gun { weapon: WeaponKind::PistolB }
        );
        let t = layout.checkpoint.transform();
        assert_eq!(t.translation.truncate(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn rejects_negative_trigger_amount() {
        let txt = SAMPLE.replace("Damage(amount: 75)", "Damage(amount: -75)");
        let err = LevelLayout::parse(&txt).unwrap_err();
        assert!(err.to_string().contains("trigger 2"));
    }

    #[test]
    fn rejects_unknown_version() {
        let txt = SAMPLE.replace("version: 1", "version: 7");
        let err = LevelLayout::parse(&txt).unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }
}
