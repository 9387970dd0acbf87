//! Session-level bookkeeping: score, one-shot bonus lives and the respawn checkpoint.
//! Pure data + rules; the Bevy systems driving it live in `gameplay::session`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::SessionConfig;

/// Special weapon slot the arsenal fires with its secondary trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialWeapon {
    #[default]
    Rockets,
    Javelin,
}

impl SpecialWeapon {
    pub fn toggled(self) -> Self {
        match self {
            SpecialWeapon::Rockets => SpecialWeapon::Javelin,
            SpecialWeapon::Javelin => SpecialWeapon::Rockets,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpecialWeapon::Rockets => "Rockets",
            SpecialWeapon::Javelin => "Javelin",
        }
    }
}

/// Snapshot of the actor used by Continue. Mirrored continuously while the actor is alive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub lives: u32,
    pub javelin_ammo: u32,
    pub rockets_ammo: u32,
    pub selected_special: SpecialWeapon,
}

/// Bonus tier index (0, 1, 2) granted on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusTier(pub usize);

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub score: u32,
    pub bonus_claimed: [bool; 3],
    pub is_game_over: bool,
    pub checkpoint: Checkpoint,
}

impl SessionState {
    pub fn new_session() -> Self {
        Self::default()
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Claims the lowest unclaimed breakpoint the score has reached. At most one tier per call.
    pub fn check_score(&mut self, breakpoints: &[u32; 3]) -> Option<BonusTier> {
        let tier = (0..breakpoints.len())
            .find(|&i| !self.bonus_claimed[i] && self.score >= breakpoints[i])?;
        self.bonus_claimed[tier] = true;
        Some(BonusTier(tier))
    }

    /// Death penalty. Returns the points removed.
    pub fn apply_death_penalty(&mut self, threshold: u32) -> u32 {
        let loss = death_penalty(self.score, threshold);
        self.score -= loss;
        loss
    }
}

/// 1/5 of the score above `threshold`, 1/3 at or below it (integer division).
pub fn death_penalty(score: u32, threshold: u32) -> u32 {
    if score > threshold {
        score / 5
    } else {
        score / 3
    }
}

/// Stacked cue count for a tier, falling back to one play if the table is short.
pub fn bonus_cue_repeats(cfg: &SessionConfig, tier: BonusTier) -> u32 {
    cfg.bonus_cue_repeats.get(tier.0).copied().unwrap_or(1)
}
