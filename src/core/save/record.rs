use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::actor::Actor;
use crate::core::session::SessionState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    pub score: i32,
    pub bonus1: bool,
    pub bonus2: bool,
    pub bonus3: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    pub lives: i32,
    pub health: i32,
    pub position: [f32; 2],
}

/// One save file: every saveable part writes its own block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default)]
    pub score_data: Option<ScoreData>,
    #[serde(default)]
    pub player_data: Option<PlayerData>,
}

/// Save/load contract implemented by each component that persists state.
pub trait Saveable {
    fn populate_save_data(&self, record: &mut SaveRecord);
    fn load_from_save_data(&mut self, record: &SaveRecord);
}

pub fn collect_record(parts: &[&dyn Saveable]) -> SaveRecord {
    let mut record = SaveRecord::default();
    for part in parts {
        part.populate_save_data(&mut record);
    }
    record
}

pub fn distribute_record(record: &SaveRecord, parts: &mut [&mut dyn Saveable]) {
    for part in parts.iter_mut() {
        part.load_from_save_data(record);
    }
}

impl Saveable for SessionState {
    fn populate_save_data(&self, record: &mut SaveRecord) {
        record.score_data = Some(ScoreData {
            score: i32::try_from(self.score).unwrap_or(i32::MAX),
            bonus1: self.bonus_claimed[0],
            bonus2: self.bonus_claimed[1],
            bonus3: self.bonus_claimed[2],
        });
    }

    fn load_from_save_data(&mut self, record: &SaveRecord) {
        let Some(data) = &record.score_data else {
            return;
        };
        self.score = data.score.max(0) as u32;
        self.bonus_claimed = [data.bonus1, data.bonus2, data.bonus3];
    }
}

/// Borrowed view over the actor's persisted fields (lives, health and position).
pub struct ActorSaveSlot<'a> {
    pub actor: &'a mut Actor,
    pub transform: &'a mut Transform,
}

impl Saveable for ActorSaveSlot<'_> {
    fn populate_save_data(&self, record: &mut SaveRecord) {
        record.player_data = Some(PlayerData {
            lives: i32::try_from(self.actor.lives).unwrap_or(i32::MAX),
            health: self.actor.health,
            position: [self.transform.translation.x, self.transform.translation.y],
        });
    }

    fn load_from_save_data(&mut self, record: &SaveRecord) {
        let Some(data) = &record.player_data else {
            return;
        };
        self.actor.lives = data.lives.max(0) as u32;
        self.actor.health = data.health;
        self.transform.translation.x = data.position[0];
        self.transform.translation.y = data.position[1];
    }
}
