use anyhow::{Context, Result};
use bevy::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::record::SaveRecord;

/// Marker resource: apply the save record when the next gameplay scene is spawned.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ResumeFromSave;

/// File-backed save slot aggregating every saveable part into one JSON document.
#[derive(Resource, Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
    file_name: String,
    /// Session started from "New game" rather than from an existing save.
    pub is_new_game: bool,
    /// Explicit in-session saves so far.
    pub times_saved: u32,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            is_new_game: true,
            times_saved: 0,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    pub fn write(&self, record: &SaveRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create save dir {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(record).context("serialize save record")?;
        let path = self.path();
        fs::write(&path, json).with_context(|| format!("write save {}", path.display()))
    }

    /// `Ok(None)` when no save exists.
    pub fn read(&self) -> Result<Option<SaveRecord>> {
        let path = self.path();
        let txt = match fs::read_to_string(&path) {
            Ok(txt) => txt,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read save {}", path.display())),
        };
        let record = serde_json::from_str(&txt)
            .with_context(|| format!("parse save {}", path.display()))?;
        Ok(Some(record))
    }

    pub fn read_plaintext(&self) -> Result<String> {
        let path = self.path();
        fs::read_to_string(&path).with_context(|| format!("read save {}", path.display()))
    }

    /// Removes the save file. A missing file is not an error; returns whether one was removed.
    pub fn delete(&self) -> Result<bool> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("delete save {}", path.display())),
        }
    }

    /// Encrypt-on-exit policy: only continued games that were never explicitly saved.
    pub fn should_seal_on_exit(&self) -> bool {
        !self.is_new_game && self.times_saved < 1
    }
}
