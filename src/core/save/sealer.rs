use anyhow::Result;
use bevy::prelude::*;
use std::path::Path;

/// Collaborator that protects the save file at rest. The scheme is owned by the implementor.
pub trait RecordSealer: Send + Sync + 'static {
    fn seal(&self, path: &Path, plaintext: &str) -> Result<()>;
}

/// Sealer used on exit.
#[derive(Resource)]
pub struct SaveSealer(pub Box<dyn RecordSealer>);

impl Default for SaveSealer {
    fn default() -> Self {
        Self(Box::new(PlaintextSealer))
    }
}

/// Leaves the file as written.
pub struct PlaintextSealer;

impl RecordSealer for PlaintextSealer {
    fn seal(&self, path: &Path, plaintext: &str) -> Result<()> {
        debug!(
            target: "save",
            "no sealer configured; {} ({} bytes) stays plaintext",
            path.display(),
            plaintext.len()
        );
        Ok(())
    }
}
