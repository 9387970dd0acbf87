pub mod record;
pub mod sealer;
pub mod store;

pub use record::{
    collect_record, distribute_record, ActorSaveSlot, PlayerData, SaveRecord, Saveable, ScoreData,
};
pub use sealer::{PlaintextSealer, RecordSealer, SaveSealer};
pub use store::{ResumeFromSave, SaveStore};
