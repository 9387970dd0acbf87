pub mod actor;
pub mod lifetime;
pub mod session;
pub mod spawn;
pub mod validation;
pub mod weapons;
