//! Central system ordering labels to make update sequence explicit.
//! Frame order (Update, gameplay only):
//! 1. ActorInputSet (movement intent, aim, weapon selection)
//! 2. ActorSet (trigger dispatch, death check, checkpoint mirror)
//! 3. SessionSet (score check, phase toggles, session commands)
//! 4. PresentationSet (HUD text, panels, audio)
//!
//! FixedUpdate: PrePhysicsSet writes velocities, PostPhysicsSet runs the health gate.
//! Rapier steps afterwards in FixedPostUpdate.
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ActorInputSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ActorSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SessionSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PresentationSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // velocities written before the physics step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsSet; // checks that run after velocities are written
