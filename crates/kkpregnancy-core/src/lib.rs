//! KK Pregnancy Core - per-character pregnancy controller
//!
//! Glues the pure rules in `kkpregnancy-logic` to a host game that owns the
//! character lifecycle. The host calls explicit lifecycle hooks; this crate
//! never subclasses or reaches into host internals.
//!
//! # Architecture
//!
//! - **Host**: the [`host::CharacterHost`] trait is the whole boundary
//!   (extended-data blobs, menstruation status, bone-effect registration)
//! - **Controller**: one [`controller::PregnancyController`] per character,
//!   with `on_before_save` / `on_after_load` hooks
//! - **Persistence**: fixed bincode layout for the per-character blob
//! - **Roster**: an ECS world (`hecs`) of controllers driven as a group
//!
//! # Example
//!
//! ```rust
//! use kkpregnancy_core::prelude::*;
//!
//! let mut host = MemoryHost::new();
//! let mut controller = PregnancyController::new(CharacterId(1));
//!
//! controller.state_mut().week = 5;
//! controller.on_before_save(&mut host).unwrap();
//!
//! let mut reloaded = PregnancyController::new(CharacterId(1));
//! reloaded.on_after_load(&mut host, LoadPhase::Gameplay);
//! assert_eq!(reloaded.week(), 5);
//! ```

pub mod controller;
pub mod host;
pub mod persistence;
pub mod roster;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::controller::{BoneEffect, LoadOutcome, PregnancyController};
    pub use crate::host::{CharacterHost, CharacterId, LoadPhase, MemoryHost};
    pub use crate::roster::PregnancyRoster;
    pub use kkpregnancy_logic::pregnancy::PregnancyState;
    pub use kkpregnancy_logic::schedule::{DayKind, MenstruationSchedule, ScheduleTables};
}
