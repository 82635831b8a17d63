//! Boundary to the host game.
//!
//! Everything the controller needs from the host goes through
//! [`CharacterHost`]. [`MemoryHost`] keeps all of it in maps, for tests and
//! the headless harness.

use std::collections::HashMap;

use kkpregnancy_logic::schedule::DayKind;
use serde::{Deserialize, Serialize};

use crate::controller::BoneEffect;

/// Host-assigned character identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chara#{}", self.0)
    }
}

/// Where in the host lifecycle a character load happens.
///
/// Decides whether persisted pregnancy data is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Regular load outside the character editor.
    Gameplay,
    /// First load of a card while the editor is starting up. Applied so
    /// progress survives opening a character in the editor.
    EditorInitialLoad,
    /// A card loaded from inside the running editor. Applied only when the
    /// user asked to load parameters; hosts without that option pass `true`.
    EditorReload { load_parameters: bool },
}

impl LoadPhase {
    /// Whether saved state should replace the current state for this load.
    pub fn applies_saved_state(self) -> bool {
        match self {
            LoadPhase::Gameplay | LoadPhase::EditorInitialLoad => true,
            LoadPhase::EditorReload { load_parameters } => load_parameters,
        }
    }
}

/// Capabilities the host game provides to the controller.
pub trait CharacterHost {
    /// Extended-data blob stored under `key` on the character's card.
    fn get_blob(&self, character: CharacterId, key: &str) -> Option<Vec<u8>>;

    fn set_blob(&mut self, character: CharacterId, key: &str, data: Vec<u8>);

    /// Current day type of the character's calendar, if the character has one.
    fn menstruation_status(&self, character: CharacterId) -> Option<DayKind>;

    /// Overwrite the day type. Hosts ignore characters without a calendar.
    fn set_menstruation_status(&mut self, character: CharacterId, status: DayKind);

    /// Attach the belly effect to the character's bone pipeline.
    fn register_bone_effect(&mut self, character: CharacterId, effect: BoneEffect);
}

/// In-memory host
#[derive(Debug, Default)]
pub struct MemoryHost {
    blobs: HashMap<(CharacterId, String), Vec<u8>>,
    statuses: HashMap<CharacterId, DayKind>,
    bone_effects: HashMap<CharacterId, Vec<BoneEffect>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give a character a calendar entry, like a heroine in the main game.
    pub fn with_status(mut self, character: CharacterId, status: DayKind) -> Self {
        self.statuses.insert(character, status);
        self
    }

    /// Number of bone effects registered for a character
    pub fn bone_effect_count(&self, character: CharacterId) -> usize {
        self.bone_effects.get(&character).map_or(0, Vec::len)
    }

    /// Drop a stored blob, as if the card had never been saved with it
    pub fn clear_blob(&mut self, character: CharacterId, key: &str) {
        self.blobs.remove(&(character, key.to_string()));
    }
}

impl CharacterHost for MemoryHost {
    fn get_blob(&self, character: CharacterId, key: &str) -> Option<Vec<u8>> {
        self.blobs.get(&(character, key.to_string())).cloned()
    }

    fn set_blob(&mut self, character: CharacterId, key: &str, data: Vec<u8>) {
        self.blobs.insert((character, key.to_string()), data);
    }

    fn menstruation_status(&self, character: CharacterId) -> Option<DayKind> {
        self.statuses.get(&character).copied()
    }

    fn set_menstruation_status(&mut self, character: CharacterId, status: DayKind) {
        if let Some(current) = self.statuses.get_mut(&character) {
            *current = status;
        }
    }

    fn register_bone_effect(&mut self, character: CharacterId, effect: BoneEffect) {
        self.bone_effects.entry(character).or_default().push(effect);
    }
}
