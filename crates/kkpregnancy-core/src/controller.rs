//! Per-character pregnancy controller
//!
//! Owns one character's [`PregnancyState`] and exposes the lifecycle hooks
//! the host calls around card saves and reloads.

use kkpregnancy_logic::constants::DATA_KEY;
use kkpregnancy_logic::pregnancy::PregnancyState;
use kkpregnancy_logic::schedule::{DayKind, MenstruationSchedule};
use log::{debug, error};

use crate::host::{CharacterHost, CharacterId, LoadPhase};
use crate::persistence::{deserialize_state, serialize_state, BlobError};

/// Handle for the belly deformation registered with the host's bone pipeline.
///
/// The host reads the strength from the owning controller every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneEffect {
    pub character: CharacterId,
}

impl BoneEffect {
    pub fn new(character: CharacterId) -> Self {
        Self { character }
    }

    /// Deformation strength in `[0, 1]` for the controller this effect belongs to.
    pub fn strength(&self, controller: &PregnancyController) -> f32 {
        if controller.character() != self.character {
            return 0.0;
        }
        controller.belly_size_percent()
    }
}

/// What a load hook did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Saved state replaced the current state.
    pub applied: bool,
    /// Host day type was forced to safe. False when the character has no
    /// calendar, since the host has nothing to change.
    pub forced_safe_day: bool,
    /// Bone effect was registered by this load.
    pub registered_bone_effect: bool,
}

/// Pregnancy controller for a single character
#[derive(Debug, Clone)]
pub struct PregnancyController {
    character: CharacterId,
    state: PregnancyState,
    bone_effect: Option<BoneEffect>,
}

impl PregnancyController {
    /// Controller with default state, before any load
    pub fn new(character: CharacterId) -> Self {
        Self::with_state(character, PregnancyState::default())
    }

    pub fn with_state(character: CharacterId, state: PregnancyState) -> Self {
        Self {
            character,
            state,
            bone_effect: None,
        }
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    pub fn state(&self) -> &PregnancyState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PregnancyState {
        &mut self.state
    }

    pub fn week(&self) -> i32 {
        self.state.week
    }

    pub fn set_week(&mut self, week: i32) {
        self.state.week = week;
    }

    pub fn fertility(&self) -> f32 {
        self.state.fertility
    }

    pub fn set_fertility(&mut self, fertility: f32) {
        self.state.fertility = fertility;
    }

    pub fn gameplay_enabled(&self) -> bool {
        self.state.gameplay_enabled
    }

    pub fn set_gameplay_enabled(&mut self, enabled: bool) {
        self.state.gameplay_enabled = enabled;
    }

    pub fn schedule(&self) -> MenstruationSchedule {
        self.state.schedule
    }

    pub fn set_schedule(&mut self, schedule: MenstruationSchedule) {
        self.state.schedule = schedule;
    }

    pub fn belly_size_percent(&self) -> f32 {
        self.state.belly_size_percent()
    }

    pub fn is_pregnant(&self) -> bool {
        self.state.is_pregnant()
    }

    pub fn can_have_risk_days(&self) -> bool {
        self.state.can_have_risk_days()
    }

    /// Registered bone effect, if a load has happened
    pub fn bone_effect(&self) -> Option<BoneEffect> {
        self.bone_effect
    }

    /// Write the current state into the character's blob
    pub fn save_data<H: CharacterHost + ?Sized>(&self, host: &mut H) -> Result<(), BlobError> {
        let data = serialize_state(&self.state)?;
        host.set_blob(self.character, DATA_KEY, data);
        Ok(())
    }

    /// Replace the state with the character's blob and suppress risk days
    /// if conception already happened. Returns whether the day was forced safe.
    pub fn read_data<H: CharacterHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let data = host.get_blob(self.character, DATA_KEY);
        self.state = deserialize_state(data.as_deref());

        if self.state.can_have_risk_days() {
            return false;
        }
        if host.menstruation_status(self.character).is_none() {
            debug!("{} has no calendar, day type left alone", self.character);
            return false;
        }
        // Every day after conception is a safe day
        host.set_menstruation_status(self.character, DayKind::Safe);
        true
    }

    /// Host hook: the character's card is about to be saved
    pub fn on_before_save<H: CharacterHost + ?Sized>(&self, host: &mut H) -> Result<(), BlobError> {
        self.save_data(host).map_err(|e| {
            error!("Failed to save pregnancy data for {}: {}", self.character, e);
            e
        })
    }

    /// Host hook: the character was (re)loaded
    pub fn on_after_load<H: CharacterHost + ?Sized>(
        &mut self,
        host: &mut H,
        phase: LoadPhase,
    ) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        if !phase.applies_saved_state() {
            debug!("Skipping pregnancy data for {} ({:?})", self.character, phase);
            return outcome;
        }

        outcome.applied = true;
        outcome.forced_safe_day = self.read_data(host);

        if self.bone_effect.is_none() {
            let effect = BoneEffect::new(self.character);
            host.register_bone_effect(self.character, effect);
            self.bone_effect = Some(effect);
            outcome.registered_bone_effect = true;
        }

        debug!(
            "Loaded pregnancy data for {}: week={} gameplay={} schedule={:?}",
            self.character, self.state.week, self.state.gameplay_enabled, self.state.schedule
        );
        outcome
    }
}
