//! Character roster - drives every loaded character's pregnancy controller

use std::collections::HashMap;

use hecs::{Entity, World};
use kkpregnancy_logic::config::PregnancyConfig;
use kkpregnancy_logic::pregnancy::WeekChange;
use kkpregnancy_logic::schedule::{DayKind, ScheduleTables};
use log::info;
use rand::Rng;

use crate::controller::{LoadOutcome, PregnancyController};
use crate::host::{CharacterHost, CharacterId, LoadPhase};
use crate::persistence::BlobError;

/// All characters currently loaded in the session
pub struct PregnancyRoster {
    /// ECS world, one entity per character
    pub world: World,
    /// Day tables for every schedule variant
    pub tables: ScheduleTables,
    /// Gameplay tuning
    pub config: PregnancyConfig,
    /// Character to entity lookup
    index: HashMap<CharacterId, Entity>,
}

impl PregnancyRoster {
    /// Create an empty roster
    pub fn new(tables: ScheduleTables, config: PregnancyConfig) -> Self {
        Self {
            world: World::new(),
            tables,
            config,
            index: HashMap::new(),
        }
    }

    /// Add a character with default state. Returns the existing entity if
    /// the character is already on the roster.
    pub fn add_character(&mut self, id: CharacterId) -> Entity {
        if let Some(entity) = self.find(id) {
            return entity;
        }
        let mut controller = PregnancyController::new(id);
        controller.set_fertility(self.config.default_fertility);
        let entity = self.world.spawn((id, controller));
        self.index.insert(id, entity);
        entity
    }

    /// Take a character off the roster. Returns false if it wasn't there.
    pub fn remove_character(&mut self, id: CharacterId) -> bool {
        match self.index.remove(&id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Entity holding a character
    pub fn find(&self, id: CharacterId) -> Option<Entity> {
        self.index.get(&id).copied()
    }

    /// Count characters on the roster
    pub fn character_count(&self) -> usize {
        self.index.len()
    }

    /// Count pregnant characters
    pub fn pregnant_count(&self) -> usize {
        self.world
            .query::<&PregnancyController>()
            .iter()
            .filter(|(_, c)| c.is_pregnant())
            .count()
    }

    pub fn controller(&self, id: CharacterId) -> Option<hecs::Ref<'_, PregnancyController>> {
        let entity = self.find(id)?;
        self.world.get::<&PregnancyController>(entity).ok()
    }

    pub fn controller_mut(
        &mut self,
        id: CharacterId,
    ) -> Option<hecs::RefMut<'_, PregnancyController>> {
        let entity = self.find(id)?;
        self.world.get::<&mut PregnancyController>(entity).ok()
    }

    /// Run every character's save hook. Stops at the first failure.
    pub fn save_all<H: CharacterHost + ?Sized>(&self, host: &mut H) -> Result<usize, BlobError> {
        let mut saved = 0;
        for (_, controller) in self.world.query::<&PregnancyController>().iter() {
            controller.on_before_save(host)?;
            saved += 1;
        }
        Ok(saved)
    }

    /// Run every character's load hook
    pub fn load_all<H: CharacterHost + ?Sized>(
        &mut self,
        host: &mut H,
        phase: LoadPhase,
    ) -> Vec<(CharacterId, LoadOutcome)> {
        let mut outcomes: Vec<_> = self
            .world
            .query_mut::<&mut PregnancyController>()
            .into_iter()
            .map(|(_, controller)| {
                let outcome = controller.on_after_load(host, phase);
                (controller.character(), outcome)
            })
            .collect();
        outcomes.sort_by_key(|(id, _)| *id);
        outcomes
    }

    /// Advance every character by one week. Returns the characters whose
    /// pregnancy moved.
    pub fn end_of_week(&mut self) -> Vec<(CharacterId, WeekChange)> {
        let mut changes: Vec<_> = self
            .world
            .query_mut::<&mut PregnancyController>()
            .into_iter()
            .filter_map(|(_, controller)| {
                let change = controller.state_mut().advance_week();
                match change {
                    WeekChange::Unchanged => None,
                    WeekChange::StartedLeave => {
                        info!("{} started maternal leave", controller.character());
                        Some((controller.character(), change))
                    }
                    WeekChange::Returned => {
                        info!("{} returned from maternal leave", controller.character());
                        Some((controller.character(), change))
                    }
                    WeekChange::Progressed(_) => Some((controller.character(), change)),
                }
            })
            .collect();
        changes.sort_by_key(|(id, _)| *id);
        changes
    }

    /// Roll for conception on the given cycle day. Only risky days can succeed.
    pub fn try_conceive<R: Rng + ?Sized>(
        &mut self,
        id: CharacterId,
        day: usize,
        rng: &mut R,
    ) -> bool {
        let Some(entity) = self.find(id) else {
            return false;
        };
        let Ok(mut controller) = self.world.get::<&mut PregnancyController>(entity) else {
            return false;
        };

        if self.tables.day_kind(controller.schedule(), day) != DayKind::Risky {
            return false;
        }
        let chance = controller
            .state()
            .conception_chance(self.config.base_conception_chance);
        if chance <= 0.0 || rng.gen::<f32>() >= chance {
            return false;
        }

        let conceived = controller.state_mut().conceive();
        if conceived {
            info!("{} conceived on cycle day {}", id, day);
        }
        conceived
    }
}

impl Default for PregnancyRoster {
    fn default() -> Self {
        Self::new(ScheduleTables::default(), PregnancyConfig::default())
    }
}
