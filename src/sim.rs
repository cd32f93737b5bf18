use std::sync::Arc;

use glam::IVec2;

use crate::config::EngineConfig;
use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::ecs::components::{
    BehaviorState, BoxSize, Emote, EmoteState, Interaction, PetId, PetState, Position,
};
use crate::ecs::systems::{self, collision::Collider, drag};
use crate::error::PetError;
use crate::pet::{self, roster::Roster};
use crate::render::{self, instance::PetInstance};
use crate::settings::{PetSettings, SpeedPreset};
use crate::spatial::Bounds;
use crate::sprite::{SheetLoader, SpriteCache};

/// Read-only snapshot of one pet, for the host's bookkeeping and menus.
#[derive(Debug, Clone, PartialEq)]
pub struct PetView {
    pub entity: hecs::Entity,
    pub id: String,
    pub position: IVec2,
    pub size: IVec2,
    pub behavior: BehaviorState,
    pub emote: Emote,
    pub held: bool,
}

/// Everything the host needs to run the pets: world, roster, settings and
/// sprites behind one handle. Call [`Simulation::step`] once per tick from a
/// single thread, then read [`Simulation::instances`] to draw.
pub struct Simulation {
    world: hecs::World,
    roster: Roster,
    rng: fastrand::Rng,
    config: EngineConfig,
    settings: PetSettings,
    sprites: SpriteCache,
    timers: SystemTimers,
    colliders: Vec<Collider>,
    instances: Vec<PetInstance>,
    tick_count: u64,
}

impl Simulation {
    pub fn new(loader: Arc<dyn SheetLoader>) -> Self {
        Self {
            world: hecs::World::new(),
            roster: Roster::builtin(),
            rng: fastrand::Rng::new(),
            config: EngineConfig::default(),
            settings: PetSettings::default(),
            sprites: SpriteCache::new(loader),
            timers: SystemTimers::new(),
            colliders: Vec::new(),
            instances: Vec::new(),
            tick_count: 0,
        }
    }

    /// Deterministic random draws, for replays and tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn settings(&self) -> &PetSettings {
        &self.settings
    }

    pub fn timers(&self) -> &SystemTimers {
        &self.timers
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn add_pet(
        &mut self,
        id: &str,
        position: Option<IVec2>,
        bounds: Bounds,
    ) -> Result<hecs::Entity, PetError> {
        pet::spawn_pet(
            &mut self.world,
            &self.roster,
            id,
            position,
            &self.settings,
            bounds,
            &self.config,
            &mut self.rng,
        )
    }

    /// Returns the pet's last position.
    pub fn remove_pet(&mut self, entity: hecs::Entity) -> Result<IVec2, PetError> {
        pet::despawn_pet(&mut self.world, entity)
    }

    pub fn pet(&self, entity: hecs::Entity) -> Option<PetView> {
        let mut query = self
            .world
            .query_one::<(&PetId, &Position, &BoxSize, &PetState, &EmoteState, &Interaction)>(
                entity,
            )
            .ok()?;
        query.get().map(|(id, pos, size, state, emote, interaction)| PetView {
            entity,
            id: id.0.clone(),
            position: pos.0,
            size: size.0,
            behavior: state.behavior,
            emote: emote.emote,
            held: interaction.is_held(),
        })
    }

    pub fn pets(&self) -> Vec<PetView> {
        let mut pets: Vec<PetView> = self
            .world
            .query::<(&PetId, &Position, &BoxSize, &PetState, &EmoteState, &Interaction)>()
            .iter()
            .map(|(entity, (id, pos, size, state, emote, interaction))| PetView {
                entity,
                id: id.0.clone(),
                position: pos.0,
                size: size.0,
                behavior: state.behavior,
                emote: emote.emote,
                held: interaction.is_held(),
            })
            .collect();
        pets.sort_by_key(|p| p.entity.id());
        pets
    }

    pub fn set_speed(&mut self, speed: f32) {
        if self.settings.set_speed(speed) {
            log::info!("Speed set to {:.2}x", self.settings.speed());
        }
    }

    pub fn apply_preset(&mut self, preset: SpeedPreset) {
        self.settings.apply_preset(preset);
        log::info!("Speed preset: {} ({:.2}x)", preset.label(), self.settings.speed());
    }

    /// Resizes every pet when the clamped value changes.
    pub fn set_scale(&mut self, scale: f32) {
        if self.settings.set_scale(scale) {
            pet::apply_scale(&mut self.world, &self.settings, &self.config);
            log::info!("Scale set to {:.2}x", self.settings.scale());
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.settings.set_opacity(opacity);
    }

    pub fn set_filter_enabled(&mut self, enabled: bool) {
        self.sprites.set_filter_enabled(enabled);
    }

    pub fn begin_drag(&mut self, entity: hecs::Entity) -> Result<(), PetError> {
        drag::begin_drag(&mut self.world, entity)
    }

    /// `delta` is the pointer travel since [`Simulation::begin_drag`].
    pub fn drag_by(
        &mut self,
        entity: hecs::Entity,
        delta: IVec2,
        bounds: Bounds,
    ) -> Result<bool, PetError> {
        drag::drag_by(&mut self.world, entity, delta, bounds)
    }

    pub fn end_drag(&mut self, entity: hecs::Entity) -> Result<(), PetError> {
        drag::end_drag(&mut self.world, entity)
    }

    pub fn set_menu_open(&mut self, entity: hecs::Entity, open: bool) -> Result<(), PetError> {
        drag::set_menu_open(&mut self.world, entity, open)
    }

    /// Run one tick against the host's current usable bounds.
    pub fn step(&mut self, bounds: Bounds) {
        systems::tick(
            &mut self.world,
            bounds,
            self.settings.speed(),
            &self.config,
            &mut self.rng,
            &mut self.colliders,
            &mut self.timers,
        );
        self.tick_count += 1;
    }

    /// Draw list for the current state. Pets whose sheet is still loading are
    /// left out.
    pub fn instances(&mut self) -> &[PetInstance] {
        self.timers.begin();
        render::build_instances(
            &self.world,
            &mut self.sprites,
            self.settings.opacity(),
            &mut self.instances,
        );
        self.timers.end(SystemPhase::BuildInstances);
        &self.instances
    }
}
