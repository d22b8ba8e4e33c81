//! Retry orchestration around placement passes
//!
//! The outer loop draws a random role graph; the inner loop rebuilds that
//! graph's placement from an empty registry until a pass completes or the
//! rebuild budget runs out. Only running out of both budgets is reported.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use log::{debug, error, info, warn};

use super::blueprint::{BlueprintCatalogue, RoomBlueprint};
use super::errors::GenerationError;
use super::graph::RoomRoleGraph;
use super::observer::RoomObserver;
use super::placement::{PassOutcome, PlacementPass};
use super::registry::DungeonRegistry;
use super::room::PlacedRoom;
use crate::config::GenerationConfig;
use crate::level::LevelDefinition;
use crate::rng::LayoutRng;

/// Summary of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Name of the role graph that was laid out
    pub graph_name: String,
    /// Index of that graph in the level's candidate list
    pub graph_index: usize,
    /// Graphs drawn, including the successful one
    pub outer_attempts: u32,
    /// Placement passes run in total
    pub passes: u32,
    pub rooms: usize,
}

/// Owns the blueprint catalogue and the registry of one level.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    config: GenerationConfig,
    catalogue: BlueprintCatalogue,
    registry: DungeonRegistry,
}

impl DungeonGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            catalogue: BlueprintCatalogue::new(),
            registry: DungeonRegistry::new(),
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GenerationConfig) {
        self.config = config;
    }

    pub fn catalogue(&self) -> &BlueprintCatalogue {
        &self.catalogue
    }

    pub fn registry(&self) -> &DungeonRegistry {
        &self.registry
    }

    /// Placed room by role-graph node id
    pub fn room_by_id(&self, id: &str) -> Option<&PlacedRoom> {
        self.registry.get(id)
    }

    /// Blueprint by guid
    pub fn room_template(&self, guid: &str) -> Option<&RoomBlueprint> {
        self.catalogue.get(guid)
    }

    /// Room the player starts in
    pub fn current_room(&self) -> Option<&PlacedRoom> {
        self.registry.current_room()
    }

    /// Replace the catalogue with the blueprints of a new level
    pub fn load_blueprints(&mut self, blueprints: &[RoomBlueprint]) {
        self.catalogue = BlueprintCatalogue::from_blueprints(blueprints.iter().cloned());
        debug!("loaded {} room blueprints", self.catalogue.len());
    }

    /// Discard the current layout, notifying the observer for rooms it had
    /// already materialised.
    pub fn clear(&mut self, observer: &mut dyn RoomObserver) {
        self.registry.clear(observer);
    }

    /// Load the level's blueprints and lay out one of its role graphs.
    ///
    /// On success the registry holds every placed room and the observer has
    /// seen `current_room_changed` once followed by one `room_instantiated`
    /// per room. On failure the registry is empty.
    pub fn generate(
        &mut self,
        level: &LevelDefinition,
        rng: &mut LayoutRng,
        observer: &mut dyn RoomObserver,
    ) -> Result<GenerationReport, GenerationError> {
        self.load_blueprints(&level.blueprints);
        self.generate_from_graphs(&level.role_graphs, rng, observer)
    }

    /// Lay out one of `graphs` with the already loaded catalogue
    pub fn generate_from_graphs(
        &mut self,
        graphs: &[RoomRoleGraph],
        rng: &mut LayoutRng,
        observer: &mut dyn RoomObserver,
    ) -> Result<GenerationReport, GenerationError> {
        self.registry.clear(observer);
        self.config.validate()?;

        if graphs.is_empty() {
            error!("cannot build dungeon: no room role graphs");
            return Err(GenerationError::NoRoleGraphs);
        }

        let passes_per_graph = self.config.passes_per_graph();
        let mut passes = 0u32;

        for outer in 1..=self.config.max_dungeon_build_attempts {
            let Some(graph_index) = rng.choose_index(graphs.len()) else {
                return Err(GenerationError::NoRoleGraphs);
            };
            let graph = &graphs[graph_index];
            if let Err(e) = graph.validate() {
                warn!("role graph '{}' failed validation: {}", graph.name, e);
            }

            for _ in 0..passes_per_graph {
                self.registry.clear(observer);
                passes += 1;

                match PlacementPass::new(graph, &self.catalogue).run(&mut self.registry, rng) {
                    PassOutcome::Complete => {
                        self.instantiate(observer);
                        info!(
                            "built dungeon from graph '{}' with {} rooms after {} pass(es)",
                            graph.name,
                            self.registry.len(),
                            passes
                        );
                        return Ok(GenerationReport {
                            graph_name: graph.name.clone(),
                            graph_index,
                            outer_attempts: outer,
                            passes,
                            rooms: self.registry.len(),
                        });
                    }
                    PassOutcome::Backtrack { id } => {
                        debug!("pass {} on graph '{}' could not place '{}'", passes, graph.name, id);
                    }
                    PassOutcome::Integrity(e) => {
                        error!("pass {} on graph '{}' aborted: {}", passes, graph.name, e);
                    }
                }
            }
        }

        self.registry.clear(observer);
        let outer_attempts = self.config.max_dungeon_build_attempts;
        info!(
            "no dungeon layout found after {} graph attempt(s) and {} pass(es)",
            outer_attempts, passes
        );
        Err(GenerationError::ExhaustedRetryBudget { outer_attempts, passes })
    }

    /// Hand the finished layout to the observer
    fn instantiate(&mut self, observer: &mut dyn RoomObserver) {
        if let Some(room) = self.registry.current_room() {
            observer.current_room_changed(room);
        }
        for room in self.registry.iter_mut() {
            observer.room_instantiated(room);
            room.is_instantiated = true;
        }
    }
}

/// Check whether `level` can be laid out within the budgets of `config`.
///
/// Only a feasibility check: the layout found on success is discarded along
/// with its generator, and the observer sees it instantiated and destroyed.
/// Use [`DungeonGenerator::generate`] to keep the rooms.
pub fn generate_dungeon(
    level: &LevelDefinition,
    config: GenerationConfig,
    rng: &mut LayoutRng,
    observer: &mut dyn RoomObserver,
) -> bool {
    let mut generator = DungeonGenerator::new(config);
    let feasible = generator.generate(level, rng, observer).is_ok();
    generator.clear(observer);
    feasible
}
