//! One placement pass over a role graph
//!
//! The pass walks the graph breadth-first from the entrance. Every non-entrance
//! node is attached to a free doorway of its (already placed) parent; failed
//! attempts strike that doorway off, so each parent runs out of options after
//! at most one try per doorway.
//!
//! A pass can be driven one room at a time with [`PlacementPass::step`] so an
//! embedder can spread the work over several frames, or eagerly with
//! [`PlacementPass::run`]. Dropping a pass half-way leaves a partial registry
//! behind; callers must clear it before exposing anything.

#[cfg(not(feature = "std"))]
use crate::compat::*;
#[cfg(feature = "std")]
use std::collections::VecDeque;

use log::debug;

use super::blueprint::{BlueprintCatalogue, RoomRole};
use super::doorway::{child_world_bounds, Direction};
use super::errors::{GraphIntegrityError, RegistryError};
use super::graph::{RoomRoleGraph, RoomRoleNode};
use super::rect::GridPos;
use super::registry::DungeonRegistry;
use super::room::PlacedRoom;
use crate::rng::LayoutRng;

/// How a finished pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Every reachable node was placed
    Complete,
    /// Node `id` could not be placed; the attempt has to be rebuilt
    Backtrack { id: String },
    /// The graph itself is malformed
    Integrity(GraphIntegrityError),
}

impl PassOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, PassOutcome::Complete)
    }
}

/// Result of a single [`PlacementPass::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassStep {
    /// Room `id` was placed and the pass continues
    Placed { id: String },
    Finished(PassOutcome),
}

/// Why one doorway attempt was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NoBlueprint(RoomRole),
    NoMatchingDoorway,
    Overlap,
    /// Placement would leave the `i32` coordinate range
    OutOfRange,
}

/// Breadth-first placement of one role graph into a registry
#[derive(Debug)]
pub struct PlacementPass<'a> {
    graph: &'a RoomRoleGraph,
    catalogue: &'a BlueprintCatalogue,
    open: VecDeque<&'a RoomRoleNode>,
    entrance_id: Option<&'a str>,
    started: bool,
    outcome: Option<PassOutcome>,
}

impl<'a> PlacementPass<'a> {
    pub fn new(graph: &'a RoomRoleGraph, catalogue: &'a BlueprintCatalogue) -> Self {
        Self {
            graph,
            catalogue,
            open: VecDeque::new(),
            entrance_id: None,
            started: false,
            outcome: None,
        }
    }

    /// Outcome once the pass has finished
    pub fn outcome(&self) -> Option<&PassOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Run the pass to completion
    pub fn run(mut self, registry: &mut DungeonRegistry, rng: &mut LayoutRng) -> PassOutcome {
        loop {
            if let PassStep::Finished(outcome) = self.step(registry, rng) {
                return outcome;
            }
        }
    }

    /// Place the next queued node. Once finished, keeps returning the same outcome.
    pub fn step(&mut self, registry: &mut DungeonRegistry, rng: &mut LayoutRng) -> PassStep {
        if let Some(outcome) = &self.outcome {
            return PassStep::Finished(outcome.clone());
        }

        let graph = self.graph;
        if !self.started {
            self.started = true;
            match graph.entrance() {
                Some(entrance) => {
                    self.entrance_id = Some(entrance.id.as_str());
                    self.open.push_back(entrance);
                }
                None => {
                    return self.finish(PassOutcome::Integrity(GraphIntegrityError::MissingEntrance {
                        graph: graph.name.clone(),
                    }));
                }
            }
        }

        let Some(node) = self.open.pop_front() else {
            return self.finish(PassOutcome::Complete);
        };

        if registry.contains(&node.id) {
            return self.finish(PassOutcome::Integrity(GraphIntegrityError::Revisited {
                id: node.id.clone(),
            }));
        }

        for child_id in &node.child_ids {
            match graph.node(child_id) {
                Some(child) => self.open.push_back(child),
                None => {
                    return self.finish(PassOutcome::Integrity(GraphIntegrityError::UnknownNode {
                        id: node.id.clone(),
                        missing: child_id.clone(),
                    }));
                }
            }
        }

        let result = if Some(node.id.as_str()) == self.entrance_id {
            place_entrance(node, self.catalogue, registry, rng)
        } else {
            let Some(parent_id) = node.parent_id() else {
                return self.finish(PassOutcome::Integrity(GraphIntegrityError::Orphan {
                    id: node.id.clone(),
                }));
            };
            if !registry.contains(parent_id) {
                return self.finish(PassOutcome::Integrity(GraphIntegrityError::ParentNotPlaced {
                    id: node.id.clone(),
                    parent: parent_id.to_string(),
                }));
            }
            place_against_parent(node, parent_id, self.catalogue, registry, rng)
        };

        match result {
            Ok(true) => PassStep::Placed { id: node.id.clone() },
            Ok(false) => self.finish(PassOutcome::Backtrack { id: node.id.clone() }),
            Err(RegistryError::DuplicateRoom(id)) => {
                self.finish(PassOutcome::Integrity(GraphIntegrityError::Revisited { id }))
            }
        }
    }

    fn finish(&mut self, outcome: PassOutcome) -> PassStep {
        self.open.clear();
        self.outcome = Some(outcome.clone());
        PassStep::Finished(outcome)
    }
}

/// Place the entrance at its blueprint-local coordinates.
///
/// The entrance becomes the current room.
pub fn place_entrance(
    node: &RoomRoleNode,
    catalogue: &BlueprintCatalogue,
    registry: &mut DungeonRegistry,
    rng: &mut LayoutRng,
) -> Result<bool, RegistryError> {
    let Some(blueprint) = catalogue.random_with_role(node.role, rng) else {
        debug!("no '{}' blueprint for entrance node '{}'", node.role, node.id);
        return Ok(false);
    };

    let mut room = PlacedRoom::from_blueprint(node, blueprint, blueprint.bounds());
    room.is_positioned = true;
    registry.insert(room)?;

    registry.set_current_room(&node.id);
    Ok(true)
}

/// Attach `node` to one of the free doorways of the placed room `parent_id`.
///
/// Returns `Ok(false)` once every doorway of the parent is connected or has
/// been struck off. Each rejected attempt strikes exactly one parent doorway.
pub fn place_against_parent(
    node: &RoomRoleNode,
    parent_id: &str,
    catalogue: &BlueprintCatalogue,
    registry: &mut DungeonRegistry,
    rng: &mut LayoutRng,
) -> Result<bool, RegistryError> {
    loop {
        let Some(parent) = registry.get(parent_id) else {
            return Ok(false);
        };
        let open = parent.available_doorways();
        let Some(&door_idx) = rng.choose(&open) else {
            debug!("room '{}' has no free doorway left for '{}'", parent_id, node.id);
            return Ok(false);
        };
        let facing = parent.doorways[door_idx].orientation;
        let attempt = match parent.doorway_world_position(door_idx) {
            Some(door_world) => candidate_room(node, catalogue, registry, rng, facing, door_world),
            None => Err(Rejection::OutOfRange),
        };

        match attempt {
            Ok((mut room, child_door_idx)) => {
                room.doorways[child_door_idx].mark_connected();
                room.is_positioned = true;
                registry.insert(room)?;
                if let Some(parent) = registry.get_mut(parent_id) {
                    parent.doorways[door_idx].mark_connected();
                }
                return Ok(true);
            }
            Err(rejection) => {
                debug!(
                    "'{}' rejected at {} doorway of '{}': {:?}",
                    node.id, facing, parent_id, rejection
                );
                if let Some(parent) = registry.get_mut(parent_id) {
                    parent.doorways[door_idx].mark_unavailable();
                }
            }
        }
    }
}

/// Pick a blueprint for `node` and position it against a parent doorway.
fn candidate_room(
    node: &RoomRoleNode,
    catalogue: &BlueprintCatalogue,
    registry: &DungeonRegistry,
    rng: &mut LayoutRng,
    facing: Direction,
    door_world: GridPos,
) -> Result<(PlacedRoom, usize), Rejection> {
    let role = node.role.blueprint_role_for(facing);
    let blueprint = catalogue
        .random_with_role(role, rng)
        .ok_or(Rejection::NoBlueprint(role))?;

    let child_door_idx = facing
        .opposite()
        .and_then(|wanted| blueprint.doorway_facing(wanted))
        .ok_or(Rejection::NoMatchingDoorway)?;

    let bounds = child_world_bounds(
        door_world,
        facing,
        blueprint.bounds(),
        blueprint.doorways[child_door_idx].position,
    )
    .ok_or(Rejection::OutOfRange)?;
    if registry.overlaps_any(&bounds) {
        return Err(Rejection::Overlap);
    }

    Ok((PlacedRoom::from_blueprint(node, blueprint, bounds), child_door_idx))
}
