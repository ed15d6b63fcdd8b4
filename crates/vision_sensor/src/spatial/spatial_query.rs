//! Abstract spatial query interface for the sensor's broad phase
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.2:
//! "Spatial partitioning schemes... allow us to quickly cull out pairs of
//! objects that cannot possibly be colliding."
//!
//! This abstraction allows swapping different spatial partitioning schemes
//! (octree, grid, the host engine's own physics scene) without changing the
//! sensor.

use crate::ecs::Entity;
use crate::error::CollaboratorError;
use crate::foundation::math::Vec3;
use crate::physics::collision_layers::LayerMask;
use crate::sensor::candidates::CandidateBuffer;
use crate::spatial::{Octree, OctreeEntity};
use std::collections::HashMap;

/// Whether overlap queries report trigger colliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryTriggerInteraction {
    /// Triggers are reported like solid colliders
    #[default]
    Collide,
    /// Triggers are skipped
    Ignore,
}

/// Bounded-radius overlap query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereQuery {
    /// Query center
    pub origin: Vec3,
    /// Query radius
    pub radius: f32,
    /// Only entities on one of these layers are reported
    pub layers: LayerMask,
    /// Trigger handling
    pub triggers: QueryTriggerInteraction,
}

/// One spatial query hit: an entity handle and where it is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Host entity handle
    pub entity: Entity,
    /// World-space position at query time
    pub position: Vec3,
}

impl Candidate {
    /// Create a candidate
    pub fn new(entity: Entity, position: Vec3) -> Self {
        Self { entity, position }
    }
}

/// Broad-phase collaborator used by the sensor
pub trait SpatialIndex {
    /// Push every entity overlapping `query` into `hits`
    ///
    /// `hits` is already cleared. Implementations push in their natural
    /// order and may stop once [`CandidateBuffer::is_full`] returns true;
    /// results beyond capacity are dropped by the buffer anyway.
    fn query_within_radius(&self, query: &SphereQuery, hits: &mut CandidateBuffer) -> Result<(), CollaboratorError>;
}

/// Octree-based implementation of [`SpatialIndex`]
///
/// Wraps [`Octree`] with an entity cache so moving entities can be updated
/// by handle.
#[derive(Debug, Clone)]
pub struct OctreeSpatialIndex {
    octree: Octree,
    /// Cache of entity data for quick lookups
    entity_cache: HashMap<Entity, OctreeEntity>,
}

impl OctreeSpatialIndex {
    /// Create a new octree-based index
    pub fn new(octree: Octree) -> Self {
        Self {
            octree,
            entity_cache: HashMap::new(),
        }
    }

    /// Get a reference to the underlying octree (for visualization, etc.)
    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    /// Insert an entity; returns false if it lies outside the world bounds
    pub fn insert(&mut self, entity: OctreeEntity) -> bool {
        if self.entity_cache.contains_key(&entity.id) {
            self.remove(entity.id);
        }

        let inserted = self.octree.insert(entity);
        if inserted {
            self.entity_cache.insert(entity.id, entity);
        } else {
            log::warn!("Entity {} at {:?} is outside the spatial index bounds", entity.id, entity.position);
        }
        inserted
    }

    /// Remove an entity from the index
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.entity_cache.remove(&entity);
        self.octree.remove(entity).is_some()
    }

    /// Move an entity
    ///
    /// Octree requires remove + re-insert for updates. Unknown entities are
    /// ignored.
    pub fn update_position(&mut self, entity: Entity, position: Vec3) -> bool {
        match self.entity_cache.get(&entity).copied() {
            Some(mut data) => {
                data.position = position;
                self.insert(data)
            }
            None => false,
        }
    }

    /// Get entity's current data (if it exists)
    pub fn get_entity_data(&self, entity: Entity) -> Option<OctreeEntity> {
        self.entity_cache.get(&entity).copied()
    }

    /// Clear all entities
    pub fn clear(&mut self) {
        self.octree.clear();
        self.entity_cache.clear();
    }

    /// Get the number of entities in the structure
    pub fn entity_count(&self) -> usize {
        self.octree.entity_count()
    }
}

impl SpatialIndex for OctreeSpatialIndex {
    fn query_within_radius(&self, query: &SphereQuery, hits: &mut CandidateBuffer) -> Result<(), CollaboratorError> {
        self.octree.visit_radius(query.origin, query.radius, |entity| {
            if !query.layers.matches(entity.layer) {
                return;
            }
            if entity.is_trigger && query.triggers == QueryTriggerInteraction::Ignore {
                return;
            }
            hits.push(Candidate::new(entity.id, entity.position));
        });
        Ok(())
    }
}
