//! Scripted collaborators for scanner tests

use crate::ecs::Entity;
use crate::error::CollaboratorError;
use crate::foundation::math::Vec3;
use crate::physics::collision_layers::LayerMask;
use crate::physics::occlusion::OcclusionTest;
use crate::sensor::candidates::CandidateBuffer;
use crate::spatial::{Candidate, SpatialIndex, SphereQuery};
use std::cell::{Cell, RefCell};

/// Returns a fixed list of hits, ignoring the query
///
/// Can be switched into a failing state between scans.
#[derive(Default)]
pub struct ScriptedIndex {
    pub hits: Vec<Candidate>,
    pub failing: Cell<bool>,
    pub last_query: Cell<Option<SphereQuery>>,
}

impl ScriptedIndex {
    pub fn new(hits: Vec<Candidate>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    /// `count` hits spread along +Z in front of the origin
    pub fn in_a_row(count: u32) -> Self {
        let hits = (0..count)
            .map(|i| Candidate::new(Entity::new(i), Vec3::new(0.0, 0.5, 1.0 + i as f32 * 0.1)))
            .collect();
        Self::new(hits)
    }
}

impl SpatialIndex for ScriptedIndex {
    fn query_within_radius(&self, query: &SphereQuery, hits: &mut CandidateBuffer) -> Result<(), CollaboratorError> {
        self.last_query.set(Some(*query));
        if self.failing.get() {
            return Err(CollaboratorError::Unavailable("index rebuilding".into()));
        }
        for &hit in &self.hits {
            hits.push(hit);
        }
        Ok(())
    }
}

/// Occlusion test with a scripted answer per target position
#[derive(Default)]
pub struct ScriptedOcclusion {
    pub blocked_targets: Vec<Vec3>,
    pub failing: Cell<bool>,
    pub calls: RefCell<Vec<(Vec3, Vec3, LayerMask)>>,
}

impl ScriptedOcclusion {
    pub fn clear_sight() -> Self {
        Self::default()
    }

    pub fn blocking(targets: Vec<Vec3>) -> Self {
        Self {
            blocked_targets: targets,
            ..Self::default()
        }
    }
}

impl OcclusionTest for ScriptedOcclusion {
    fn line_is_blocked(&self, from: Vec3, to: Vec3, layers: LayerMask) -> Result<bool, CollaboratorError> {
        self.calls.borrow_mut().push((from, to, layers));
        if self.failing.get() {
            return Err(CollaboratorError::Failed("raycast backend lost".into()));
        }
        Ok(self.blocked_targets.contains(&to))
    }
}
