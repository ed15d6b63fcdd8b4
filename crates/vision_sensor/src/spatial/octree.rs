//! Octree spatial partitioning structure
//!
//! Efficiently divides 3D space into hierarchical regions for fast
//! bounded-radius queries. Each node subdivides into 8 octants when entity
//! density exceeds a threshold.
//!
//! Traversal is depth-first in fixed octant order, so two queries over an
//! unchanged tree visit entities in the same order.

use crate::ecs::Entity;
use crate::foundation::math::Vec3;
use crate::physics::collision::BoundingSphere;
use crate::physics::collision_layers::LayerMask;
use crate::spatial::AABB;

/// Configuration for octree behavior
#[derive(Debug, Clone)]
pub struct OctreeConfig {
    /// Maximum entities per node before subdivision
    pub max_entities_per_node: usize,

    /// Maximum subdivision depth
    pub max_depth: u32,

    /// Minimum node size (prevents excessive subdivision)
    pub min_node_size: f32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_entities_per_node: 8,
            max_depth: 8,
            min_node_size: 1.0,
        }
    }
}

/// Entity stored in octree with position, bounding radius and layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeEntity {
    /// Host entity handle
    pub id: Entity,
    /// World-space center
    pub position: Vec3,
    /// Bounding sphere radius
    pub radius: f32,
    /// Layer the entity's collider lives on
    pub layer: LayerMask,
    /// Trigger colliders can be skipped by queries
    pub is_trigger: bool,
}

impl OctreeEntity {
    /// Bounding sphere of the entity
    pub fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.radius)
    }
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// World-space bounds of this node
    pub bounds: AABB,

    /// Entities contained in this node (if leaf)
    pub entities: Vec<OctreeEntity>,

    /// Child nodes (8 octants), None if this is a leaf
    pub children: Option<Box<[OctreeNode; 8]>>,

    /// Depth in the tree (0 = root)
    pub depth: u32,
}

impl OctreeNode {
    /// Create a new leaf node
    pub fn new(bounds: AABB, depth: u32) -> Self {
        Self {
            bounds,
            entities: Vec::new(),
            children: None,
            depth,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Get the octant index (0-7) for a position within this node's bounds
    fn octant_index(&self, position: Vec3) -> usize {
        let center = self.bounds.center();
        let x_bit = usize::from(position.x >= center.x);
        let y_bit = usize::from(position.y >= center.y);
        let z_bit = usize::from(position.z >= center.z);

        // 0: -X -Y -Z ... 7: +X +Y +Z
        (z_bit << 2) | (y_bit << 1) | x_bit
    }

    /// Subdivide this node into 8 children
    fn subdivide(&mut self) {
        if self.children.is_some() {
            return;
        }

        let center = self.bounds.center();
        let quarter_extents = self.bounds.extents() * 0.5;
        let depth = self.depth + 1;

        let children: [OctreeNode; 8] = std::array::from_fn(|octant| {
            let x_sign = if octant & 1 != 0 { 1.0 } else { -1.0 };
            let y_sign = if octant & 2 != 0 { 1.0 } else { -1.0 };
            let z_sign = if octant & 4 != 0 { 1.0 } else { -1.0 };

            let child_center = Vec3::new(
                center.x + quarter_extents.x * x_sign,
                center.y + quarter_extents.y * y_sign,
                center.z + quarter_extents.z * z_sign,
            );

            OctreeNode::new(AABB::from_center_extents(child_center, quarter_extents), depth)
        });

        let mut children = Box::new(children);

        // Redistribute existing entities to children
        for entity in std::mem::take(&mut self.entities) {
            let octant = self.octant_index(entity.position);
            children[octant].entities.push(entity);
        }

        self.children = Some(children);
    }

    /// Insert an entity into this node
    pub fn insert(&mut self, entity: OctreeEntity, config: &OctreeConfig) -> bool {
        if !self.bounds.contains_point(entity.position) {
            return false;
        }

        if self.is_leaf() {
            let should_subdivide = self.entities.len() >= config.max_entities_per_node
                && self.depth < config.max_depth
                && self.bounds.extents().x > config.min_node_size;

            if !should_subdivide {
                self.entities.push(entity);
                return true;
            }

            self.subdivide();
        }

        let octant = self.octant_index(entity.position);
        match self.children {
            Some(ref mut children) => children[octant].insert(entity, config),
            None => false,
        }
    }

    /// Remove an entity from this node
    pub fn remove(&mut self, entity_id: Entity) -> Option<OctreeEntity> {
        if let Some(index) = self.entities.iter().position(|e| e.id == entity_id) {
            // Keep insertion order so query order stays stable
            return Some(self.entities.remove(index));
        }

        if let Some(ref mut children) = self.children {
            for child in children.iter_mut() {
                if let Some(removed) = child.remove(entity_id) {
                    return Some(removed);
                }
            }
        }

        None
    }

    /// Visit every entity whose bounding sphere overlaps the query sphere
    pub fn visit_radius<F>(&self, query: &BoundingSphere, max_entity_radius: f32, visit: &mut F)
    where
        F: FnMut(&OctreeEntity),
    {
        // Entities are stored by center, so widen the node test by the
        // largest radius any of them can have
        if !self.bounds.intersects_sphere(query.center, query.radius + max_entity_radius) {
            return;
        }

        for entity in &self.entities {
            if query.intersects(&entity.bounds()) {
                visit(entity);
            }
        }

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.visit_radius(query, max_entity_radius, visit);
            }
        }
    }

    /// Find an entity in this node or its children
    pub fn find_entity(&self, entity_id: Entity) -> Option<OctreeEntity> {
        if let Some(entity) = self.entities.iter().find(|e| e.id == entity_id) {
            return Some(*entity);
        }

        self.children
            .as_ref()
            .and_then(|children| children.iter().find_map(|child| child.find_entity(entity_id)))
    }

    /// Count total entities in this node and all children
    pub fn count_entities(&self) -> usize {
        let mut count = self.entities.len();

        if let Some(ref children) = self.children {
            for child in children.iter() {
                count += child.count_entities();
            }
        }

        count
    }
}

/// Octree spatial partitioning structure
#[derive(Debug, Clone)]
pub struct Octree {
    /// Root node containing the entire world space
    pub root: OctreeNode,

    config: OctreeConfig,

    /// Largest entity radius ever inserted (never shrinks on remove)
    max_entity_radius: f32,
}

impl Octree {
    /// Create a new octree with given world bounds
    pub fn new(world_bounds: AABB, config: OctreeConfig) -> Self {
        Self {
            root: OctreeNode::new(world_bounds, 0),
            config,
            max_entity_radius: 0.0,
        }
    }

    /// Insert an entity; returns false if its center is outside the world bounds
    pub fn insert(&mut self, entity: OctreeEntity) -> bool {
        if entity.radius > self.max_entity_radius {
            self.max_entity_radius = entity.radius;
        }

        self.root.insert(entity, &self.config)
    }

    /// Remove an entity from the octree
    pub fn remove(&mut self, entity_id: Entity) -> Option<OctreeEntity> {
        self.root.remove(entity_id)
    }

    /// Visit all entities overlapping a sphere, in deterministic order
    pub fn visit_radius<F>(&self, center: Vec3, radius: f32, mut visit: F)
    where
        F: FnMut(&OctreeEntity),
    {
        let query = BoundingSphere::new(center, radius);
        self.root.visit_radius(&query, self.max_entity_radius, &mut visit);
    }

    /// Collect all entities overlapping a sphere
    pub fn query_radius(&self, center: Vec3, radius: f32) -> Vec<OctreeEntity> {
        let mut results = Vec::new();
        self.visit_radius(center, radius, |entity| results.push(*entity));
        results
    }

    /// Find an entity in the octree and return its data
    pub fn find_entity(&self, entity_id: Entity) -> Option<OctreeEntity> {
        self.root.find_entity(entity_id)
    }

    /// Get total entity count
    pub fn entity_count(&self) -> usize {
        self.root.count_entities()
    }

    /// World bounds covered by the tree
    pub fn bounds(&self) -> AABB {
        self.root.bounds
    }

    /// Clear the octree
    pub fn clear(&mut self) {
        self.root = OctreeNode::new(self.root.bounds, 0);
        self.max_entity_radius = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_bounds() -> AABB {
        AABB::new(Vec3::new(-100.0, -100.0, -100.0), Vec3::new(100.0, 100.0, 100.0))
    }

    fn entry(id: u32, position: Vec3, radius: f32) -> OctreeEntity {
        OctreeEntity {
            id: Entity::new(id),
            position,
            radius,
            layer: LayerMask::DEFAULT,
            is_trigger: false,
        }
    }

    #[test]
    fn test_octree_basic_insertion() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());

        assert!(octree.insert(entry(0, Vec3::zeros(), 1.0)));
        assert_eq!(octree.entity_count(), 1);
    }

    #[test]
    fn test_insert_outside_bounds_fails() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());
        assert!(!octree.insert(entry(0, Vec3::new(500.0, 0.0, 0.0), 1.0)));
        assert_eq!(octree.entity_count(), 0);
    }

    #[test]
    fn test_octree_subdivision() {
        let config = OctreeConfig {
            max_entities_per_node: 4,
            max_depth: 3,
            min_node_size: 1.0,
        };
        let mut octree = Octree::new(world_bounds(), config);

        // Same position forces subdivision down to max depth
        for id in 0..10 {
            octree.insert(entry(id, Vec3::zeros(), 1.0));
        }

        assert_eq!(octree.entity_count(), 10);
        assert!(octree.root.children.is_some());
    }

    #[test]
    fn test_octree_radius_query() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());

        octree.insert(entry(1, Vec3::new(0.0, 0.0, 0.0), 1.0));
        octree.insert(entry(2, Vec3::new(5.0, 0.0, 0.0), 1.0));
        octree.insert(entry(3, Vec3::new(50.0, 0.0, 0.0), 1.0));

        let results = octree.query_radius(Vec3::zeros(), 10.0);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_radius_query_counts_entity_bounds() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());

        // Center at 11 but bounding radius reaches into the 10m query
        octree.insert(entry(1, Vec3::new(11.0, 0.0, 0.0), 1.5));
        octree.insert(entry(2, Vec3::new(12.0, 0.0, 0.0), 1.5));

        let ids: Vec<u32> = octree.query_radius(Vec3::zeros(), 10.0).iter().map(|e| e.id.id()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_query_order_is_stable() {
        let config = OctreeConfig {
            max_entities_per_node: 2,
            ..OctreeConfig::default()
        };
        let mut octree = Octree::new(world_bounds(), config);
        for id in 0..20 {
            let angle = id as f32 * 0.7;
            octree.insert(entry(id, Vec3::new(angle.cos() * 6.0, 0.0, angle.sin() * 6.0), 0.5));
        }

        let first = octree.query_radius(Vec3::zeros(), 8.0);
        let second = octree.query_radius(Vec3::zeros(), 8.0);
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
    }

    #[test]
    fn test_remove_returns_entry() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());
        octree.insert(entry(7, Vec3::new(1.0, 2.0, 3.0), 0.5));

        let removed = octree.remove(Entity::new(7)).expect("entity was inserted");
        assert_eq!(removed.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(octree.find_entity(Entity::new(7)).is_none());
        assert!(octree.remove(Entity::new(7)).is_none());
    }
}
