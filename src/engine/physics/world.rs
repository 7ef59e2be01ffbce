use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for the ground probes
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,

    /// User data mapping from handles to game entity IDs
    body_to_entity: HashMap<RigidBodyHandle, u64>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            body_to_entity: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous step's collision events
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Refresh the query pipeline without stepping the simulation
    ///
    /// The ground probes read from the query pipeline, which is normally
    /// refreshed by `step`. Call this after inserting bodies when probes
    /// must see them before the first step.
    pub fn update_queries(&mut self) {
        self.query_pipeline
            .update(&self.rigid_body_set, &self.collider_set);
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
        self.body_to_entity.remove(&handle);
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Get a mutable reference to a collider
    pub fn get_collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.collider_set.get_mut(handle)
    }

    /// Get the current world-space bounding box of a collider
    pub fn collider_aabb(&self, handle: ColliderHandle) -> Option<Aabb> {
        self.collider_set.get(handle).map(|c| c.compute_aabb())
    }

    /// Enable or disable a collider's collision response
    ///
    /// Disabled colliders stop blocking, stop generating contacts and are
    /// ignored by probes; the owning body keeps simulating.
    pub fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_enabled(enabled);
        }
    }

    /// Get the rigid body a collider is attached to
    pub fn body_of_collider(&self, handle: ColliderHandle) -> Option<RigidBodyHandle> {
        self.collider_set.get(handle).and_then(|c| c.parent())
    }

    /// Associate a game entity ID with a rigid body
    pub fn set_entity_mapping(&mut self, body_handle: RigidBodyHandle, entity_id: u64) {
        self.body_to_entity.insert(body_handle, entity_id);
    }

    /// Get the entity ID associated with a rigid body
    pub fn get_entity_id(&self, body_handle: RigidBodyHandle) -> Option<u64> {
        self.body_to_entity.get(&body_handle).copied()
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], ray_dir);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Get all collision events from this step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Set gravity for the physics world
    pub fn set_gravity(&mut self, gravity: Vector<Real>) {
        self.gravity = gravity;
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use crate::engine::physics::CollisionLayer;

    #[test]
    fn test_raycast_hits_terrain() {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::terrain_body(0.0, -0.5));
        world.add_collider(presets::terrain_collider(10.0, 1.0), floor);
        world.update_queries();

        let hit = world.raycast(
            vector![0.0, 2.0],
            vector![0.0, -1.0],
            5.0,
            true,
            QueryFilter::default().groups(CollisionLayer::Terrain.probe_groups()),
        );

        assert!(hit.is_some());
        let (_, toi) = hit.unwrap();
        assert!((toi - 2.0).abs() < 1e-4, "floor top is 2 units below");
    }

    #[test]
    fn test_raycast_respects_layer_filter() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::character_body(0.0, 0.0));
        world.add_collider(presets::character_collider(1.0, 2.0), body);
        world.update_queries();

        // A terrain-only probe straight at a character must miss
        let hit = world.raycast(
            vector![0.0, 5.0],
            vector![0.0, -1.0],
            10.0,
            true,
            QueryFilter::default().groups(CollisionLayer::Terrain.probe_groups()),
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_disabled_collider_is_invisible_to_probes() {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::terrain_body(0.0, -0.5));
        let collider = world.add_collider(presets::terrain_collider(10.0, 1.0), floor);
        world.set_collider_enabled(collider, false);
        world.update_queries();

        let hit = world.raycast(
            vector![0.0, 2.0],
            vector![0.0, -1.0],
            5.0,
            true,
            QueryFilter::default().groups(CollisionLayer::Terrain.probe_groups()),
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_entity_mapping() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::character_body(0.0, 0.0));
        world.set_entity_mapping(body, 7);

        assert_eq!(world.get_entity_id(body), Some(7));
        world.remove_rigid_body(body);
        assert_eq!(world.get_entity_id(body), None);
    }

    #[test]
    fn test_body_of_collider() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::character_body(0.0, 0.0));
        let collider = world.add_collider(presets::character_collider(1.0, 2.0), body);

        assert_eq!(world.body_of_collider(collider), Some(body));
    }

    #[test]
    fn test_gravity_pulls_bodies_down() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::character_body(0.0, 10.0));
        world.add_collider(presets::character_collider(1.0, 2.0), body);

        for _ in 0..10 {
            world.step();
        }

        let vel = world.get_rigid_body(body).unwrap().linvel();
        assert!(vel.y < 0.0, "body should be falling");
    }
}
