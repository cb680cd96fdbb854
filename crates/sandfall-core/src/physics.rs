//! Rigid body physics backend
//!
//! The collider synthesizer only needs three capabilities from a physics
//! engine, expressed by [`PhysicsBackend`]. [`RapierPhysics`] provides them on
//! top of rapier2d and also owns the fixed-step pipeline the level advances
//! in lockstep with the pixel grid.

use glam::{IVec2, Vec2};
use rapier2d::prelude::*;

/// Pixels per physics metre, shared by every coordinate conversion
pub const PIXELS_PER_METRE: f32 = 16.0;

/// Convert a pixel-space position into physics space
pub fn pixel_to_physics(pos: Vec2) -> Vec2 {
    pos / PIXELS_PER_METRE
}

/// Convert a physics-space position back into pixel space
pub fn physics_to_pixel(pos: Vec2) -> Vec2 {
    pos * PIXELS_PER_METRE
}

/// What the collider synthesizer needs from a rigid body engine
pub trait PhysicsBackend {
    type Body: Copy;

    /// Create a static body at the physics origin
    fn create_static_body(&mut self) -> Self::Body;

    /// Attach a closed chain through `points` (physics space) to `body`
    fn create_closed_chain(&mut self, body: Self::Body, points: &[Vec2]);

    /// Destroy `body` together with every collider attached to it
    fn destroy_body(&mut self, body: Self::Body);
}

/// Manages the rapier2d physics world
pub struct RapierPhysics {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    /// In m/s², +y pointing down like pixel space
    gravity: Vec2,
}

impl RapierPhysics {
    pub fn new(time_step: f32, gravity: Vec2) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: time_step,
            ..Default::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            gravity,
        }
    }

    /// Advance the simulation by one fixed time step
    pub fn step(&mut self) {
        let gravity = vector![self.gravity.x, self.gravity.y];
        let physics_hooks = ();
        let event_handler = ();

        self.pipeline.step(
            &gravity,
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
            &physics_hooks,
            &event_handler,
        );
    }

    /// Drop a dynamic ball into the world, in pixel coordinates
    ///
    /// Lets the host exercise the synthesized terrain.
    pub fn spawn_ball(&mut self, pos: IVec2, radius_pixels: f32) -> RigidBodyHandle {
        let centre = pixel_to_physics(pos.as_vec2());
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![centre.x, centre.y])
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::ball(radius_pixels / PIXELS_PER_METRE)
            .friction(1.0)
            .restitution(0.1)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        log::debug!("Physics: spawned ball {:?} at {}", handle, pos);
        handle
    }

    /// Position of a body in pixel coordinates
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let translation = body.translation();
            physics_to_pixel(Vec2::new(translation.x, translation.y))
        })
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }
}

impl Default for RapierPhysics {
    fn default() -> Self {
        Self::new(1.0 / 60.0, Vec2::new(0.0, 9.81))
    }
}

impl PhysicsBackend for RapierPhysics {
    type Body = RigidBodyHandle;

    fn create_static_body(&mut self) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().build();
        self.rigid_body_set.insert(body)
    }

    fn create_closed_chain(&mut self, body: RigidBodyHandle, points: &[Vec2]) {
        let vertices: Vec<Point<Real>> = points.iter().map(|p| point![p.x, p.y]).collect();
        let count = vertices.len() as u32;
        let indices: Vec<[u32; 2]> = (0..count).map(|i| [i, (i + 1) % count]).collect();

        let collider = ColliderBuilder::polyline(vertices, Some(indices))
            .friction(1.0)
            .build();
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set);
    }

    fn destroy_body(&mut self, body: RigidBodyHandle) {
        self.rigid_body_set.remove(
            body,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }
}
