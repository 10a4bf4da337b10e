//! Physics simulation benchmark scenario.
//!
//! Simulates a physics-heavy workload with:
//! - 5,000 rigid bodies
//! - Position, Velocity, Acceleration integration
//! - Transform matrix updates
//!
//! This scenario tests:
//! - Compute-heavy component updates
//! - Several systems sharing the same members
//! - Multi-component access patterns

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::ecs::{Config, Coordinator, Entity, OrPanic, System};

use crate::components::{self, Acceleration, Position, Transform, Velocity};
use crate::scenarios::Scenario;

/// Configuration for the physics benchmark.
pub struct PhysicsConfig {
    /// Number of physics bodies.
    pub body_count: usize,
    /// Fixed timestep for physics integration.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            body_count: 5_000,
            delta_time: 1.0 / 120.0, // 120 Hz physics
            seed: 99999,
        }
    }
}

/// System: Integrate acceleration into velocity.
struct IntegrateAcceleration;

impl System for IntegrateAcceleration {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], dt: f32) {
        for &entity in entities {
            let accel = *coordinator.get_component::<Acceleration>(entity).or_panic();
            let vel = coordinator.get_component_mut::<Velocity>(entity).or_panic();
            vel.x += accel.x * dt;
            vel.y += accel.y * dt;
            vel.z += accel.z * dt;
        }
    }
}

/// System: Integrate velocity into position and bounce off the boundaries.
struct IntegrateVelocity;

impl System for IntegrateVelocity {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], dt: f32) {
        let bounds = 1000.0;
        for &entity in entities {
            let mut vel = *coordinator.get_component::<Velocity>(entity).or_panic();
            let pos = coordinator.get_component_mut::<Position>(entity).or_panic();
            pos.x += vel.x * dt;
            pos.y += vel.y * dt;
            pos.z += vel.z * dt;

            // Bounce off boundaries with some energy loss
            if pos.x.abs() > bounds {
                pos.x = pos.x.signum() * bounds;
                vel.x = -vel.x * 0.8;
            }
            if pos.y.abs() > bounds {
                pos.y = pos.y.signum() * bounds;
                vel.y = -vel.y * 0.8;
            }
            if pos.z.abs() > bounds {
                pos.z = pos.z.signum() * bounds;
                vel.z = -vel.z * 0.8;
            }
            *coordinator.get_component_mut::<Velocity>(entity).or_panic() = vel;
        }
    }
}

/// System: Update transform matrices from position.
struct UpdateTransforms;

impl System for UpdateTransforms {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], _dt: f32) {
        for &entity in entities {
            let pos = *coordinator.get_component::<Position>(entity).or_panic();
            let transform = coordinator.get_component_mut::<Transform>(entity).or_panic();
            transform.matrix[0][3] = pos.x;
            transform.matrix[1][3] = pos.y;
            transform.matrix[2][3] = pos.z;

            let scale = 1.0
                / (transform.matrix[0][0] * transform.matrix[0][0]
                    + transform.matrix[1][1] * transform.matrix[1][1]
                    + transform.matrix[2][2] * transform.matrix[2][2])
                    .sqrt();

            transform.matrix[0][0] *= scale;
            transform.matrix[1][1] *= scale;
            transform.matrix[2][2] *= scale;
        }
    }
}

/// Physics simulation benchmark scenario.
pub struct PhysicsScenario {
    config: PhysicsConfig,
    coordinator: Coordinator,
    rng: ChaCha8Rng,
    bodies: Vec<Entity>,
}

impl PhysicsScenario {
    /// Create a new physics scenario with default config.
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics scenario with custom config.
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            coordinator: Coordinator::new(Config::default().with_max_entities(config.body_count)),
            bodies: Vec::new(),
            config,
        }
    }

    fn spawn_body(&mut self) -> Entity {
        let pos = Position {
            x: self.rng.gen_range(-1000.0..1000.0),
            y: self.rng.gen_range(-1000.0..1000.0),
            z: self.rng.gen_range(-1000.0..1000.0),
        };
        let vel = Velocity {
            x: self.rng.gen_range(-10.0..10.0),
            y: self.rng.gen_range(-10.0..10.0),
            z: self.rng.gen_range(-10.0..10.0),
        };
        let accel = Acceleration {
            x: 0.0,
            y: -9.81, // Gravity
            z: 0.0,
        };

        let coordinator = &mut self.coordinator;
        let entity = coordinator.create_entity().or_panic();
        coordinator.add_component(entity, pos).or_panic();
        coordinator.add_component(entity, vel).or_panic();
        coordinator.add_component(entity, accel).or_panic();
        coordinator.add_component(entity, Transform::default()).or_panic();
        entity
    }

    /// Current body count.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn bodies(&self) -> &[Entity] {
        &self.bodies
    }
}

impl Default for PhysicsScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for PhysicsScenario {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn description(&self) -> &'static str {
        "Physics simulation with acceleration/velocity integration and transforms"
    }

    fn entity_count(&self) -> usize {
        self.config.body_count
    }

    fn setup(&mut self) {
        components::register_all(&mut self.coordinator);

        let coordinator = &mut self.coordinator;
        coordinator.register_system(IntegrateAcceleration).or_panic();
        let required = coordinator
            .signature_of::<(Acceleration, Velocity)>()
            .or_panic();
        coordinator
            .set_system_signature::<IntegrateAcceleration>(required)
            .or_panic();

        coordinator.register_system(IntegrateVelocity).or_panic();
        let required = coordinator.signature_of::<(Velocity, Position)>().or_panic();
        coordinator
            .set_system_signature::<IntegrateVelocity>(required)
            .or_panic();

        coordinator.register_system(UpdateTransforms).or_panic();
        let required = coordinator.signature_of::<(Position, Transform)>().or_panic();
        coordinator
            .set_system_signature::<UpdateTransforms>(required)
            .or_panic();

        self.bodies = Vec::with_capacity(self.config.body_count);
        for _ in 0..self.config.body_count {
            let entity = self.spawn_body();
            self.bodies.push(entity);
        }
    }

    fn update(&mut self) {
        let dt = self.config.delta_time;
        let coordinator = &mut self.coordinator;
        coordinator.update_system::<IntegrateAcceleration>(dt).or_panic();
        coordinator.update_system::<IntegrateVelocity>(dt).or_panic();
        coordinator.update_system::<UpdateTransforms>(dt).or_panic();
    }

    fn teardown(&mut self) {
        for entity in self.bodies.drain(..) {
            self.coordinator.destroy_entity(entity);
        }
        self.coordinator.flush_destroyed_entities().or_panic();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physics_scenario_setup() {
        let mut scenario = PhysicsScenario::with_config(PhysicsConfig {
            body_count: 100,
            ..Default::default()
        });

        scenario.setup();
        assert_eq!(scenario.body_count(), 100);

        scenario.teardown();
        assert_eq!(scenario.body_count(), 0);
        assert_eq!(scenario.coordinator().entity_count(), 0);
    }

    #[test]
    fn physics_scenario_update() {
        let mut scenario = PhysicsScenario::with_config(PhysicsConfig {
            body_count: 100,
            ..Default::default()
        });

        scenario.setup();
        let mean_vy = |scenario: &PhysicsScenario| {
            let column = scenario.coordinator().column::<Velocity>().unwrap();
            column.values().iter().map(|v| v.y).sum::<f32>() / column.len() as f32
        };
        let start = mean_vy(&scenario);

        // Run physics for a few frames
        for _ in 0..60 {
            scenario.update();
        }

        // Half a second of gravity, give or take the odd bounce
        assert!(mean_vy(&scenario) < start - 4.0);
        assert_eq!(scenario.body_count(), 100);
        scenario.teardown();
    }
}
