//! Particle system benchmark scenario.
//!
//! Simulates a high-volume particle system with:
//! - 5,000 particles (the default entity universe)
//! - Simple components: Position, Velocity, Lifetime, Color
//! - Systems: movement, lifetime decay + fade, destruction of expired particles
//!
//! This scenario tests:
//! - Member iteration with per-entity component lookups
//! - Deferred destruction throughput (particles dying and being replaced every frame)
//! - Id recycling in the entity registry

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::ecs::{Config, Coordinator, Entity, OrPanic, System};

use crate::components::{self, Color, Lifetime, Position, Velocity};
use crate::scenarios::Scenario;

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Total number of particles to maintain.
    pub particle_count: usize,
    /// Simulated delta time per frame.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 5_000,
            delta_time: 1.0 / 60.0, // 60 FPS
            seed: 12345,
        }
    }
}

/// System: Update particle positions based on velocity.
struct Movement;

impl System for Movement {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], dt: f32) {
        for &entity in entities {
            let vel = *coordinator.get_component::<Velocity>(entity).or_panic();
            let pos = coordinator.get_component_mut::<Position>(entity).or_panic();
            pos.x += vel.x * dt;
            pos.y += vel.y * dt;
            pos.z += vel.z * dt;
        }
    }
}

/// System: Decay lifetimes, fade colors, and queue expired particles for destruction.
struct Decay;

impl System for Decay {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], dt: f32) {
        for &entity in entities {
            let lifetime = coordinator.get_component_mut::<Lifetime>(entity).or_panic();
            lifetime.remaining -= dt;
            let alpha = (lifetime.remaining / lifetime.total).max(0.0);
            let expired = lifetime.remaining <= 0.0;

            coordinator.get_component_mut::<Color>(entity).or_panic().a = alpha;
            if expired {
                coordinator.destroy_entity(entity);
            }
        }
    }
}

/// Particle system benchmark scenario.
pub struct ParticleScenario {
    config: ParticleConfig,
    coordinator: Coordinator,
    rng: ChaCha8Rng,
    /// Particles destroyed and replaced since setup.
    recycled: usize,
}

impl ParticleScenario {
    /// Create a new particle scenario with default config.
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    /// Create a new particle scenario with custom config.
    pub fn with_config(config: ParticleConfig) -> Self {
        let coordinator =
            Coordinator::new(Config::default().with_max_entities(config.particle_count));
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            coordinator,
            recycled: 0,
            config,
        }
    }

    fn spawn_particle(&mut self) -> Entity {
        let rng = &mut self.rng;
        let pos = Position {
            x: rng.gen_range(-100.0..100.0),
            y: rng.gen_range(-100.0..100.0),
            z: rng.gen_range(-100.0..100.0),
        };
        let vel = Velocity {
            x: rng.gen_range(-10.0..10.0),
            y: rng.gen_range(-10.0..10.0),
            z: rng.gen_range(-10.0..10.0),
        };
        let lifetime = Lifetime {
            remaining: rng.gen_range(0.1..2.0),
            total: 2.0,
        };
        let color = Color {
            r: rng.gen_range(0.0..1.0),
            g: rng.gen_range(0.0..1.0),
            b: rng.gen_range(0.0..1.0),
            a: 1.0,
        };

        let coordinator = &mut self.coordinator;
        let entity = coordinator.create_entity().or_panic();
        coordinator.add_component(entity, pos).or_panic();
        coordinator.add_component(entity, vel).or_panic();
        coordinator.add_component(entity, lifetime).or_panic();
        coordinator.add_component(entity, color).or_panic();
        entity
    }

    /// Current live particle count.
    pub fn particle_count(&self) -> usize {
        self.coordinator.entity_count()
    }

    /// Particles that expired and were replaced.
    pub fn recycled(&self) -> usize {
        self.recycled
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn description(&self) -> &'static str {
        "Particle churn with movement, lifetime decay and deferred destruction"
    }

    fn entity_count(&self) -> usize {
        self.config.particle_count
    }

    fn setup(&mut self) {
        components::register_all(&mut self.coordinator);

        self.coordinator.register_system(Movement).or_panic();
        let required = self
            .coordinator
            .signature_of::<(Position, Velocity)>()
            .or_panic();
        self.coordinator
            .set_system_signature::<Movement>(required)
            .or_panic();

        self.coordinator.register_system(Decay).or_panic();
        let required = self
            .coordinator
            .signature_of::<(Lifetime, Color)>()
            .or_panic();
        self.coordinator
            .set_system_signature::<Decay>(required)
            .or_panic();

        for _ in 0..self.config.particle_count {
            self.spawn_particle();
        }
    }

    fn update(&mut self) {
        let dt = self.config.delta_time;
        self.coordinator.update_system::<Movement>(dt).or_panic();
        self.coordinator.update_system::<Decay>(dt).or_panic();

        let expired = self.coordinator.flush_destroyed_entities().or_panic();
        for _ in 0..expired {
            self.spawn_particle();
        }
        self.recycled += expired;
    }

    fn teardown(&mut self) {
        self.coordinator.destroy_all_entities().or_panic();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_scenario_setup() {
        let mut scenario = ParticleScenario::with_config(ParticleConfig {
            particle_count: 100,
            ..Default::default()
        });

        scenario.setup();
        assert_eq!(scenario.particle_count(), 100);
        assert_eq!(
            scenario
                .coordinator()
                .system_entities::<Movement>()
                .unwrap()
                .len(),
            100
        );

        scenario.teardown();
        assert_eq!(scenario.particle_count(), 0);
    }

    #[test]
    fn particle_count_holds_through_churn() {
        let mut scenario = ParticleScenario::with_config(ParticleConfig {
            particle_count: 100,
            ..Default::default()
        });
        scenario.setup();

        // Lifetimes are at most 2s, so three seconds of frames recycles particles
        for _ in 0..180 {
            scenario.update();
            assert_eq!(scenario.particle_count(), 100);
        }

        assert!(scenario.recycled() >= 100);
        assert_eq!(
            scenario.coordinator().system_entities::<Decay>().unwrap().len(),
            100
        );
    }
}
