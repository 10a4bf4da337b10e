//! Common component and event types used across benchmarks.
//!
//! These components are designed to be representative of real game components
//! in terms of size and access patterns.

use rusty_ecs::ecs::{Component, Coordinator, Entity, Event, OrPanic};

// =============================================================================
// Transform Components
// =============================================================================

/// 3D position component (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 3D velocity component (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 3D acceleration component (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 4x4 transformation matrix (64 bytes).
#[derive(Component, Clone, Copy, Debug)]
pub struct Transform {
    pub matrix: [[f32; 4]; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

// =============================================================================
// Game Entity Components
// =============================================================================

/// Health component for damageable entities.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

// =============================================================================
// Particle System Components
// =============================================================================

/// Particle lifetime tracking.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

/// RGBA color (16 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

// =============================================================================
// Events
// =============================================================================

/// Damage dealt to an entity.
#[derive(Event, Clone, Copy, Debug)]
pub struct Damage {
    pub target: Entity,
    pub amount: f32,
}

/// Damage listener: lower the target's Health, clamped at zero. Targets without Health are
/// ignored.
pub fn apply_damage(coordinator: &mut Coordinator, damage: &Damage) {
    if let Ok(health) = coordinator.get_component_mut::<Health>(damage.target) {
        health.current = (health.current - damage.amount).max(0.0);
    }
}

/// Register every component type above, in declaration order.
pub fn register_all(coordinator: &mut Coordinator) {
    coordinator.register_component::<Position>().or_panic();
    coordinator.register_component::<Velocity>().or_panic();
    coordinator.register_component::<Acceleration>().or_panic();
    coordinator.register_component::<Transform>().or_panic();
    coordinator.register_component::<Health>().or_panic();
    coordinator.register_component::<Lifetime>().or_panic();
    coordinator.register_component::<Color>().or_panic();
}

// =============================================================================
// Component Size Reference
// =============================================================================
