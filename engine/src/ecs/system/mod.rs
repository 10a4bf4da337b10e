//! Systems: logic selected by the components it requires.
//!
//! # Overview
//!
//! A system is any type implementing [`System`]. It is registered once with the
//! [`Coordinator`](crate::ecs::Coordinator), given a required [`Signature`](crate::ecs::Signature),
//! and from then on the system registry keeps its [`Members`] up to date: an entity is a member
//! exactly while its own signature carries every required component.
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::{Coordinator, Entity, System};
//!
//! #[derive(Default)]
//! struct Mover;
//!
//! impl System for Mover {
//!     fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], dt: f32) {
//!         for &entity in entities {
//!             let velocity = *coordinator.get_component::<Velocity>(entity).or_panic();
//!             let position = coordinator.get_component_mut::<Position>(entity).or_panic();
//!             position.x += velocity.dx * dt;
//!             position.y += velocity.dy * dt;
//!         }
//!     }
//! }
//!
//! coordinator.register_system(Mover)?;
//! let required = coordinator.signature_of::<(Position, Velocity)>()?;
//! coordinator.set_system_signature::<Mover>(required)?;
//!
//! // Once per tick, in whatever order the host chooses.
//! coordinator.update_system::<Mover>(dt)?;
//! ```
//!
//! # Running
//!
//! While a system is being updated it is taken out of the registry, so it can be handed the
//! coordinator mutably. Its membership keeps tracking structural changes during that time; the
//! `entities` slice it receives is the membership as of the start of the update.

mod members;
mod registry;

use std::any::Any;

use crate::ecs::{Coordinator, entity::Entity};

pub use members::Members;
pub use registry::Registry;

/// A unit of logic driven once per tick by the host.
pub trait System: 'static {
    /// Advance the system by `delta_time` seconds over its member `entities`.
    ///
    /// The default does nothing, for systems that only react to events.
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], delta_time: f32) {
        let _ = (coordinator, entities, delta_time);
    }
}

/// Type-erased interface for registered systems.
///
/// The [`Registry`] stores `Box<dyn ErasedSystem>` and downcasts back to the concrete type
/// through [`as_any()`](Self::as_any) for typed access.
pub(crate) trait ErasedSystem {
    fn run(&mut self, coordinator: &mut Coordinator, entities: &[Entity], delta_time: f32);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: System> ErasedSystem for S {
    fn run(&mut self, coordinator: &mut Coordinator, entities: &[Entity], delta_time: f32) {
        self.update(coordinator, entities, delta_time);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
