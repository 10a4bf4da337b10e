//! A small entity-component-system runtime.
//!
//! Entities are plain ids, components are plain data attached to them, and systems are logic that
//! runs over every entity carrying a required set of components. The [`Coordinator`] ties the
//! three together; the [`EventBus`] lets systems talk without holding references to each other.
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::{Component, Coordinator, OrPanic};
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! let mut coordinator = Coordinator::default();
//! coordinator.register_component::<Position>().or_panic();
//!
//! let player = coordinator.create_entity().or_panic();
//! coordinator.add_component(player, Position { x: 0.0, y: 0.0 }).or_panic();
//! ```
//!
//! [`Coordinator`]: ecs::Coordinator
//! [`EventBus`]: ecs::EventBus

// Lets the derive macros name `::rusty_ecs` from inside this crate too.
extern crate self as rusty_ecs;

pub mod ecs;
pub mod logging;
