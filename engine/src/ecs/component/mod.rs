//! Component management for the ECS.
//!
//! This module provides the infrastructure for registering, storing, and accessing component
//! types. Components are plain data attached to entities; each registered type owns one
//! [`Column`], a dense `Entity → C` map, inside the component [`Store`].
//!
//! ## Type identity
//!
//! Each type is registered exactly once and receives a small [`Id`] (0, 1, 2, ...) that doubles
//! as its bit index in a [`Signature`](crate::ecs::Signature). Lookups go through the type's
//! `std::any::TypeId`, so two types can never collide on a name.
//!
//! ## Usage
//!
//! ```ignore
//! use rusty_ecs::ecs::component::{Component, Store};
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! let mut store = Store::new(32);
//! let pos_id = store.register::<Position>()?;
//! store.add(entity, Position { x: 1.0, y: 2.0 })?;
//! ```

mod column;
mod store;

use std::fmt;

pub use column::Column;
pub use store::Store;

/// A component type identifier, assigned in registration order starting at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Id {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value as u32)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trait representing a component in the ECS (Entity Component System).
///
/// At present this only sets the required trait bounds for a type to be used as a component.
/// Implement it with `#[derive(Component)]`.
pub trait Component: 'static + Sized {}
