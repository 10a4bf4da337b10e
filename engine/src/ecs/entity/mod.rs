//! Entity management for the ECS (Entity Component System).
//!
//! An [`Entity`] is nothing but a small integer handle. It has no payload of its own; everything
//! about an entity lives in the component store (its data) and in the entity [`Registry`] (its
//! liveness and its component [`Signature`](crate::ecs::Signature)).
//!
//! # Recycling
//!
//! The registry owns a fixed universe of ids, `0..max_entities`. Creating an entity draws the
//! oldest free id; destroying it returns the id to the back of the free pool. There is no
//! generation counter, so an id that was destroyed may later name a *different* entity:
//!
//! ```rust,ignore
//! let a = registry.create()?;   // Entity(0)
//! registry.destroy(a)?;
//! // ... the pool cycles ...
//! let b = registry.create()?;   // may be Entity(0) again
//! ```
//!
//! Holders of an `Entity` must drop it when the entity is destroyed.

mod registry;

use std::fmt;

pub use registry::Registry;

/// An entity in the ECS (Entity Component System).
///
/// Unique among currently alive entities only; see the module docs on recycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// A sentinel that never names a live entity.
    pub const NULL: Self = Self(u32::MAX);

    /// Construct an entity handle from a raw id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id of this entity.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == u32::MAX
    }
}

impl From<u32> for Entity {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[test]
fn entity_index_matches_id() {
    let entity = Entity::new(42);

    assert_eq!(entity.id(), 42);
    assert_eq!(entity.index(), 42);
    assert!(!entity.is_null());
}

#[test]
fn null_entity() {
    assert!(Entity::NULL.is_null());
    assert_eq!(Entity::default(), Entity::NULL);
    assert_eq!(Entity::NULL.to_string(), "null");
    assert_eq!(Entity::from(7u32).to_string(), "7");
}
