use std::any::Any;

use crate::ecs::{
    component::Component,
    entity::Entity,
    storage::{self, DenseMap},
};

/// Dense storage for every instance of one component type.
///
/// Values are packed contiguously; [`values()`](Self::values) is the cache-friendly way to
/// touch every instance. The position of a value is not stable across removals.
#[derive(Debug)]
pub struct Column<C: Component> {
    values: DenseMap<Entity, C>,
}

impl<C: Component> Column<C> {
    pub(crate) fn new() -> Self {
        Self {
            values: DenseMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, entity: Entity, value: C) -> Result<(), storage::Error> {
        self.values.insert(entity, value)
    }

    pub(crate) fn remove(&mut self, entity: Entity) -> Result<C, storage::Error> {
        self.values.remove(entity)
    }

    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&C> {
        self.values.get(entity).ok()
    }

    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        self.values.get_mut(entity).ok()
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.values.contains(entity)
    }

    /// Every instance, packed.
    #[inline]
    pub fn values(&self) -> &[C] {
        self.values.values()
    }

    /// Every instance, packed, mutably.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [C] {
        self.values.values_mut()
    }

    /// The owning entities, parallel to [`values()`](Self::values).
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut C)> {
        self.values.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Type-erased interface for component columns.
///
/// The [`Store`](super::Store) keeps one `Box<dyn ErasedColumn>` per registered type so it can
/// purge a destroyed entity without knowing any concrete type, and downcasts back to
/// `Column<C>` through [`as_any()`](Self::as_any) for typed access.
pub(crate) trait ErasedColumn {
    /// Drop the entity's instance if it has one. Returns `true` if something was removed.
    fn purge(&mut self, entity: Entity) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedColumn for Column<C> {
    fn purge(&mut self, entity: Entity) -> bool {
        self.values.erase(entity).is_ok()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
