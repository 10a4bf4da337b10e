use std::{
    any::{TypeId, type_name},
    collections::HashMap,
};

use log::debug;

use crate::ecs::{
    component::{Column, Component, Id, column::ErasedColumn},
    entity::Entity,
    error::{Error, Result},
};

/// A registered component type and its instances.
struct Entry {
    name: &'static str,
    column: Box<dyn ErasedColumn>,
}

/// Owner of every component instance, one [`Column`] per registered type.
///
/// Types must be registered before use, exactly once. Registration order decides the type's
/// [`Id`]. The store never checks entity liveness; that is the coordinator's job.
pub struct Store {
    /// Upper bound on registered types.
    max_components: usize,

    /// Map from Rust TypeId to component Id.
    type_map: HashMap<TypeId, Id>,

    /// Registered types, indexed by component Id.
    entries: Vec<Entry>,
}

impl Store {
    /// Create an empty store that accepts up to `max_components` types.
    pub fn new(max_components: usize) -> Self {
        Self {
            max_components,
            type_map: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Register a new component type and get its identifier.
    ///
    /// Fails if `C` is already registered or the type table is full.
    pub fn register<C: Component>(&mut self) -> Result<Id> {
        let type_id = TypeId::of::<C>();
        let name = type_name::<C>();
        if self.type_map.contains_key(&type_id) {
            return Err(Error::ComponentAlreadyRegistered(name));
        }
        if self.entries.len() >= self.max_components {
            return Err(Error::ComponentCapacityExceeded {
                max: self.max_components,
            });
        }

        let id = Id::from(self.entries.len());
        self.entries.push(Entry {
            name,
            column: Box::new(Column::<C>::new()),
        });
        self.type_map.insert(type_id, id);
        debug!("registered component `{name}` as {id}");
        Ok(id)
    }

    /// Get the component ID for a provided type `C`.
    #[inline]
    pub fn type_id<C: Component>(&self) -> Result<Id> {
        self.type_map
            .get(&TypeId::of::<C>())
            .copied()
            .ok_or(Error::ComponentNotRegistered(type_name::<C>()))
    }

    #[inline]
    pub fn is_registered<C: Component>(&self) -> bool {
        self.type_map.contains_key(&TypeId::of::<C>())
    }

    /// The type name registered under an id.
    pub fn name(&self, id: Id) -> Option<&'static str> {
        self.entries.get(id.index()).map(|entry| entry.name)
    }

    /// The number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The maximum number of registered types.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_components
    }

    /// Every instance of `C`.
    pub fn column<C: Component>(&self) -> Result<&Column<C>> {
        let id = self.type_id::<C>()?;
        self.entries[id.index()]
            .column
            .as_any()
            .downcast_ref::<Column<C>>()
            .ok_or(Error::ComponentNotRegistered(type_name::<C>()))
    }

    /// Every instance of `C`, mutably.
    pub fn column_mut<C: Component>(&mut self) -> Result<&mut Column<C>> {
        let id = self.type_id::<C>()?;
        self.entries[id.index()]
            .column
            .as_any_mut()
            .downcast_mut::<Column<C>>()
            .ok_or(Error::ComponentNotRegistered(type_name::<C>()))
    }

    /// Attach a `C` to the entity. Fails if the entity already has one.
    pub fn add<C: Component>(&mut self, entity: Entity, value: C) -> Result<()> {
        self.column_mut::<C>()?
            .insert(entity, value)
            .map_err(|_| Error::ComponentAlreadyPresent {
                entity,
                component: type_name::<C>(),
            })
    }

    /// Detach the entity's `C` and hand it back. Fails if the entity has none.
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Result<C> {
        self.column_mut::<C>()?
            .remove(entity)
            .map_err(|_| not_found::<C>(entity))
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.column::<C>()?
            .get(entity)
            .ok_or_else(|| not_found::<C>(entity))
    }

    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.column_mut::<C>()?
            .get_mut(entity)
            .ok_or_else(|| not_found::<C>(entity))
    }

    /// Check if the entity has a `C`. Fails only if `C` is not registered.
    pub fn has<C: Component>(&self, entity: Entity) -> Result<bool> {
        Ok(self.column::<C>()?.contains(entity))
    }

    /// Drop every component the entity carries.
    ///
    /// Visits every registered type, since the store does not know which ones the entity has.
    /// Returns the number of components dropped.
    pub fn on_entity_destroyed(&mut self, entity: Entity) -> usize {
        self.entries
            .iter_mut()
            .map(|entry| entry.column.purge(entity))
            .filter(|&purged| purged)
            .count()
    }
}

#[inline]
fn not_found<C: Component>(entity: Entity) -> Error {
    Error::ComponentNotFound {
        entity,
        component: type_name::<C>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::error::ErrorKind;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    impl Component for Position {}

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }
    impl Component for Velocity {}

    #[derive(Debug)]
    struct Health(u32);
    impl Component for Health {}

    // ==================== Registration ====================

    #[test]
    fn component_registration() {
        // Given
        let mut store = Store::new(8);

        // When
        let pos_id = store.register::<Position>().unwrap();
        let vel_id = store.register::<Velocity>().unwrap();

        // Then
        assert_eq!(pos_id, Id::new(0));
        assert_eq!(vel_id, Id::new(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.type_id::<Velocity>(), Ok(vel_id));
        assert_eq!(store.name(pos_id), Some(type_name::<Position>()));
    }

    #[test]
    fn register_twice_fails() {
        let mut store = Store::new(8);
        store.register::<Position>().unwrap();

        let result = store.register::<Position>();

        assert_eq!(
            result,
            Err(Error::ComponentAlreadyRegistered(type_name::<Position>()))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn register_past_capacity_fails() {
        // Given
        let mut store = Store::new(2);
        store.register::<Position>().unwrap();
        store.register::<Velocity>().unwrap();

        // When
        let result = store.register::<Health>();

        // Then
        assert_eq!(result.unwrap_err().kind(), ErrorKind::CapacityExceeded);
        assert!(!store.is_registered::<Health>());
    }

    #[test]
    fn unregistered_type_is_reported() {
        let mut store = Store::new(8);
        let entity = Entity::new(0);

        assert_eq!(store.type_id::<Health>().unwrap_err().kind(), ErrorKind::NotFound);
        assert!(store.has::<Health>(entity).is_err());
        assert!(store.get::<Health>(entity).is_err());
        assert!(store.add(entity, Health(3)).is_err());
    }

    // ==================== Instances ====================

    #[test]
    fn add_get_remove() {
        // Given
        let mut store = Store::new(8);
        store.register::<Position>().unwrap();
        let entity = Entity::new(5);

        // When
        store.add(entity, Position { x: 1.0, y: 2.0 }).unwrap();

        // Then
        assert_eq!(store.get::<Position>(entity), Ok(&Position { x: 1.0, y: 2.0 }));
        assert_eq!(store.has::<Position>(entity), Ok(true));

        // When
        let removed = store.remove::<Position>(entity);

        // Then
        assert_eq!(removed, Ok(Position { x: 1.0, y: 2.0 }));
        assert_eq!(store.has::<Position>(entity), Ok(false));
        assert_eq!(
            store.get::<Position>(entity),
            Err(Error::ComponentNotFound {
                entity,
                component: type_name::<Position>()
            })
        );
    }

    #[test]
    fn add_twice_fails_and_keeps_first() {
        let mut store = Store::new(8);
        store.register::<Position>().unwrap();
        let entity = Entity::new(1);
        store.add(entity, Position { x: 1.0, y: 1.0 }).unwrap();

        let result = store.add(entity, Position { x: 9.0, y: 9.0 });

        assert_eq!(result.unwrap_err().kind(), ErrorKind::DuplicateRegistration);
        assert_eq!(store.get::<Position>(entity).unwrap().x, 1.0);
    }

    #[test]
    fn remove_missing_fails() {
        let mut store = Store::new(8);
        store.register::<Position>().unwrap();

        let result = store.remove::<Position>(Entity::new(1));

        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut store = Store::new(8);
        store.register::<Velocity>().unwrap();
        let entity = Entity::new(2);
        store.add(entity, Velocity { dx: 0.0, dy: 0.0 }).unwrap();

        store.get_mut::<Velocity>(entity).unwrap().dx = 4.0;

        assert_eq!(store.get::<Velocity>(entity).unwrap().dx, 4.0);
    }

    #[test]
    fn column_exposes_packed_values() {
        let mut store = Store::new(8);
        store.register::<Health>().unwrap();
        for id in 0..4 {
            store.add(Entity::new(id), Health(id * 10)).unwrap();
        }
        store.remove::<Health>(Entity::new(0)).unwrap();

        let column = store.column::<Health>().unwrap();

        assert_eq!(column.len(), 3);
        let mut total: Vec<_> = column.values().iter().map(|h| h.0).collect();
        total.sort_unstable();
        assert_eq!(total, vec![10, 20, 30]);
        assert_eq!(column.entities()[0], Entity::new(3));
    }

    // ==================== Entity destruction ====================

    #[test]
    fn on_entity_destroyed_purges_every_type() {
        // Given
        let mut store = Store::new(8);
        store.register::<Position>().unwrap();
        store.register::<Velocity>().unwrap();
        store.register::<Health>().unwrap();
        let doomed = Entity::new(1);
        let survivor = Entity::new(2);
        store.add(doomed, Position { x: 0.0, y: 0.0 }).unwrap();
        store.add(doomed, Health(1)).unwrap();
        store.add(survivor, Position { x: 3.0, y: 0.0 }).unwrap();

        // When
        let purged = store.on_entity_destroyed(doomed);

        // Then
        assert_eq!(purged, 2);
        assert_eq!(store.has::<Position>(doomed), Ok(false));
        assert_eq!(store.has::<Health>(doomed), Ok(false));
        assert_eq!(store.get::<Position>(survivor).unwrap().x, 3.0);
        assert_eq!(store.on_entity_destroyed(doomed), 0);
    }
}
