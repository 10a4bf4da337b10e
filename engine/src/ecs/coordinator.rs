//! The single entry point to the ECS.
//!
//! A [`Coordinator`] owns the entity registry, the component store and the system registry, and
//! keeps them consistent: every change to what an entity carries goes through here, is written to
//! the entity's [`Signature`], and is propagated to every system's member set before the call
//! returns.
//!
//! # Tick shape
//!
//! ```rust,ignore
//! loop {
//!     coordinator.update_system::<Input>(dt)?;
//!     events.flush(&mut coordinator);
//!     coordinator.update_system::<Physics>(dt)?;
//!     events.flush(&mut coordinator);
//!     coordinator.flush_destroyed_entities()?;
//! }
//! ```
//!
//! Destruction is deferred: [`destroy_entity()`](Coordinator::destroy_entity) only queues the id,
//! so references handed out during the tick stay valid until the host calls
//! [`flush_destroyed_entities()`](Coordinator::flush_destroyed_entities).

use std::fmt;

use log::{debug, trace};

use crate::ecs::{
    component::{self, Column, Component},
    config::Config,
    entity::{self, Entity},
    error::{Error, Result},
    signature::{IntoSignature, Signature},
    system::{self, System},
};

pub struct Coordinator {
    config: Config,
    entities: entity::Registry,
    components: component::Store,
    systems: system::Registry,

    /// Entities waiting for [`flush_destroyed_entities`](Self::flush_destroyed_entities).
    pending_destroy: Vec<Entity>,
}

impl Coordinator {
    pub fn new(config: Config) -> Self {
        debug!(
            "coordinator: {} entities, {} component types",
            config.max_entities, config.max_components
        );
        Self {
            config,
            entities: entity::Registry::new(config.max_entities, config.max_components),
            components: component::Store::new(config.max_components),
            systems: system::Registry::new(),
            pending_destroy: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Entities ====================

    /// Bring a new entity to life with an empty signature.
    pub fn create_entity(&mut self) -> Result<Entity> {
        let entity = self.entities.create()?;
        self.systems.on_signature_changed(entity, self.entities.signature(entity)?);
        Ok(entity)
    }

    /// Queue an entity for destruction at the next
    /// [`flush_destroyed_entities()`](Self::flush_destroyed_entities).
    ///
    /// Queuing the same entity twice is harmless.
    pub fn destroy_entity(&mut self, entity: Entity) {
        trace!("queued entity {entity} for destruction");
        self.pending_destroy.push(entity);
    }

    /// The entities queued for destruction, in request order.
    #[inline]
    pub fn pending_destroy(&self) -> &[Entity] {
        &self.pending_destroy
    }

    /// Destroy every queued entity that is still alive and clear the queue.
    ///
    /// Each destroyed entity loses all its components and leaves every system. Returns the number
    /// of entities destroyed.
    pub fn flush_destroyed_entities(&mut self) -> Result<usize> {
        let pending = std::mem::take(&mut self.pending_destroy);
        let mut destroyed = 0;
        for entity in pending {
            if !self.entities.is_alive(entity) {
                debug!("entity {entity} was queued for destruction but is not alive");
                continue;
            }
            self.destroy_now(entity)?;
            destroyed += 1;
        }
        Ok(destroyed)
    }

    /// Destroy every living entity immediately, discarding the destruction queue.
    ///
    /// Returns the number of entities destroyed.
    pub fn destroy_all_entities(&mut self) -> Result<usize> {
        self.pending_destroy.clear();
        let living = self.entities.living().to_vec();
        for &entity in &living {
            self.destroy_now(entity)?;
        }
        debug!("destroyed all {} entities", living.len());
        Ok(living.len())
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// The living entities. Order is stable until the next destruction.
    #[inline]
    pub fn living_entities(&self) -> &[Entity] {
        self.entities.living()
    }

    /// The number of living entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The set of component types the entity carries.
    pub fn signature(&self, entity: Entity) -> Result<&Signature> {
        self.ensure_alive(entity)?;
        self.entities.signature(entity)
    }

    // ==================== Components ====================

    /// Register a component type. Must happen once, before any entity carries a `T`.
    pub fn register_component<T: Component>(&mut self) -> Result<component::Id> {
        self.components.register::<T>()
    }

    /// The id (and signature bit) assigned to `T`.
    #[inline]
    pub fn component_type_id<T: Component>(&self) -> Result<component::Id> {
        self.components.type_id::<T>()
    }

    /// The type name registered under an id.
    #[inline]
    pub fn component_name(&self, id: component::Id) -> Option<&'static str> {
        self.components.name(id)
    }

    /// The number of registered component types.
    #[inline]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Attach a component and update the entity's system membership.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<()> {
        self.ensure_alive(entity)?;
        let id = self.components.type_id::<T>()?;
        self.components.add(entity, component)?;

        let mut signature = self.entities.signature(entity)?.clone();
        signature.insert(id);
        self.propagate(entity, signature)
    }

    /// Detach a component, update the entity's system membership, and hand the component back.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T> {
        self.ensure_alive(entity)?;
        let id = self.components.type_id::<T>()?;
        let component = self.components.remove::<T>(entity)?;

        let mut signature = self.entities.signature(entity)?.clone();
        signature.remove(id);
        self.propagate(entity, signature)?;
        Ok(component)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.ensure_alive(entity)?;
        self.components.get::<T>(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.ensure_alive(entity)?;
        self.components.get_mut::<T>(entity)
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool> {
        self.ensure_alive(entity)?;
        self.components.has::<T>(entity)
    }

    /// Every `T` in the world, packed, for linear iteration.
    pub fn column<T: Component>(&self) -> Result<&Column<T>> {
        self.components.column::<T>()
    }

    /// Every `T` in the world, mutably.
    pub fn column_mut<T: Component>(&mut self) -> Result<&mut Column<T>> {
        self.components.column_mut::<T>()
    }

    /// Build the signature naming every component type in `Q`.
    ///
    /// ```rust,ignore
    /// let required = coordinator.signature_of::<(Position, Velocity)>()?;
    /// ```
    pub fn signature_of<Q: IntoSignature>(&self) -> Result<Signature> {
        let mut signature = Signature::with_width(self.config.max_components);
        Q::extend_signature(&self.components, &mut signature)?;
        Ok(signature)
    }

    // ==================== Systems ====================

    /// Register a system instance. It requires nothing until
    /// [`set_system_signature()`](Self::set_system_signature) is called, so every living entity
    /// starts out as a member.
    pub fn register_system<S: System>(&mut self, system: S) -> Result<&mut S> {
        self.systems.register(system)?;
        self.rebuild_members::<S>()?;
        self.systems.get_mut::<S>()
    }

    /// Set the components `S` requires and recompute its members against every living entity.
    pub fn set_system_signature<S: System>(&mut self, signature: Signature) -> Result<()> {
        self.systems.set_signature::<S>(signature)?;
        self.rebuild_members::<S>()
    }

    /// The components `S` requires.
    pub fn system_signature<S: System>(&self) -> Result<&Signature> {
        self.systems.signature::<S>()
    }

    /// Fails with [`Error::SystemBusy`] while `S` is being updated.
    pub fn get_system<S: System>(&self) -> Result<&S> {
        self.systems.get::<S>()
    }

    /// Fails with [`Error::SystemBusy`] while `S` is being updated.
    pub fn get_system_mut<S: System>(&mut self) -> Result<&mut S> {
        self.systems.get_mut::<S>()
    }

    /// The entities `S` currently processes.
    pub fn system_entities<S: System>(&self) -> Result<&[Entity]> {
        Ok(self.systems.members::<S>()?.as_slice())
    }

    /// Run one update of `S` over its current members.
    ///
    /// The system gets the coordinator mutably and may make any structural change, including to
    /// its own members; the slice it iterates is the membership when the update started.
    pub fn update_system<S: System>(&mut self, delta_time: f32) -> Result<()> {
        let (mut system, entities) = self.systems.take::<S>()?;
        system.run(self, &entities, delta_time);
        self.systems.restore::<S>(system)
    }

    // ==================== Internals ====================

    fn ensure_alive(&self, entity: Entity) -> Result<()> {
        if self.entities.is_alive(entity) {
            Ok(())
        } else {
            Err(Error::EntityNotAlive(entity))
        }
    }

    /// Store the entity's new signature and bring every system's membership in line with it.
    fn propagate(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        self.systems.on_signature_changed(entity, &signature);
        self.entities.set_signature(entity, signature)
    }

    fn rebuild_members<S: System>(&mut self) -> Result<()> {
        let entities = &self.entities;
        let candidates = entities
            .living()
            .iter()
            .filter_map(|&entity| entities.signature(entity).ok().map(|sig| (entity, sig)));
        self.systems.rebuild::<S, _>(candidates)
    }

    fn destroy_now(&mut self, entity: Entity) -> Result<()> {
        self.entities.destroy(entity)?;
        self.components.on_entity_destroyed(entity);
        self.systems.on_entity_destroyed(entity);
        Ok(())
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .field("entities", &self.entities.len())
            .field("components", &self.components.len())
            .field("systems", &self.systems.len())
            .field("pending_destroy", &self.pending_destroy.len())
            .finish()
    }
}
