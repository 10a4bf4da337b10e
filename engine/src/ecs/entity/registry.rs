use std::collections::VecDeque;

use log::trace;

use crate::ecs::{
    entity::Entity,
    error::{Error, Result},
    signature::Signature,
    storage::DenseSet,
};

/// The collection of all entity ids in the world. This tracks which ids are alive, which are free
/// for reuse, and the component signature of every id.
///
/// Signatures are stored in a flat array indexed by id and are not gated on liveness: a dead id
/// simply has the empty signature.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Ids available for creation, oldest freed first.
    available: VecDeque<Entity>,

    /// Currently alive entities, in dense order.
    living: DenseSet<Entity>,

    /// One signature per id in the universe.
    signatures: Vec<Signature>,
}

impl Registry {
    /// Construct a registry over the ids `0..max_entities`, all initially free, with signatures
    /// `max_components` bits wide.
    pub fn new(max_entities: usize, max_components: usize) -> Self {
        // The null sentinel is never handed out.
        let max_entities = max_entities.min(Entity::NULL.index());
        Self {
            available: (0..max_entities as u32).map(Entity::new).collect(),
            living: DenseSet::with_capacity(max_entities),
            signatures: vec![Signature::with_width(max_components); max_entities],
        }
    }

    /// The size of the entity universe.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.signatures.len()
    }

    /// The number of alive entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.living.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.living.is_empty()
    }

    /// Bring a free id to life.
    ///
    /// Fails with [`Error::EntityCapacityExceeded`] once every id is alive.
    pub fn create(&mut self) -> Result<Entity> {
        let entity = self
            .available
            .pop_front()
            .ok_or(Error::EntityCapacityExceeded {
                max: self.capacity(),
            })?;
        self.living.insert(entity)?;
        trace!("created entity {entity}");
        Ok(entity)
    }

    /// Kill an alive entity: it leaves the living set, its signature is reset, and its id goes to
    /// the back of the free pool.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::EntityNotAlive(entity));
        }
        self.living.remove(entity)?;
        self.signatures[entity.index()].reset();
        self.available.push_back(entity);
        trace!("destroyed entity {entity}");
        Ok(())
    }

    /// Check if the entity is currently alive. Ids outside the universe are never alive.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.living.contains(entity)
    }

    /// The alive entities in dense order. Destroying an entity moves the last entity into its
    /// position.
    #[inline]
    pub fn living(&self) -> &[Entity] {
        self.living.as_slice()
    }

    /// Overwrite the signature stored for an id.
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        let max = self.capacity();
        let slot = self
            .signatures
            .get_mut(entity.index())
            .ok_or(Error::EntityOutOfRange { entity, max })?;
        *slot = signature;
        Ok(())
    }

    /// Get the signature stored for an id.
    pub fn signature(&self, entity: Entity) -> Result<&Signature> {
        self.signatures
            .get(entity.index())
            .ok_or(Error::EntityOutOfRange {
                entity,
                max: self.capacity(),
            })
    }
}
