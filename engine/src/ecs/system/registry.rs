use std::{
    any::{TypeId, type_name},
    collections::HashMap,
};

use log::debug;

use crate::ecs::{
    entity::Entity,
    error::{Error, Result},
    signature::Signature,
    system::{ErasedSystem, Members, System},
};

/// One registered system with its requirements and membership.
struct Slot {
    name: &'static str,

    /// The components an entity must carry to be a member.
    signature: Signature,

    /// The entities currently matching `signature`.
    members: Members,

    /// The system itself. `None` while it is being updated.
    system: Option<Box<dyn ErasedSystem>>,
}

impl Slot {
    /// Bring the entity's membership in line with its signature.
    #[inline]
    fn refresh(&mut self, entity: Entity, signature: &Signature) {
        if signature.matches(&self.signature) {
            self.members.add_entity(entity);
        } else {
            self.members.remove_entity(entity);
        }
    }
}

/// Holds one instance of every registered system type, its required signature, and its member
/// set.
///
/// Membership only ever changes through [`on_signature_changed`](Self::on_signature_changed),
/// [`on_entity_destroyed`](Self::on_entity_destroyed) and [`rebuild`](Self::rebuild). The
/// coordinator calls one of them after every structural change and whenever a system is
/// registered or given a new signature.
#[derive(Default)]
pub struct Registry {
    /// Map from Rust TypeId to slot index.
    type_map: HashMap<TypeId, usize>,

    /// Registered systems in registration order.
    slots: Vec<Slot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system instance. Its required signature starts empty.
    ///
    /// Fails if a system of the same type is already registered.
    pub fn register<S: System>(&mut self, system: S) -> Result<&mut S> {
        let type_id = TypeId::of::<S>();
        let name = type_name::<S>();
        if self.type_map.contains_key(&type_id) {
            return Err(Error::SystemAlreadyRegistered(name));
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            name,
            signature: Signature::new(),
            members: Members::new(),
            system: Some(Box::new(system)),
        });
        self.type_map.insert(type_id, index);
        debug!("registered system `{name}`");
        self.get_mut::<S>()
    }

    #[inline]
    pub fn is_registered<S: System>(&self) -> bool {
        self.type_map.contains_key(&TypeId::of::<S>())
    }

    /// The number of registered systems.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record the components `S` requires.
    ///
    /// Existing membership is left alone; see [`rebuild`](Self::rebuild).
    pub fn set_signature<S: System>(&mut self, signature: Signature) -> Result<()> {
        let slot = self.slot_mut::<S>()?;
        debug!("system `{}` requires {signature}", slot.name);
        slot.signature = signature;
        Ok(())
    }

    /// The components `S` requires.
    pub fn signature<S: System>(&self) -> Result<&Signature> {
        Ok(&self.slot::<S>()?.signature)
    }

    /// The entities `S` currently processes.
    pub fn members<S: System>(&self) -> Result<&Members> {
        Ok(&self.slot::<S>()?.members)
    }

    pub fn get<S: System>(&self) -> Result<&S> {
        let slot = self.slot::<S>()?;
        slot.system
            .as_ref()
            .ok_or(Error::SystemBusy(slot.name))?
            .as_any()
            .downcast_ref::<S>()
            .ok_or(Error::SystemNotRegistered(slot.name))
    }

    pub fn get_mut<S: System>(&mut self) -> Result<&mut S> {
        let slot = self.slot_mut::<S>()?;
        let name = slot.name;
        slot.system
            .as_mut()
            .ok_or(Error::SystemBusy(name))?
            .as_any_mut()
            .downcast_mut::<S>()
            .ok_or(Error::SystemNotRegistered(name))
    }

    /// Recompute every system's membership for an entity whose signature is now `signature`.
    ///
    /// Idempotent: an entity already in (or already out of) a system stays that way.
    pub fn on_signature_changed(&mut self, entity: Entity, signature: &Signature) {
        for slot in &mut self.slots {
            slot.refresh(entity, signature);
        }
    }

    /// Remove a destroyed entity from every system.
    pub fn on_entity_destroyed(&mut self, entity: Entity) {
        for slot in &mut self.slots {
            slot.members.remove_entity(entity);
        }
    }

    /// Recompute `S`'s membership from scratch against the given candidates.
    pub fn rebuild<'a, S, I>(&mut self, candidates: I) -> Result<()>
    where
        S: System,
        I: IntoIterator<Item = (Entity, &'a Signature)>,
    {
        let slot = self.slot_mut::<S>()?;
        slot.members = Members::new();
        for (entity, signature) in candidates {
            slot.refresh(entity, signature);
        }
        Ok(())
    }

    /// Take `S` out of the registry for an update, along with a snapshot of its members.
    pub(crate) fn take<S: System>(&mut self) -> Result<(Box<dyn ErasedSystem>, Vec<Entity>)> {
        let slot = self.slot_mut::<S>()?;
        let system = slot.system.take().ok_or(Error::SystemBusy(slot.name))?;
        Ok((system, slot.members.as_slice().to_vec()))
    }

    /// Put a system taken with [`take`](Self::take) back.
    pub(crate) fn restore<S: System>(&mut self, system: Box<dyn ErasedSystem>) -> Result<()> {
        self.slot_mut::<S>()?.system = Some(system);
        Ok(())
    }

    fn slot<S: System>(&self) -> Result<&Slot> {
        self.type_map
            .get(&TypeId::of::<S>())
            .map(|&index| &self.slots[index])
            .ok_or(Error::SystemNotRegistered(type_name::<S>()))
    }

    fn slot_mut<S: System>(&mut self) -> Result<&mut Slot> {
        let index = *self
            .type_map
            .get(&TypeId::of::<S>())
            .ok_or(Error::SystemNotRegistered(type_name::<S>()))?;
        Ok(&mut self.slots[index])
    }
}
