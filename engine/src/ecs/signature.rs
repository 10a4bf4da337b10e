//! Component signatures.
//!
//! A [`Signature`] is a bitset over component type ids: bit N set means "carries component type
//! N". Every entity has one (what it carries) and every system has one (what it requires). An
//! entity belongs to a system when its signature is a superset of the system's:
//!
//! ```text
//! entity:   1 1 0 1      Position, Velocity, Health
//! required: 1 1 0 0      Position, Velocity
//!           -------
//! match:    entity & required == required
//! ```

use std::fmt;

use fixedbitset::FixedBitSet;

use crate::ecs::{
    component::{self, Component},
    error::Result,
    util::for_tuples,
};

/// A set of component type ids.
///
/// The bitset grows to fit any id inserted into it, so signatures of different widths compare
/// by their set bits only.
#[derive(Clone, Default)]
pub struct Signature {
    bits: FixedBitSet,
}

impl Signature {
    /// An empty signature.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bits: FixedBitSet::new(),
        }
    }

    /// An empty signature with room for `width` component ids.
    #[inline]
    pub fn with_width(width: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(width),
        }
    }

    /// Add a component type.
    #[inline]
    pub fn insert(&mut self, id: component::Id) {
        let index = id.index();
        if index >= self.bits.len() {
            self.bits.grow(index + 1);
        }
        self.bits.insert(index);
    }

    /// Builder form of [`insert`](Self::insert).
    #[inline]
    pub fn with(mut self, id: component::Id) -> Self {
        self.insert(id);
        self
    }

    /// Drop a component type. Removing an absent type does nothing.
    #[inline]
    pub fn remove(&mut self, id: component::Id) {
        let index = id.index();
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    #[inline]
    pub fn contains(&self, id: component::Id) -> bool {
        self.bits.contains(id.index())
    }

    /// Check if this signature carries every component type in `required`.
    #[inline]
    pub fn matches(&self, required: &Signature) -> bool {
        self.bits.is_superset(&required.bits)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// The number of component types in the signature.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Clear every bit, keeping the width.
    #[inline]
    pub fn reset(&mut self) {
        self.bits.clear();
    }

    /// The component type ids in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = component::Id> + '_ {
        self.bits.ones().map(component::Id::from)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.bits.is_superset(&other.bits) && other.bits.is_superset(&self.bits)
    }
}

impl Eq for Signature {}

impl FromIterator<component::Id> for Signature {
    fn from_iter<I: IntoIterator<Item = component::Id>>(iter: I) -> Self {
        let mut signature = Signature::new();
        for id in iter {
            signature.insert(id);
        }
        signature
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bits.ones()).finish()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature{self}")
    }
}

/// A type, or tuple of types, that names a set of components.
///
/// Used to build required signatures without spelling out ids:
///
/// ```rust,ignore
/// let required = coordinator.signature_of::<(Position, Velocity)>()?;
/// ```
pub trait IntoSignature {
    /// Add the ids of every named component type to the signature. Fails if any of them is not
    /// registered in `store`.
    fn extend_signature(store: &component::Store, signature: &mut Signature) -> Result<()>;
}

impl<C: Component> IntoSignature for C {
    fn extend_signature(store: &component::Store, signature: &mut Signature) -> Result<()> {
        signature.insert(store.type_id::<C>()?);
        Ok(())
    }
}

impl IntoSignature for () {
    fn extend_signature(_store: &component::Store, _signature: &mut Signature) -> Result<()> {
        Ok(())
    }
}

macro_rules! tuple_into_signature {
    ($($name: ident),*) => {
        impl<$($name: IntoSignature),*> IntoSignature for ($($name,)*) {
            fn extend_signature(store: &component::Store, signature: &mut Signature) -> Result<()> {
                $(<$name as IntoSignature>::extend_signature(store, signature)?;)*
                Ok(())
            }
        }
    }
}

for_tuples!(tuple_into_signature);
