//! Error types for the ECS.
//!
//! Every failure here is a contract violation by the caller: adding a component twice, touching a
//! dead entity, asking for a type that was never registered. They are returned rather than
//! asserted so that they are reported identically in every build profile. Callers that prefer to
//! crash on a violation can use [`OrPanic::or_panic`].

use crate::ecs::{entity::Entity, event::ListenerId, storage};

/// Convenience alias for results produced by the ECS.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad class of a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A fixed-size table (entities, component types) is full.
    CapacityExceeded,
    /// Something was registered or attached twice.
    DuplicateRegistration,
    /// A type, component or listener that was expected to exist does not.
    NotFound,
    /// An entity is dead or outside the entity universe.
    InvalidEntity,
    /// An event type has no listeners.
    NoListeners,
    /// A system was accessed while it is being updated.
    Busy,
}

/// A contract violation detected by the ECS.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("entity capacity exceeded: at most {max} entities may be alive")]
    EntityCapacityExceeded { max: usize },

    #[error("component capacity exceeded: at most {max} component types may be registered")]
    ComponentCapacityExceeded { max: usize },

    #[error("component type `{0}` is already registered")]
    ComponentAlreadyRegistered(&'static str),

    #[error("system type `{0}` is already registered")]
    SystemAlreadyRegistered(&'static str),

    #[error("entity {entity} already has a `{component}` component")]
    ComponentAlreadyPresent {
        entity: Entity,
        component: &'static str,
    },

    #[error("component type `{0}` is not registered")]
    ComponentNotRegistered(&'static str),

    #[error("system type `{0}` is not registered")]
    SystemNotRegistered(&'static str),

    #[error("entity {entity} has no `{component}` component")]
    ComponentNotFound {
        entity: Entity,
        component: &'static str,
    },

    #[error("no listener {id} is subscribed to event type `{event}`")]
    ListenerNotFound { event: &'static str, id: ListenerId },

    #[error("entity {0} is not alive")]
    EntityNotAlive(Entity),

    #[error("entity {entity} is out of range: valid ids are below {max}")]
    EntityOutOfRange { entity: Entity, max: usize },

    #[error("event type `{0}` has no listeners")]
    NoListeners(&'static str),

    #[error("system `{0}` is being updated and cannot be accessed")]
    SystemBusy(&'static str),

    #[error(transparent)]
    Storage(#[from] storage::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EntityCapacityExceeded { .. } | Error::ComponentCapacityExceeded { .. } => {
                ErrorKind::CapacityExceeded
            }
            Error::ComponentAlreadyRegistered(_)
            | Error::SystemAlreadyRegistered(_)
            | Error::ComponentAlreadyPresent { .. }
            | Error::Storage(storage::Error::Occupied) => ErrorKind::DuplicateRegistration,
            Error::ComponentNotRegistered(_)
            | Error::SystemNotRegistered(_)
            | Error::ComponentNotFound { .. }
            | Error::ListenerNotFound { .. }
            | Error::Storage(storage::Error::Vacant) => ErrorKind::NotFound,
            Error::EntityNotAlive(_) | Error::EntityOutOfRange { .. } => ErrorKind::InvalidEntity,
            Error::NoListeners(_) => ErrorKind::NoListeners,
            Error::SystemBusy(_) => ErrorKind::Busy,
        }
    }
}

/// Fail-fast unwrapping for ECS results.
///
/// ```rust,ignore
/// let player = coordinator.create_entity().or_panic();
/// ```
pub trait OrPanic<T> {
    /// Return the value, or panic with the error's message.
    fn or_panic(self) -> T;
}

impl<T> OrPanic<T> for Result<T> {
    #[track_caller]
    fn or_panic(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("ECS contract violation: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let entity = Entity::from(3u32);

        assert_eq!(
            Error::EntityCapacityExceeded { max: 1 }.kind(),
            ErrorKind::CapacityExceeded
        );
        assert_eq!(
            Error::ComponentAlreadyPresent {
                entity,
                component: "Position"
            }
            .kind(),
            ErrorKind::DuplicateRegistration
        );
        assert_eq!(
            Error::Storage(storage::Error::Vacant).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(Error::EntityNotAlive(entity).kind(), ErrorKind::InvalidEntity);
        assert_eq!(Error::NoListeners("Scored").kind(), ErrorKind::NoListeners);
    }

    #[test]
    fn messages_name_the_culprit() {
        let error = Error::ComponentNotFound {
            entity: Entity::from(12u32),
            component: "Velocity",
        };

        assert_eq!(error.to_string(), "entity 12 has no `Velocity` component");
    }

    #[test]
    fn or_panic_passes_values_through() {
        let result: Result<u8> = Ok(4);

        assert_eq!(result.or_panic(), 4);
    }

    #[test]
    #[should_panic(expected = "ECS contract violation: system type `Mover` is not registered")]
    fn or_panic_panics_with_message() {
        let result: Result<u8> = Err(Error::SystemNotRegistered("Mover"));

        result.or_panic();
    }
}
