use crate::ecs::{entity::Entity, storage::DenseSet};

/// The set of entities a system currently processes.
///
/// Adding a present entity or removing an absent one is a no-op, which keeps repeated signature
/// propagation for the same entity harmless. Order is insertion order until the first removal.
#[derive(Debug, Clone, Default)]
pub struct Members {
    entities: DenseSet<Entity>,
}

impl Members {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the entity. Returns `true` if it was not already a member.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        self.entities.insert(entity).is_ok()
    }

    /// Remove the entity. Returns `true` if it was a member.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        self.entities.remove(entity).is_ok()
    }

    #[inline]
    pub fn has_entity(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Entity] {
        self.entities.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_are_idempotent() {
        // Given
        let mut members = Members::new();
        let entity = Entity::new(4);

        // When / Then
        assert!(members.add_entity(entity));
        assert!(!members.add_entity(entity));
        assert_eq!(members.len(), 1);
        assert!(members.has_entity(entity));

        assert!(members.remove_entity(entity));
        assert!(!members.remove_entity(entity));
        assert!(members.is_empty());
        assert!(!members.has_entity(entity));
    }

    #[test]
    fn iterates_every_member_once() {
        let mut members = Members::new();
        for id in 0..5 {
            members.add_entity(Entity::new(id));
        }
        members.remove_entity(Entity::new(1));

        let mut seen: Vec<_> = members.iter().map(|e| e.id()).collect();
        seen.sort_unstable();

        assert_eq!(seen, vec![0, 2, 3, 4]);
        assert_eq!(members.as_slice().len(), 4);
    }
}
