/// Default upper bound on simultaneously alive entities.
pub const MAX_ENTITIES: usize = 5000;

/// Default upper bound on registered component types, and the width of every signature.
pub const MAX_COMPONENTS: usize = 32;

/// Fixed limits for a [`Coordinator`](crate::ecs::Coordinator).
///
/// Limits are chosen once, at construction, and never change for the life of the coordinator.
///
/// ```rust,ignore
/// let config = Config::default().with_max_entities(100_000);
/// let coordinator = Coordinator::new(config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How many entities may be alive at once. Entity ids range over `0..max_entities`.
    pub max_entities: usize,

    /// How many component types may be registered.
    pub max_components: usize,
}

impl Config {
    #[inline]
    pub const fn new(max_entities: usize, max_components: usize) -> Self {
        Self {
            max_entities,
            max_components,
        }
    }

    #[inline]
    pub const fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    #[inline]
    pub const fn with_max_components(mut self, max_components: usize) -> Self {
        self.max_components = max_components;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(MAX_ENTITIES, MAX_COMPONENTS)
    }
}
