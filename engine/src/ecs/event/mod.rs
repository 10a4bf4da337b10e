pub mod bus;

use std::fmt;

pub use bus::EventBus;

/// Marker trait for event types.
///
/// Events must be:
/// - `'static`: No borrowed data, so they can be queued
///
/// Implement it with `#[derive(Event)]`.
pub trait Event: 'static {}

/// Identifies one subscription on an [`EventBus`]. Ids increase monotonically from 1; 0 is
/// [`ListenerId::INVALID`] and is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// A sentinel that never names a subscription.
    pub const INVALID: Self = Self(0);

    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
