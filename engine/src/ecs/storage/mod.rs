//! Dense associative storage for the ECS.
//!
//! Every keyed collection in the ECS (living entities, per-type component columns, per-system
//! member sets) is backed by the same structure: a key→slot map, a slot→key array and a packed
//! value array kept in lock-step.
//!
//! ```text
//! index:  { E7 → 0, E2 → 1, E9 → 2 }
//! keys:   [ E7,  E2,  E9 ]
//! values: [ V7,  V2,  V9 ]   ← contiguous, iterated linearly
//! ```
//!
//! Removal swaps the last slot into the hole and pops, so every operation is O(1) and the value
//! array never has gaps. The cost is that slot positions are not stable: after a removal the
//! previously-last element lives somewhere else. Slots are therefore never handed out; callers
//! only ever address values by key.

mod dense;
mod set;

pub use dense::DenseMap;
pub use set::DenseSet;

/// Contract violations reported by the dense containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An insert targeted a key that is already present.
    #[error("key is already present")]
    Occupied,

    /// A lookup, update or removal targeted a key that is not present.
    #[error("key is not present")]
    Vacant,
}
