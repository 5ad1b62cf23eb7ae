//! Causal identifiers for operations.
//!
//! Every operation in a document's log is keyed by an [`Id`]: a
//! `(counter, actor)` pair that serves as the document's logical clock.
//! Ordering is lexicographic with the counter as the primary key and the
//! actor as the tie-break, which gives every operation a total,
//! replica-independent position without any coordination or wall-clock
//! input.

mod errors;

pub use errors::IdError;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A replica's stable, opaque identifier.
///
/// Actors are non-negative 64-bit integers. Each replica picks one at
/// bootstrap (usually via [`Actor::random`]) and uses it for every operation
/// it authors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Actor(i64);

impl Actor {
    /// Reserved minimum sentinel; the `Root` operation is keyed with it.
    pub const MIN: Actor = Actor(0);
    /// Reserved maximum sentinel.
    pub const MAX: Actor = Actor(i64::MAX);

    /// Creates an actor from a raw value.
    ///
    /// Fails with [`IdError::NegativeActor`] when `value` is negative.
    pub fn new(value: i64) -> Result<Self, IdError> {
        if value < 0 {
            return Err(IdError::NegativeActor { value });
        }
        Ok(Self(value))
    }

    /// Draws a uniformly random actor for replica bootstrap.
    pub fn random() -> Self {
        Self(rand::thread_rng().gen_range(0..=i64::MAX))
    }

    /// Returns the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-actor monotonic sequence number.
///
/// A replica bumps its counter with [`Counter::next`] for every operation it
/// authors; combined with the actor this yields a fresh [`Id`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Counter(i64);

impl Counter {
    /// Reserved minimum sentinel.
    pub const MIN: Counter = Counter(0);
    /// Reserved maximum sentinel.
    pub const MAX: Counter = Counter(i64::MAX);

    /// Creates a counter from a raw value.
    ///
    /// Fails with [`IdError::NegativeCounter`] when `value` is negative.
    pub fn new(value: i64) -> Result<Self, IdError> {
        if value < 0 {
            return Err(IdError::NegativeCounter { value });
        }
        Ok(Self(value))
    }

    /// Returns the successor counter, saturating at [`Counter::MAX`].
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The causal, total-order key of one operation: `(counter, actor)`.
///
/// Field order matters: the derived `Ord` compares the counter first and
/// breaks ties on the actor, so `Id` can be used directly as a sorted-map
/// key. [`Id::MIN`] sorts before every constructible id and [`Id::MAX`]
/// after.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Id {
    /// Primary sort key.
    pub counter: Counter,
    /// Tie-break between operations authored at the same counter value.
    pub actor: Actor,
}

impl Id {
    /// Smallest possible id; always occupied by the `Root` operation.
    pub const MIN: Id = Id {
        counter: Counter::MIN,
        actor: Actor::MIN,
    };
    /// Largest possible id.
    pub const MAX: Id = Id {
        counter: Counter::MAX,
        actor: Actor::MAX,
    };

    /// Creates an id from its parts.
    pub fn new(counter: Counter, actor: Actor) -> Self {
        Self { counter, actor }
    }

    /// Returns the id a replica would author next: same actor, successor
    /// counter.
    pub fn next(&self) -> Self {
        Self {
            counter: self.counter.next(),
            actor: self.actor,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.counter, self.actor)
    }
}
