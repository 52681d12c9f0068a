//! Typed identifiers for the elements of a [`Model`](crate::semantic::Model).
//!
//! Every element lives in an arena owned by the model. Cross references
//! between elements (a message pointing at its sender, an actor listing its
//! activities) are expressed with these indices instead of names, so a
//! reference can never dangle into a different model's storage by accident
//! and never duplicates mutable actor data.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Creates an identifier from a raw arena index.
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the raw arena index.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifies an actor. The index doubles as the actor's display order.
    ActorId,
    "actor"
);

arena_id!(
    /// Identifies an activity in the model's activity arena.
    ActivityId,
    "activity"
);

arena_id!(
    /// Identifies a message in the model's message arena.
    MessageId,
    "message"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        assert_eq!(ActorId::new(3).index(), 3);
        assert_eq!(ActivityId::new(0).index(), 0);
        assert_eq!(MessageId::new(7).index(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(ActorId::new(2).to_string(), "actor#2");
        assert_eq!(MessageId::new(5).to_string(), "message#5");
    }

    #[test]
    fn test_ordering_follows_index() {
        assert!(ActorId::new(0) < ActorId::new(1));
    }
}
