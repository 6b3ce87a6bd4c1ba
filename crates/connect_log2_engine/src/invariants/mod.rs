//! Board properties that hold whenever a session is idle.
//!
//! Each property is a zero-sized type implementing [`Invariant`]. Tuples of
//! them form an [`InvariantSet`], which [`crate::assert_invariants`] checks
//! after every intent in debug builds.

use derive_more::Display;

/// A property of `S` that holds between intents.
pub trait Invariant<S> {
    /// Returns true if `state` has the property.
    fn holds(state: &S) -> bool;

    /// One-line statement of the property, used in reports.
    fn description() -> &'static str;

    /// Returns the violation if `state` lacks the property.
    fn check(state: &S) -> Option<InvariantViolation> {
        (!Self::holds(state)).then(|| InvariantViolation::new(Self::description()))
    }
}

/// A property found not to hold.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Statement of the broken property.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps a property statement.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked in one pass.
pub trait InvariantSet<S> {
    /// Every broken property, in declaration order.
    fn violations(state: &S) -> Vec<InvariantViolation>;

    /// `Ok` when nothing is broken.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations = Self::violations(state);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

macro_rules! tuple_invariant_set {
    ($($member:ident),+) => {
        impl<S, $($member: Invariant<S>),+> InvariantSet<S> for ($($member,)+) {
            fn violations(state: &S) -> Vec<InvariantViolation> {
                [$($member::check(state)),+].into_iter().flatten().collect()
            }
        }
    };
}

tuple_invariant_set!(A);
tuple_invariant_set!(A, B);
tuple_invariant_set!(A, B, C);

pub mod chain_connected;
pub mod gravity_settled;
pub mod spawn_floor;

pub use chain_connected::ChainConnectedInvariant;
pub use gravity_settled::GravitySettledInvariant;
pub use spawn_floor::SpawnFloorInvariant;

/// All session invariants as a composable set.
pub type GameInvariants = (
    GravitySettledInvariant,
    ChainConnectedInvariant,
    SpawnFloorInvariant,
);
