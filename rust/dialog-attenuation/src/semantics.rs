use std::fmt::{self, Debug, Display, Formatter};

use dialog_capability::Capability;

use crate::{Capabilities, Chained, SemanticsError};

/// Delegation rules for one resource domain.
///
/// Implementations translate between the generic [`Capability`] shape and a
/// typed domain value, and decide whether one domain value may be derived
/// from another. They hold no mutable state, so one instance can serve any
/// number of unrelated verifications.
///
/// For every valid `x`, `try_delegating(x, x)` must not be an escalation.
pub trait CapabilitySemantics {
    /// Typed representation of a capability in this domain.
    type Value: Clone;

    /// Recognizes a capability of this domain.
    ///
    /// Returns `None` when `capability` belongs to some other domain or is
    /// malformed for this one. Callers try several semantics and discard
    /// the misses.
    fn parse(&self, capability: &Capability) -> Option<Self::Value>;

    /// Converts a domain value back into a capability.
    ///
    /// Must succeed for every value returned by [`parse`](Self::parse) and
    /// fail with [`SemanticsError::Unrepresentable`] for values that cannot be
    /// written as one capability.
    fn to_capability(&self, value: &Self::Value) -> Result<Capability, SemanticsError>;

    /// Decides whether `child` may be derived from `parent`.
    fn try_delegating(&self, parent: &Self::Value, child: &Self::Value) -> Delegation<Self::Value>;

    /// How closely `parent` addresses the target of `child`.
    ///
    /// When no proof backs a claim, the engine reports the escalation met
    /// against the parent with the highest value, the first one on ties.
    /// Defaults to `0`, which keeps the first escalation met.
    fn specificity(&self, _parent: &Self::Value, _child: &Self::Value) -> usize {
        0
    }

    /// Walks `chain` with these semantics. Shorthand for
    /// [`capabilities`](crate::capabilities).
    fn capabilities<'a, C>(&'a self, chain: &'a C) -> Capabilities<'a, C, Self>
    where
        Self: Sized,
        C: Chained,
    {
        crate::capabilities(chain, self)
    }
}

/// Result of a single delegation hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegation<T> {
    /// Parent and child address different targets.
    Unrelated,
    /// Same target, but the child claims more than the parent grants.
    Escalation(CapabilityEscalation<T>),
    /// Child is derivable from the parent. Holds the effective capability
    /// after the hop, which may differ from the child that was asked for.
    Delegated(T),
}

impl<T> Delegation<T> {
    /// Shorthand for an [`Delegation::Escalation`] outcome.
    pub fn escalation(reason: impl Into<String>, capability: T) -> Self {
        Self::Escalation(CapabilityEscalation::new(reason, capability))
    }

    /// Returns `true` for [`Delegation::Escalation`].
    pub fn is_escalation(&self) -> bool {
        matches!(self, Self::Escalation(_))
    }

    /// Returns the delegated value, if any.
    pub fn delegated(self) -> Option<T> {
        match self {
            Self::Delegated(value) => Some(value),
            _ => None,
        }
    }
}

/// A claimed capability that is not backed by its proofs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityEscalation<T> {
    /// Human readable reason.
    pub escalation: String,
    /// The offending capability.
    pub capability: T,
}

impl<T> CapabilityEscalation<T> {
    /// Creates an escalation report.
    pub fn new(reason: impl Into<String>, capability: T) -> Self {
        Self {
            escalation: reason.into(),
            capability,
        }
    }

    /// Reason the capability was rejected.
    pub fn reason(&self) -> &str {
        &self.escalation
    }
}

impl<T> Display for CapabilityEscalation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.escalation)
    }
}

impl<T: Debug> std::error::Error for CapabilityEscalation<T> {}
