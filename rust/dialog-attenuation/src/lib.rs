#![warn(missing_docs)]

//! Attenuation and escalation detection over delegation chains.
//!
//! Every token in a delegation chain claims a list of raw [`Capability`]
//! values and cites the proofs it derives them from. Given such a chain and
//! a [`CapabilitySemantics`] for one resource domain, [`capabilities`] walks
//! from the leaf towards the roots of trust and reports, claim by claim,
//! whether the capability is backed by a valid delegation or how it was
//! escalated.
//!
//! ```text
//! root  (no proofs)     wnfs:alice/public/          wnfs/SUPER_USER   trusted as asserted
//!   └── mid             wnfs:alice/public/docs      wnfs/REVISE       delegated
//!         └── leaf      wnfs:alice/public/docs/a    wnfs/OVERWRITE    escalation
//! ```
//!
//! The engine never checks signatures, expiry, or revocation. Chains are
//! expected to be authenticated and cycle free before they get here.
//!
//! # Outcomes
//!
//! | Where | Outcome | Meaning |
//! |-------|---------|---------|
//! | [`CapabilitySemantics::parse`] | `None` | claim belongs to another domain, skipped |
//! | [`CapabilitySemantics::try_delegating`] | [`Delegation::Unrelated`] | keep searching other proofs |
//! | [`CapabilitySemantics::try_delegating`] | [`Delegation::Escalation`] | same target, child claims more |
//! | [`CapabilitySemantics::try_delegating`] | [`Delegation::Delegated`] | effective capability after the hop |
//! | [`capabilities`] item | `Ok(value)` | claim is backed by the chain |
//! | [`capabilities`] item | `Err(`[`CapabilityEscalation`]`)` | claim is not backed |
//!
//! [`Capability`]: dialog_capability::Capability

mod error;
pub use error::*;

mod semantics;
pub use semantics::*;

mod chain;
pub use chain::*;

mod attenuation;
pub use attenuation::*;

#[cfg(feature = "wnfs")]
pub mod wnfs;
