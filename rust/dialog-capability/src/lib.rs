#![warn(missing_docs)]

//! Capability data model for delegable authorization tokens.
//!
//! A [`Capability`] states that the holder may exercise an [`Ability`] over
//! the resource identified by a [`ResourcePointer`], optionally narrowed by an
//! opaque [`Nb`] payload that only domain specific semantics interpret.
//!
//! ```rust
//! use dialog_capability::{Ability, Capability, ResourcePointer};
//!
//! let capability = Capability::new(
//!     ResourcePointer::new("mailto", "alice@example.com"),
//!     Ability::new("MSG", ["Send"]),
//! );
//!
//! let encoded = capability.encode();
//! assert_eq!(encoded.with, "mailto:alice@example.com");
//! assert_eq!(encoded.can, "MSG/Send");
//!
//! // Abilities compare case-insensitively.
//! let parsed = Capability::parse(&encoded).unwrap();
//! assert_eq!(parsed.can, Ability::new("msg", ["send"]));
//! assert_eq!(parsed, capability);
//! ```
//!
//! # Equality
//!
//! | Part | Compared |
//! |------|----------|
//! | [`ResourcePointer::scheme`] | case-insensitively |
//! | [`ResourcePointer::hier_part`] | exactly |
//! | [`Ability`] namespace and segments | case-insensitively, in order |
//! | [`Nb`] | never (see [`Nb::is_equal`]) |

mod error;
pub use error::*;

mod ability;
pub use ability::*;

mod pointer;
pub use pointer::*;

mod nb;
pub use nb::*;

mod capability;
pub use capability::*;

mod shape;
pub use shape::*;

/// Encoded form of the universal sentinel shared by abilities
/// ([`Ability::Superuser`]) and resource pointers
/// ([`ResourcePointer::is_superuser`]).
pub const SUPERUSER: &str = "*";

pub(crate) fn eq_ignore_case(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}
