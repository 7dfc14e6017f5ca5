use std::collections::BTreeSet;

use dialog_capability::{Capability, ResourcePointer};

use super::{LEVEL_ESCALATION, WNFS_SCHEME, WnfsLevel};
use crate::{CapabilitySemantics, Delegation, SemanticsError};

const PRIVATE: &str = "private";

/// Capability over a node of a user's private file system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WnfsPrivateCapability {
    /// File system owner.
    pub user: String,
    /// Inode numbers (base64url) that must all be authorized. Starts with one
    /// entry and gains the parent's entries at every delegation hop.
    pub required_inumbers: BTreeSet<String>,
    /// Granted level.
    pub cap: WnfsLevel,
}

/// Semantics of `wnfs:<user>/private/<inumber>` capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct WnfsPrivateSemantics;

impl CapabilitySemantics for WnfsPrivateSemantics {
    type Value = WnfsPrivateCapability;

    fn parse(&self, capability: &Capability) -> Option<WnfsPrivateCapability> {
        if !capability.with.scheme.eq_ignore_ascii_case(WNFS_SCHEME) {
            return None;
        }
        let cap = WnfsLevel::from_ability(&capability.can)?;

        let parts: Vec<&str> = capability.with.hier_part.split('/').collect();
        let [user, PRIVATE, inumber] = parts.as_slice() else {
            return None;
        };
        if user.is_empty() || inumber.is_empty() {
            return None;
        }

        Some(WnfsPrivateCapability {
            user: user.to_string(),
            required_inumbers: BTreeSet::from([inumber.to_string()]),
            cap,
        })
    }

    /// Only capabilities requiring exactly one inode number have an encoding.
    /// Several inode numbers only arise from merging across delegation hops.
    fn to_capability(&self, value: &WnfsPrivateCapability) -> Result<Capability, SemanticsError> {
        let mut inumbers = value.required_inumbers.iter();
        let (Some(inumber), None) = (inumbers.next(), inumbers.next()) else {
            return Err(SemanticsError::Unrepresentable(format!(
                "private capability of '{}' requires {} inode numbers, expected exactly one",
                value.user,
                value.required_inumbers.len()
            )));
        };

        Ok(Capability::new(
            ResourcePointer::new(WNFS_SCHEME, format!("{}/{PRIVATE}/{inumber}", value.user)),
            value.cap.to_ability(),
        ))
    }

    fn try_delegating(
        &self,
        parent: &WnfsPrivateCapability,
        child: &WnfsPrivateCapability,
    ) -> Delegation<WnfsPrivateCapability> {
        if child.user != parent.user {
            return Delegation::Unrelated;
        }

        // Same user but possibly a different subtree; reported rather than
        // treated as unrelated.
        if child.cap.escalates(parent.cap) {
            return Delegation::escalation(LEVEL_ESCALATION, child.clone());
        }

        Delegation::Delegated(WnfsPrivateCapability {
            user: child.user.clone(),
            required_inumbers: child
                .required_inumbers
                .union(&parent.required_inumbers)
                .cloned()
                .collect(),
            cap: child.cap,
        })
    }
}
