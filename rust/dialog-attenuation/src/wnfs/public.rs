use dialog_capability::{Capability, ResourcePointer};

use super::{LEVEL_ESCALATION, PUBLIC_PATH_ESCALATION, WNFS_SCHEME, WnfsLevel};
use crate::{CapabilitySemantics, Delegation, SemanticsError};

const PUBLIC: &str = "public";

/// Capability over a path in a user's public file system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WnfsPublicCapability {
    /// File system owner, e.g. `boris.fission.name`.
    pub user: String,
    /// Path below the public root.
    pub public_path: Vec<String>,
    /// Granted level.
    pub cap: WnfsLevel,
}

/// Semantics of `wnfs:<user>/public/<path...>` capabilities.
///
/// A child is derivable when it addresses the same user, does not raise the
/// level, and its path lies at or below the parent's path.
#[derive(Debug, Clone, Copy, Default)]
pub struct WnfsPublicSemantics;

impl CapabilitySemantics for WnfsPublicSemantics {
    type Value = WnfsPublicCapability;

    fn parse(&self, capability: &Capability) -> Option<WnfsPublicCapability> {
        if !capability.with.scheme.eq_ignore_ascii_case(WNFS_SCHEME) {
            return None;
        }
        let cap = WnfsLevel::from_ability(&capability.can)?;

        let hier_part = &capability.with.hier_part;
        let trimmed = hier_part.strip_suffix('/').unwrap_or(hier_part);
        let mut parts = trimmed.split('/');

        let user = parts.next().filter(|user| !user.is_empty())?;
        if parts.next() != Some(PUBLIC) {
            return None;
        }

        Some(WnfsPublicCapability {
            user: user.to_string(),
            public_path: parts.map(str::to_string).collect(),
            cap,
        })
    }

    fn to_capability(&self, value: &WnfsPublicCapability) -> Result<Capability, SemanticsError> {
        Ok(Capability::new(
            ResourcePointer::new(
                WNFS_SCHEME,
                format!("{}/{PUBLIC}/{}", value.user, value.public_path.join("/")),
            ),
            value.cap.to_ability(),
        ))
    }

    fn try_delegating(
        &self,
        parent: &WnfsPublicCapability,
        child: &WnfsPublicCapability,
    ) -> Delegation<WnfsPublicCapability> {
        if child.user != parent.user {
            return Delegation::Unrelated;
        }

        if child.cap.escalates(parent.cap) {
            return Delegation::escalation(LEVEL_ESCALATION, child.clone());
        }

        if !child.public_path.starts_with(&parent.public_path) {
            return Delegation::escalation(PUBLIC_PATH_ESCALATION, child.clone());
        }

        Delegation::Delegated(child.clone())
    }

    /// Length of the path prefix both capabilities share.
    fn specificity(&self, parent: &WnfsPublicCapability, child: &WnfsPublicCapability) -> usize {
        parent
            .public_path
            .iter()
            .zip(&child.public_path)
            .take_while(|(left, right)| left == right)
            .count()
    }
}
