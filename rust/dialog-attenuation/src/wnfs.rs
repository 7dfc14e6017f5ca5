//! Reference semantics for WNFS file system capabilities.
//!
//! Capabilities use the `wnfs` scheme and an ability in the `wnfs`
//! namespace naming a [`WnfsLevel`]:
//!
//! ```text
//! wnfs:boris.fission.name/public/path/to/dir    wnfs/OVERWRITE
//! wnfs:boris.fission.name/private/fccXmZ8HYmpw  wnfs/REVISE
//! ```
//!
//! Public capabilities attenuate by path containment. Private capabilities
//! reach their target through a chain of encrypted pointers, so each hop
//! adds the parent's inode number to the set the capability requires.

mod level;
pub use level::*;

mod public;
pub use public::*;

mod private;
pub use private::*;

use crate::{Capabilities, Chained};

/// Resource scheme of WNFS capabilities.
pub const WNFS_SCHEME: &str = "wnfs";

/// Ability namespace of WNFS capabilities.
pub const WNFS_NAMESPACE: &str = "wnfs";

/// Reason reported when a child claims a higher level than its parent.
pub const LEVEL_ESCALATION: &str = "Capability level escalation";

/// Reason reported when a public path leaves its parent's subtree.
pub const PUBLIC_PATH_ESCALATION: &str = "WNFS Public path access escalation";

/// Walks `chain` with [`WnfsPublicSemantics`].
pub fn wnfs_public_capabilities<C: Chained>(
    chain: &C,
) -> Capabilities<'_, C, WnfsPublicSemantics> {
    crate::capabilities(chain, &WnfsPublicSemantics)
}

/// Walks `chain` with [`WnfsPrivateSemantics`].
pub fn wnfs_private_capabilities<C: Chained>(
    chain: &C,
) -> Capabilities<'_, C, WnfsPrivateSemantics> {
    crate::capabilities(chain, &WnfsPrivateSemantics)
}
