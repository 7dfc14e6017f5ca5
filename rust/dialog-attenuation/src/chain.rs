use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;
use std::sync::Arc;

use dialog_capability::Capability;

/// A token in an already verified delegation chain.
///
/// Each token claims an ordered list of capabilities and cites an ordered
/// list of proofs, each of which is again a token. A token without proofs is
/// a root of trust. The structure must be finite and acyclic; proofs may be
/// shared between tokens.
pub trait Chained {
    /// Stable identity of a token within one chain. Tokens with the same
    /// identity must claim the same capabilities from the same proofs.
    type Id: Clone + Eq + Hash + Debug;

    /// Identity used to memoize proofs shared across the chain.
    fn id(&self) -> Self::Id;

    /// Claimed capabilities, in declaration order.
    fn capabilities(&self) -> &[Capability];

    /// Cited proofs, in declaration order.
    fn proofs(&self) -> impl Iterator<Item = &Self>;

    /// Returns `true` when the token cites no proofs.
    fn is_root(&self) -> bool {
        self.proofs().next().is_none()
    }
}

/// Content derived identity of a [`Chain`] node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId([u8; blake3::OUT_LEN]);

impl ChainId {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; blake3::OUT_LEN] {
        &self.0
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Debug for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ChainId({self})")
    }
}

/// In-memory delegation chain node.
///
/// Proofs are held behind [`Arc`] so one proof can back several tokens.
/// The identity is a BLAKE3 digest over the encoded claims and the proofs'
/// identities, so structurally identical nodes share an identity.
///
/// ```rust
/// use std::sync::Arc;
/// use dialog_attenuation::{Chain, Chained};
/// use dialog_capability::Capability;
///
/// let root = Arc::new(Chain::root(vec![Capability::my("*")]));
/// let leaf = Chain::new(vec![Capability::my("*")], vec![root.clone()]);
///
/// assert!(root.is_root());
/// assert!(!leaf.is_root());
/// assert_ne!(root.id(), leaf.id());
/// ```
#[derive(Debug, Clone)]
pub struct Chain {
    id: ChainId,
    capabilities: Vec<Capability>,
    proofs: Vec<Arc<Chain>>,
}

impl Chain {
    /// Creates a token that derives `capabilities` from `proofs`.
    pub fn new(capabilities: Vec<Capability>, proofs: Vec<Arc<Chain>>) -> Self {
        let id = digest(&capabilities, &proofs);
        Self {
            id,
            capabilities,
            proofs,
        }
    }

    /// Creates a root of trust.
    pub fn root(capabilities: Vec<Capability>) -> Self {
        Self::new(capabilities, Vec::new())
    }

    /// Proofs cited by this token.
    pub fn proof_links(&self) -> &[Arc<Chain>] {
        &self.proofs
    }
}

impl Chained for Chain {
    type Id = ChainId;

    fn id(&self) -> ChainId {
        self.id
    }

    fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    fn proofs(&self) -> impl Iterator<Item = &Self> {
        self.proofs.iter().map(Arc::as_ref)
    }
}

fn digest(capabilities: &[Capability], proofs: &[Arc<Chain>]) -> ChainId {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&(capabilities.len() as u64).to_le_bytes());
    for capability in capabilities {
        let encoded = capability.encode();
        for part in [Some(&encoded.with), Some(&encoded.can), encoded.nb.as_ref()] {
            match part {
                Some(text) => {
                    hasher.update(&[1]);
                    hasher.update(&(text.len() as u64).to_le_bytes());
                    hasher.update(text.as_bytes());
                }
                None => {
                    hasher.update(&[0]);
                }
            }
        }
    }

    hasher.update(&(proofs.len() as u64).to_le_bytes());
    for proof in proofs {
        hasher.update(proof.id.as_bytes());
    }

    ChainId(*hasher.finalize().as_bytes())
}
