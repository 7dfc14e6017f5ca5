use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CapabilityError, SUPERUSER, eq_ignore_case};

/// Separator between the scheme and the hierarchical part of a pointer.
pub const POINTER_SEPARATOR: char = ':';

/// Identifies the resource a capability applies to, as `scheme:hierPart`.
///
/// The scheme is compared case-insensitively; the hierarchical part is
/// compared exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePointer {
    /// Scheme, e.g. `wnfs` or `mailto`.
    pub scheme: String,
    /// Everything after the first `:`.
    pub hier_part: String,
}

/// Selects which proofs a `prf:` pointer redelegates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofSelector {
    /// Every proof of the token (`prf:*`).
    All,
    /// The proof at the given position (`prf:<index>`).
    Index(usize),
}

impl Display for ProofSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(SUPERUSER),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl ResourcePointer {
    /// Creates a pointer from its two parts.
    pub fn new(scheme: impl Into<String>, hier_part: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            hier_part: hier_part.into(),
        }
    }

    /// Pointer to the issuer's own resources: `my:<resource>`.
    pub fn my(resource: impl Into<String>) -> Self {
        Self::new("my", resource)
    }

    /// Pointer to resources owned by `did`: `as:<did>:<resource>`.
    pub fn acting_as(did: &str, resource: &str) -> Self {
        Self::new("as", format!("{did}{POINTER_SEPARATOR}{resource}"))
    }

    /// Pointer that redelegates the selected proofs: `prf:<selector>`.
    pub fn proof(selector: ProofSelector) -> Self {
        Self::new("prf", selector.to_string())
    }

    /// Returns `true` when the hierarchical part is the `*` sentinel.
    pub fn is_superuser(&self) -> bool {
        self.hier_part == SUPERUSER
    }

    /// Encodes the pointer as `scheme:hierPart`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses `scheme:hierPart`, splitting on the first `:`.
    pub fn parse(text: &str) -> Result<Self, CapabilityError> {
        text.parse()
    }
}

impl PartialEq for ResourcePointer {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(&self.scheme, &other.scheme) && self.hier_part == other.hier_part
    }
}

impl Eq for ResourcePointer {}

impl Hash for ResourcePointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.to_lowercase().hash(state);
        self.hier_part.hash(state);
    }
}

impl Display for ResourcePointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{POINTER_SEPARATOR}{}", self.scheme, self.hier_part)
    }
}

impl FromStr for ResourcePointer {
    type Err = CapabilityError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (scheme, hier_part) = text
            .split_once(POINTER_SEPARATOR)
            .ok_or_else(|| CapabilityError::MissingScheme(text.to_string()))?;
        Ok(Self::new(scheme, hier_part))
    }
}
