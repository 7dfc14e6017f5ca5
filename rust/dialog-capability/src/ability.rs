use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CapabilityError, SUPERUSER, eq_ignore_case};

/// Separator between the namespace and the segments of an encoded ability.
pub const ABILITY_SEPARATOR: char = '/';

/// The action a capability permits.
///
/// An ability is either the universal [`Ability::Superuser`] sentinel (encoded
/// as `*`) or a hierarchical name such as `msg/send` or `crud/update`, made of
/// a namespace and zero or more segments.
///
/// Equality ignores case in every part:
///
/// ```rust
/// use dialog_capability::Ability;
///
/// assert_eq!(Ability::new("MSG", ["Send"]), Ability::new("msg", ["send"]));
/// assert_ne!(Ability::new("msg", ["send"]), Ability::Superuser);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "AbilityShape", into = "AbilityShape")]
pub enum Ability {
    /// Every action over the resource.
    Superuser,
    /// A namespaced, hierarchical action name.
    Scoped {
        /// First component, e.g. `msg` in `msg/send`.
        namespace: String,
        /// Remaining components in order.
        segments: Vec<String>,
    },
}

impl Ability {
    /// Creates a scoped ability from a namespace and its segments.
    ///
    /// Parts are taken as given. Only abilities with a non-empty namespace
    /// other than `*` and no `/` inside any part survive
    /// [`encode`](Self::encode) followed by [`parse`](Self::parse) unchanged.
    pub fn new<S>(namespace: impl Into<String>, segments: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self::Scoped {
            namespace: namespace.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` for the [`Ability::Superuser`] sentinel.
    pub fn is_superuser(&self) -> bool {
        matches!(self, Self::Superuser)
    }

    /// Namespace of a scoped ability.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Superuser => None,
            Self::Scoped { namespace, .. } => Some(namespace),
        }
    }

    /// Segments of a scoped ability. Empty for the sentinel.
    pub fn segments(&self) -> &[String] {
        match self {
            Self::Superuser => &[],
            Self::Scoped { segments, .. } => segments,
        }
    }

    /// Encodes the ability as `namespace/seg1/seg2/...` or `*`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses an encoded ability.
    ///
    /// `*` yields the sentinel. Any other text is split on `/` into a
    /// namespace and its segments.
    pub fn parse(text: &str) -> Result<Self, CapabilityError> {
        text.parse()
    }
}

impl PartialEq for Ability {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Superuser, Self::Superuser) => true,
            (
                Self::Scoped {
                    namespace: left_namespace,
                    segments: left_segments,
                },
                Self::Scoped {
                    namespace: right_namespace,
                    segments: right_segments,
                },
            ) => {
                eq_ignore_case(left_namespace, right_namespace)
                    && left_segments.len() == right_segments.len()
                    && left_segments
                        .iter()
                        .zip(right_segments)
                        .all(|(left, right)| eq_ignore_case(left, right))
            }
            _ => false,
        }
    }
}

impl Eq for Ability {}

impl Hash for Ability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Superuser => 0u8.hash(state),
            Self::Scoped {
                namespace,
                segments,
            } => {
                1u8.hash(state);
                namespace.to_lowercase().hash(state);
                segments.len().hash(state);
                for segment in segments {
                    segment.to_lowercase().hash(state);
                }
            }
        }
    }
}

impl Display for Ability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superuser => f.write_str(SUPERUSER),
            Self::Scoped {
                namespace,
                segments,
            } => {
                f.write_str(namespace)?;
                for segment in segments {
                    write!(f, "{ABILITY_SEPARATOR}{segment}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Ability {
    type Err = CapabilityError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(CapabilityError::EmptyAbility);
        }
        if text == SUPERUSER {
            return Ok(Self::Superuser);
        }

        let mut parts = text.split(ABILITY_SEPARATOR);
        let namespace = parts.next().unwrap_or_default().to_string();
        Ok(Self::Scoped {
            namespace,
            segments: parts.map(str::to_string).collect(),
        })
    }
}

/// Structured (non-encoded) serde shape: `"*"` or `{namespace, segments}`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AbilityShape {
    Sentinel(String),
    Scoped {
        namespace: String,
        segments: Vec<String>,
    },
}

impl TryFrom<AbilityShape> for Ability {
    type Error = CapabilityError;

    fn try_from(shape: AbilityShape) -> Result<Self, Self::Error> {
        match shape {
            AbilityShape::Sentinel(sentinel) if sentinel == SUPERUSER => Ok(Self::Superuser),
            AbilityShape::Sentinel(other) => Err(CapabilityError::InvalidShape(format!(
                "expected '{SUPERUSER}' or a namespaced ability, found '{other}'"
            ))),
            AbilityShape::Scoped {
                namespace,
                segments,
            } => Ok(Self::Scoped {
                namespace,
                segments,
            }),
        }
    }
}

impl From<Ability> for AbilityShape {
    fn from(ability: Ability) -> Self {
        match ability {
            Ability::Superuser => Self::Sentinel(SUPERUSER.to_string()),
            Ability::Scoped {
                namespace,
                segments,
            } => Self::Scoped {
                namespace,
                segments,
            },
        }
    }
}
