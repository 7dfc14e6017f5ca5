use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use dialog_capability::Ability;

use super::WNFS_NAMESPACE;

/// Access level of a WNFS capability, totally ordered from most
/// ([`SuperUser`](Self::SuperUser)) to least ([`Create`](Self::Create))
/// powerful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WnfsLevel {
    /// `SUPER_USER`, rank 0.
    SuperUser,
    /// `OVERWRITE`, rank -1.
    Overwrite,
    /// `SOFT_DELETE`, rank -2.
    SoftDelete,
    /// `REVISE`, rank -3.
    Revise,
    /// `CREATE`, rank -4.
    Create,
}

impl WnfsLevel {
    /// Every level, most powerful first.
    pub const ALL: [WnfsLevel; 5] = [
        Self::SuperUser,
        Self::Overwrite,
        Self::SoftDelete,
        Self::Revise,
        Self::Create,
    ];

    /// Numeric rank; higher is more powerful.
    pub const fn rank(self) -> i8 {
        match self {
            Self::SuperUser => 0,
            Self::Overwrite => -1,
            Self::SoftDelete => -2,
            Self::Revise => -3,
            Self::Create => -4,
        }
    }

    /// Wire name, e.g. `SOFT_DELETE`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SuperUser => "SUPER_USER",
            Self::Overwrite => "OVERWRITE",
            Self::SoftDelete => "SOFT_DELETE",
            Self::Revise => "REVISE",
            Self::Create => "CREATE",
        }
    }

    /// Looks a level up by wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }

    /// Reads the level from `wnfs/<LEVEL>`. The superuser sentinel maps
    /// to [`WnfsLevel::SuperUser`].
    pub fn from_ability(ability: &Ability) -> Option<Self> {
        match ability {
            Ability::Superuser => Some(Self::SuperUser),
            Ability::Scoped {
                namespace,
                segments,
            } if namespace.eq_ignore_ascii_case(WNFS_NAMESPACE) => match segments.as_slice() {
                [name] => Self::from_name(name),
                _ => None,
            },
            Ability::Scoped { .. } => None,
        }
    }

    /// `wnfs/<LEVEL>`.
    pub fn to_ability(self) -> Ability {
        Ability::new(WNFS_NAMESPACE, [self.name()])
    }

    /// Returns `true` when claiming `self` under `parent` would escalate.
    pub fn escalates(self, parent: Self) -> bool {
        self > parent
    }
}

impl PartialOrd for WnfsLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WnfsLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl Display for WnfsLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
