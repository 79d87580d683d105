//! Membership role definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::TenancyError;

/// Role a user holds within a workspace.
///
/// Roles form a two-level lattice: `Admin` satisfies every requirement,
/// `Member` satisfies only a `Member` requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular workspace member.
    Member,

    /// Workspace administrator; can manage members and billing.
    Admin,
}

impl Role {
    /// Returns true if this role meets the given minimum requirement.
    pub fn satisfies(&self, minimum: Role) -> bool {
        self.rank() >= minimum.rank()
    }

    /// Numeric rank used for comparison.
    fn rank(&self) -> u8 {
        match self {
            Role::Member => 0,
            Role::Admin => 1,
        }
    }

    /// Returns the wire representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = TenancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            other => Err(TenancyError::invalid_role(other)),
        }
    }
}
