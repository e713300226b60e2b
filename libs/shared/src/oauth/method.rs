//! Sign-in methods and the GitHub permission scopes they request

use std::fmt;
use std::str::FromStr;

/// Which GitHub access level the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginMethod {
    /// Public repositories only
    PublicAccess,
    /// Public and private repositories
    PrivateAccess,
}

const PUBLIC_SCOPES: &[&str] = &["user", "public_repo", "notifications", "read:org"];
const PRIVATE_SCOPES: &[&str] = &["user", "repo", "notifications", "read:org"];

impl LoginMethod {
    /// All methods in the order they are offered to the user
    pub const ALL: [LoginMethod; 2] = [LoginMethod::PublicAccess, LoginMethod::PrivateAccess];

    /// Stable identifier (`github.public` / `github.private`)
    pub fn id(&self) -> &'static str {
        match self {
            Self::PublicAccess => "github.public",
            Self::PrivateAccess => "github.private",
        }
    }

    /// Ordered scope set requested from GitHub
    pub fn permission_scopes(&self) -> &'static [&'static str] {
        match self {
            Self::PublicAccess => PUBLIC_SCOPES,
            Self::PrivateAccess => PRIVATE_SCOPES,
        }
    }
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LoginMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github.public" | "public" => Ok(Self::PublicAccess),
            "github.private" | "private" => Ok(Self::PrivateAccess),
            other => Err(format!(
                "Unknown login method '{}'. Expected 'public' or 'private'",
                other
            )),
        }
    }
}
