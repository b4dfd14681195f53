use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One of the well-known root containers a location can start from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKey {
    /// Per-user scope (`HKEY_CURRENT_USER`).
    CurrentUser,
    /// Machine-wide scope (`HKEY_LOCAL_MACHINE`).
    LocalMachine,
}

/// Root names accepted in a location, matched case-insensitively.
pub const ROOT_TABLE: &[(&str, RootKey)] = &[
    ("hkcu", RootKey::CurrentUser),
    ("hkey_current_user", RootKey::CurrentUser),
    ("hklm", RootKey::LocalMachine),
    ("hkey_local_machine", RootKey::LocalMachine),
];

impl RootKey {
    /// All root keys, in table order.
    pub const ALL: [RootKey; 2] = [RootKey::CurrentUser, RootKey::LocalMachine];

    /// Resolve a root name through [`ROOT_TABLE`].
    pub fn from_name(name: &str) -> Result<Self, TypeError> {
        ROOT_TABLE
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, root)| *root)
            .ok_or_else(|| TypeError::UnknownRoot(name.to_string()))
    }

    /// Short lowercase name used in locations.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::CurrentUser => "hkcu",
            Self::LocalMachine => "hklm",
        }
    }

    /// Conventional full name of the root.
    pub fn full_name(&self) -> &'static str {
        match self {
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
        }
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}
