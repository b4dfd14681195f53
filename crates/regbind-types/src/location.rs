//! Parsing of `//root/segment/segment/...` addresses.
//!
//! The root name is kept as written (lowercased) so an unknown root can be
//! reported by [`Location::root_key`] rather than by the parser. Segments are
//! joined with [`PATH_SEPARATOR`] to form the root-relative path the store
//! understands.

use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;
use crate::root::RootKey;

/// The store's native path separator.
pub const PATH_SEPARATOR: char = '\\';

/// A parsed store address: a root name plus a root-relative path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    root: String,
    path: String,
}

impl Location {
    /// Parse an address of the form `//<root>/<segment>/...`.
    ///
    /// A single trailing `/` is ignored and `//<root>` alone addresses the
    /// root container itself.
    pub fn parse(address: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        };

        let rest = address
            .strip_prefix("//")
            .ok_or_else(|| invalid("must start with '//'"))?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let (root, path) = match rest.split_once('/') {
            Some((root, path)) => (root, path),
            None => (rest, ""),
        };
        if root.is_empty() {
            return Err(invalid("root name must not be empty"));
        }

        let mut segments = Vec::new();
        if !path.is_empty() {
            for segment in path.split('/') {
                if segment.is_empty() {
                    return Err(invalid("path segments must not be empty"));
                }
                if segment.contains(PATH_SEPARATOR) {
                    return Err(invalid("path segments must not contain '\\'"));
                }
                segments.push(segment);
            }
        }

        Ok(Self {
            root: root.to_ascii_lowercase(),
            path: segments.join(&PATH_SEPARATOR.to_string()),
        })
    }

    /// Build a location directly from a known root and a native path.
    pub fn new(root: RootKey, path: impl Into<String>) -> Self {
        Self {
            root: root.short_name().to_string(),
            path: path.into(),
        }
    }

    /// The root name as written in the address, lowercased.
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// Resolve the root name through the fixed root table.
    pub fn root_key(&self) -> Result<RootKey, TypeError> {
        RootKey::from_name(&self.root)
    }

    /// Root-relative path joined with [`PATH_SEPARATOR`].
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for Location {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//{}", self.root)?;
        for segment in self.path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_basic_address() {
        let loc = Location::parse("//hklm/Software/HowettNET/Test").unwrap();
        assert_eq!(loc.root_name(), "hklm");
        assert_eq!(loc.path(), "Software\\HowettNET\\Test");
        assert_eq!(loc.root_key().unwrap(), RootKey::LocalMachine);
    }

    #[test]
    fn root_is_lowercased() {
        let loc = Location::parse("//HKCU/Software").unwrap();
        assert_eq!(loc.root_name(), "hkcu");
        assert_eq!(loc.root_key().unwrap(), RootKey::CurrentUser);
    }

    #[test]
    fn root_only_address() {
        let loc = Location::parse("//hkcu").unwrap();
        assert_eq!(loc.path(), "");
        let loc = Location::parse("//hkcu/").unwrap();
        assert_eq!(loc.path(), "");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let loc = Location::parse("//hklm/Software/").unwrap();
        assert_eq!(loc.path(), "Software");
    }

    #[test]
    fn unknown_root_parses_but_does_not_resolve() {
        let loc = Location::parse("//bogus/Some/Path").unwrap();
        assert_eq!(
            loc.root_key(),
            Err(TypeError::UnknownRoot("bogus".into()))
        );
    }

    #[test]
    fn reject_missing_prefix() {
        assert!(matches!(
            Location::parse("hklm/Software"),
            Err(TypeError::InvalidAddress { .. })
        ));
        assert!(Location::parse("/hklm/Software").is_err());
    }

    #[test]
    fn reject_empty_root() {
        assert!(Location::parse("//").is_err());
        assert!(Location::parse("///Software").is_err());
    }

    #[test]
    fn reject_empty_segments() {
        assert!(Location::parse("//hklm/a//b").is_err());
    }

    #[test]
    fn reject_native_separator_in_segment() {
        assert!(Location::parse("//hklm/a\\b").is_err());
    }

    #[test]
    fn display_reconstructs_address() {
        let loc = Location::parse("//HKLM/Software/Vendor").unwrap();
        assert_eq!(loc.to_string(), "//hklm/Software/Vendor");
        assert_eq!(Location::parse("//hkcu").unwrap().to_string(), "//hkcu");
    }

    #[test]
    fn new_from_root_key() {
        let loc = Location::new(RootKey::CurrentUser, "Software\\Vendor");
        assert_eq!(loc.root_key().unwrap(), RootKey::CurrentUser);
        assert_eq!(loc.to_string(), "//hkcu/Software/Vendor");
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let loc: Location = "//hklm/A".parse().unwrap();
        assert_eq!(loc.path(), "A");
    }

    proptest! {
        #[test]
        fn segments_join_with_native_separator(
            segments in proptest::collection::vec("[A-Za-z0-9 _.-]{1,12}", 1..6)
        ) {
            let address = format!("//hklm/{}", segments.join("/"));
            let loc = Location::parse(&address).unwrap();
            prop_assert_eq!(loc.path(), segments.join("\\"));
            prop_assert_eq!(loc.to_string(), address);
        }
    }
}
