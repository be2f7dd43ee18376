//! ProfileType - the kind of a stored profile sample.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of profile (cpu, heap, ...), stored as an 8-bit discriminant.
///
/// The set is open: storage backends may hold discriminants newer than
/// the ones named here, and those render as their decimal value.
/// [`ProfileType::UNKNOWN`] is only ever a decode-failure marker and is
/// rejected by every request that stores or queries profiles.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct ProfileType(i8);

impl ProfileType {
    pub const UNKNOWN: ProfileType = ProfileType(0);
    pub const CPU: ProfileType = ProfileType(1);
    pub const HEAP: ProfileType = ProfileType(2);
    pub const BLOCK: ProfileType = ProfileType(3);
    pub const MUTEX: ProfileType = ProfileType(4);
    pub const GOROUTINE: ProfileType = ProfileType(5);
    pub const OTHER: ProfileType = ProfileType(127);

    const CANONICAL: [(ProfileType, &'static str); 6] = [
        (ProfileType::CPU, "cpu"),
        (ProfileType::HEAP, "heap"),
        (ProfileType::BLOCK, "block"),
        (ProfileType::MUTEX, "mutex"),
        (ProfileType::GOROUTINE, "goroutine"),
        (ProfileType::OTHER, "other"),
    ];

    /// Decodes a profile type from its textual form.
    ///
    /// Surrounding whitespace is ignored. Anything outside the canonical
    /// table, including the empty string, yields [`ProfileType::UNKNOWN`].
    pub fn parse(s: &str) -> ProfileType {
        let s = s.trim();
        Self::CANONICAL
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(ptype, _)| *ptype)
            .unwrap_or(ProfileType::UNKNOWN)
    }

    /// Wraps a raw discriminant as read back from a storage backend.
    pub const fn from_raw(raw: i8) -> ProfileType {
        ProfileType(raw)
    }

    /// Returns the raw discriminant.
    pub const fn as_raw(&self) -> i8 {
        self.0
    }

    pub fn is_unknown(&self) -> bool {
        *self == ProfileType::UNKNOWN
    }

    /// Returns the canonical name, if this discriminant has one.
    pub fn canonical_name(&self) -> Option<&'static str> {
        if self.is_unknown() {
            return Some("unknown");
        }
        Self::CANONICAL
            .iter()
            .find(|(ptype, _)| ptype == self)
            .map(|(_, name)| *name)
    }

    /// Returns all named, storable profile types.
    pub fn all() -> impl Iterator<Item = ProfileType> {
        Self::CANONICAL.iter().map(|(ptype, _)| *ptype)
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<&str> for ProfileType {
    fn from(s: &str) -> Self {
        ProfileType::parse(s)
    }
}

impl From<String> for ProfileType {
    fn from(s: String) -> Self {
        ProfileType::parse(&s)
    }
}

impl From<ProfileType> for String {
    fn from(ptype: ProfileType) -> Self {
        ptype.to_string()
    }
}
