//! Token - opaque service identifier.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fmt::Write as _;

/// Number of hex characters kept from the digest.
const TOKEN_LEN: usize = 20;

/// Opaque identifier for a (service name, build id) pair.
///
/// Issued when a service registers and echoed back by clients on every
/// profile they submit. Only equality and the string form are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Derives the token for a service registration.
    ///
    /// The same name and build id always produce the same token.
    pub fn derive(name: &str, build_id: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(build_id.as_bytes());
        let digest = hasher.finalize();

        let mut hex = String::with_capacity(TOKEN_LEN);
        for byte in digest.iter().take(TOKEN_LEN / 2) {
            let _ = write!(hex, "{:02x}", byte);
        }
        Self(hex)
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
