//! SHA-256 integrity checks for local artefact files.
//!
//! The digest comparison is the only test for "this file already is the
//! resolved artefact"; presence on disk never suffices.

use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// A hex-encoded SHA-256 digest computed from local content.
///
/// Always 64 lowercase hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Digest an in-memory byte slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use paper_fetch::integrity::Sha256Digest;
    ///
    /// let digest = Sha256Digest::of_bytes(b"");
    /// assert_eq!(
    ///     digest.as_str(),
    ///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    /// );
    /// ```
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Compare against an expected hex digest, exactly and case-sensitively.
    #[must_use]
    pub fn matches(&self, expected_hex: &str) -> bool {
        self.0 == expected_hex
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the SHA-256 digest of the whole file at `path`.
///
/// The file is streamed in fixed-size chunks rather than loaded at once.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read.
pub fn compute_sha256(path: &Path) -> io::Result<Sha256Digest> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(Sha256Digest(format!("{:x}", hasher.finalize())))
}

/// Return true when the file at `path` hashes to `expected_hex`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read.
pub fn digest_matches(path: &Path, expected_hex: &str) -> io::Result<bool> {
    Ok(compute_sha256(path)?.matches(expected_hex))
}
