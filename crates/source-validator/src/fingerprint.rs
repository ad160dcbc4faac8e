use consensus_core::Source;
use sha2::{Digest, Sha256};

/// Hex-encoded digest identifying a piece of content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decides when two sources carry the same content for the noise gate.
pub trait ContentFingerprint: Send + Sync {
    fn fingerprint(&self, source: &Source) -> ContentHash;
}

/// Trim, lower-case and collapse internal whitespace
pub fn normalize_content(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// SHA-256 of the normalized title
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleFingerprint;

impl ContentFingerprint for TitleFingerprint {
    fn fingerprint(&self, source: &Source) -> ContentHash {
        let normalized = normalize_content(&source.title);
        ContentHash(hex::encode(Sha256::digest(normalized.as_bytes())))
    }
}
