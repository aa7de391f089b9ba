use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha1::{Digest, Sha1};

use kv_types::Fingerprint;

use crate::error::{HashError, HashResult};

const READ_BUF_SIZE: usize = 8 * 1024;

/// Whole-file content hasher producing SHA-1 [`Fingerprint`]s.
///
/// Files are streamed through a fixed buffer, never loaded whole into
/// memory.
pub struct ContentHasher;

impl ContentHasher {
    /// Fingerprint an in-memory byte slice.
    pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Fingerprint::from_digest(hasher.finalize().into())
    }

    /// Fingerprint the full content of the file at `path`.
    ///
    /// Fails with [`HashError::Io`] when the file cannot be opened or read;
    /// no fingerprint exists for that call.
    pub fn fingerprint_file(path: &Path) -> HashResult<Fingerprint> {
        let mut file = File::open(path).map_err(|e| HashError::io(path, e))?;
        let mut hasher = Sha1::new();
        let mut buf = [0u8; READ_BUF_SIZE];
        loop {
            let n = file.read(&mut buf).map_err(|e| HashError::io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Fingerprint::from_digest(hasher.finalize().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn fingerprint_is_deterministic() {
        let a = ContentHasher::fingerprint_bytes(b"hello world");
        let b = ContentHasher::fingerprint_bytes(b"hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn known_sha1_vectors() {
        assert_eq!(
            ContentHasher::fingerprint_bytes(b"").to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            ContentHasher::fingerprint_bytes(b"hello").to_hex(),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
    }

    #[test]
    fn content_order_matters() {
        let ab = ContentHasher::fingerprint_bytes(b"ab");
        let ba = ContentHasher::fingerprint_bytes(b"ba");
        assert_ne!(ab, ba);
    }

    #[test]
    fn file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let content = vec![0x5au8; 3 * READ_BUF_SIZE + 17];
        fs::write(&path, &content).unwrap();

        let from_file = ContentHasher::fingerprint_file(&path).unwrap();
        assert_eq!(from_file, ContentHasher::fingerprint_bytes(&content));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ContentHasher::fingerprint_file(&dir.path().join("absent"));
        assert!(matches!(result, Err(HashError::Io { .. })));
    }
}
