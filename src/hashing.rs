//! Streaming content digests used to detect duplicate images.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

const CHUNK_SIZE: usize = 8 * 1024;

/// Stream a file through SHA-256 and return the lowercase hex digest.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Digest a file, treating any I/O failure as "no hash available".
pub fn content_hash(path: &Path) -> Option<String> {
    match hash_file(path) {
        Ok(hash) => Some(hash),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "could not hash file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn identical_content_hashes_equal() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        fs::write(&a, b"pixels").unwrap();
        fs::write(&b, b"pixels").unwrap();
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn different_content_hashes_differ() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        fs::write(&a, b"pixels").unwrap();
        fs::write(&b, b"other pixels").unwrap();
        assert_ne!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn known_digest_for_empty_file() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty");
        fs::write(&empty, b"").unwrap();
        assert_eq!(
            hash_file(&empty).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn spans_multiple_chunks() {
        let dir = tempdir().unwrap();
        let big = dir.path().join("big.bin");
        let mut bytes = vec![7u8; CHUNK_SIZE * 3 + 11];
        fs::write(&big, &bytes).unwrap();
        let first = hash_file(&big).unwrap();
        bytes[CHUNK_SIZE * 2 + 5] = 8;
        fs::write(&big, &bytes).unwrap();
        assert_ne!(first, hash_file(&big).unwrap());
    }

    #[test]
    fn missing_file_yields_none() {
        let dir = tempdir().unwrap();
        assert_eq!(content_hash(&dir.path().join("absent.png")), None);
    }
}
