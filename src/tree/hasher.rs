//! Hash computation for snapshot nodes using BLAKE3
//!
//! File content hashes normally arrive precomputed from the snapshot
//! producer. Directory hashes are always derived here from the ordered
//! children so that equal directory hashes imply equal deep content.

use crate::types::{FileType, Hash};
use blake3::Hasher;

/// Hash recorded for a location that does not exist on disk
pub const MISSING_FILE_SIGNATURE: Hash = [0u8; 32];

/// Hash recorded for a directory entry inside a fingerprint
///
/// Directory identity is positional, so every directory entry shares the
/// same signature; only its normalized path distinguishes it.
pub const DIRECTORY_SIGNATURE: Hash = [0xd1; 32];

/// Compute content hash for file bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Compute the hash of a directory from its children
///
/// hash = H("directory" || children_count || (name_len || name || type || hash)*)
///
/// Children must be sorted by name. The physical location of the directory
/// does not take part, so two directories with identical contents at
/// different paths hash the same.
pub fn compute_directory_hash<'a, I>(children: I) -> Hash
where
    I: IntoIterator<Item = (&'a str, FileType, &'a Hash)>,
    I::IntoIter: ExactSizeIterator,
{
    let children = children.into_iter();
    let mut hasher = Hasher::new();

    // Hash type discriminator
    hasher.update(b"directory");

    // Hash children count (8 bytes, big-endian)
    hasher.update(&(children.len() as u64).to_be_bytes());

    for (name, file_type, hash) in children {
        let name_bytes = name.as_bytes();
        hasher.update(&(name_bytes.len() as u64).to_be_bytes());
        hasher.update(name_bytes);
        hasher.update(&[file_type.tag()]);
        hasher.update(hash);
    }

    *hasher.finalize().as_bytes()
}
