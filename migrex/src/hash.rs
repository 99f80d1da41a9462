use std::path::Path;

use md5::{Digest, Md5};

/// Hex encoded MD5 digest of `bytes`.
///
/// Used to detect edits to already applied files, not as a security primitive.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub async fn hash_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;

    Ok(hash_bytes(&bytes))
}
