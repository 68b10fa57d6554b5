//! Document revisions
//!
//! A revision is `<generation>-<digest>`, where the generation counts writes
//! to the document and the digest is a truncated BLAKE3 hash of the stored
//! body.

use flashback_domain::{FlashbackError, Result};

const DIGEST_HEX_LEN: usize = 32;

/// Revision to assign when writing `body` over a document at `previous`.
pub fn next_revision(previous: Option<&str>, body: &str) -> Result<String> {
    let generation = previous.map(generation).transpose()?.unwrap_or(0) + 1;
    let digest = hex::encode(blake3::hash(body.as_bytes()).as_bytes());
    Ok(format!("{generation}-{}", &digest[..DIGEST_HEX_LEN]))
}

/// Write count encoded in a revision.
pub fn generation(rev: &str) -> Result<u64> {
    rev.split_once('-')
        .and_then(|(generation, digest)| {
            if digest.is_empty() {
                None
            } else {
                generation.parse().ok()
            }
        })
        .ok_or_else(|| FlashbackError::DecodeFailure(format!("malformed revision '{rev}'")))
}
