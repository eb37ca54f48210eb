use crate::Result;
use rand::{CryptoRng, RngCore};

/// Trait for keyed commitment schemes
///
/// A scheme binds a message to a secret key. The digest is published first and
/// the key is revealed later so the counterparty can recompute the digest.
pub trait CommitmentScheme {
    type Key;
    type Digest;

    /// Draw a fresh key of `len` bytes from a cryptographically secure source
    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<Self::Key>;

    fn commit(key: &Self::Key, message: &[u8]) -> Result<Self::Digest>;

    fn verify(key: &Self::Key, message: &[u8], digest: &Self::Digest) -> bool;
}
