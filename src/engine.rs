use serde::{Deserialize, Serialize};

/// Number of blocks sharing one derived dataset. Epoch number is
/// `block_height / EPOCH_LENGTH`.
pub const EPOCH_LENGTH: u64 = 720;

/// Epoch number for a block height.
pub fn epoch_from_height(height: u64) -> u64 {
    height / EPOCH_LENGTH
}

/// The two digests produced by one proof-of-work hash computation.
///
/// `final_hash` is what gets compared against a difficulty target;
/// `mix_hash` is the intermediate verification artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashParts {
    pub final_hash: [u8; 32],
    pub mix_hash: [u8; 32],
}

impl HashParts {
    /// Final hash as hex for logging or transport.
    pub fn final_hash_hex(&self) -> String {
        hex::encode(self.final_hash)
    }

    /// Mix hash as hex for logging or transport.
    pub fn mix_hash_hex(&self) -> String {
        hex::encode(self.mix_hash)
    }
}

/// Outcome of checking a solution against a difficulty target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerifyStatus {
    Valid,
    InvalidFinalHash,
    InvalidMixHash,
}

/// Boundary to the proof-of-work engine that owns dataset construction and
/// the hash mixing function.
///
/// An engine hands out one fully initialized [`HashEngine::Context`] per
/// epoch. The context is singly owned and releases its resources when
/// dropped; it is never cloned or shared between cache instances.
pub trait HashEngine: Send + Sync {
    /// Fully initialized per-epoch dataset. Dropping it releases the
    /// engine's resources for that epoch, exactly once.
    type Context: Send + Sync + 'static;

    /// Allocate and initialize the derived dataset for an epoch.
    /// `None` signals allocation failure.
    fn create_epoch_context(&self, epoch_number: i32) -> Option<Self::Context>;

    /// Compute the final and mix digests for a header hash and nonce.
    ///
    /// Pure given a valid context. Implementations must be safe for
    /// concurrent calls against the same context; the cache computes from
    /// many threads without serializing.
    fn compute_hash(&self, context: &Self::Context, header_hash: &[u8; 32], nonce: u64)
        -> HashParts;

    /// Check a solution against a big-endian 256-bit difficulty target.
    fn verify_against_difficulty(
        &self,
        context: &Self::Context,
        header_hash: &[u8; 32],
        mix_hash: &[u8; 32],
        nonce: u64,
        difficulty: &[u8; 32],
    ) -> VerifyStatus;

    /// Seed hash identifying an epoch's dataset.
    fn calculate_epoch_seed(&self, epoch_number: i32) -> [u8; 32];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_numbering_follows_epoch_length() {
        assert_eq!(epoch_from_height(0), 0);
        assert_eq!(epoch_from_height(EPOCH_LENGTH - 1), 0);
        assert_eq!(epoch_from_height(EPOCH_LENGTH), 1);
        assert_eq!(epoch_from_height(10 * EPOCH_LENGTH + 5), 10);
    }

    #[test]
    fn hash_parts_hex_helpers() {
        let parts = HashParts {
            final_hash: [0xab; 32],
            mix_hash: [0x01; 32],
        };
        assert_eq!(parts.final_hash_hex(), "ab".repeat(32));
        assert_eq!(parts.mix_hash_hex(), "01".repeat(32));
    }
}
