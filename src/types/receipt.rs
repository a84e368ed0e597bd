//! Execution receipt for a single engine command.
//!
//! The receipt summarizes what one command did to the book, including the
//! state root after it committed.

use sha2::{Digest, Sha256};

/// Execution receipt summarizing one committed command.
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash of the book's canonical
/// encoding after the command's dispatch step. Two engines fed the same
/// command stream produce identical roots.
///
/// ## Example
///
/// ```
/// use lob_engine::types::ExecutionReceipt;
///
/// let receipt = ExecutionReceipt::new(1, 2, 3, [0u8; 32]);
/// assert!(receipt.traded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionReceipt {
    /// Command sequence number (1-based, counts committed commands only)
    pub sequence: u64,

    /// Number of fills this command appended to the log
    pub fills_emitted: usize,

    /// Number of orders this command moved into the archive
    pub orders_archived: usize,

    /// State root after the command committed
    pub state_root: [u8; 32],
}

impl ExecutionReceipt {
    pub fn new(
        sequence: u64,
        fills_emitted: usize,
        orders_archived: usize,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            sequence,
            fills_emitted,
            orders_archived,
            state_root,
        }
    }

    /// Compute SHA-256 hash of the given data
    ///
    /// Returns a 32-byte array suitable for use as a state root.
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Whether the command produced at least one fill
    pub fn traded(&self) -> bool {
        self.fills_emitted > 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
