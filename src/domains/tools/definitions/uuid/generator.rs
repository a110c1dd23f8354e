//! UUID generation.

use uuid::Uuid;

use super::history::{HistoryEntry, UuidVersion};

/// Generates v4 and v1 identifiers.
///
/// v1 identifiers carry a random node id fixed for the generator's lifetime,
/// with the multicast bit set so it can never collide with a real MAC.
#[derive(Debug, Clone, Copy)]
pub struct UuidGenerator {
    node_id: [u8; 6],
}

impl UuidGenerator {
    pub fn new() -> Self {
        let mut node_id: [u8; 6] = rand::random();
        node_id[0] |= 0x01;
        Self { node_id }
    }

    pub fn node_id(&self) -> [u8; 6] {
        self.node_id
    }

    pub fn generate(&self, version: UuidVersion) -> Uuid {
        match version {
            UuidVersion::V4 => Uuid::new_v4(),
            UuidVersion::V1 => Uuid::now_v1(&self.node_id),
        }
    }

    /// Generate `quantity` history entries in generation order.
    pub fn batch(&self, version: UuidVersion, quantity: usize) -> Vec<HistoryEntry> {
        (0..quantity)
            .map(|_| HistoryEntry::new(self.generate(version), version))
            .collect()
    }
}

impl Default for UuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}
