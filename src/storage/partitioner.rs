use super::types::PartitionKey;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const DEFAULT_NUM_PARTITIONS: u32 = 64;

/// Maps logical partition keys onto a fixed number of physical partitions.
#[derive(Debug, Clone)]
pub struct PartitionManager {
    pub num_partitions: u32,
}

impl PartitionManager {
    pub fn new(num_partitions: u32) -> Self {
        Self {
            num_partitions: num_partitions.max(1),
        }
    }

    pub fn get_partition(&self, key: &PartitionKey) -> u32 {
        let mut hasher = DefaultHasher::new();
        key.0.hash(&mut hasher);
        let hash = hasher.finish() as u32;
        hash % self.num_partitions
    }
}

impl Default for PartitionManager {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_PARTITIONS)
    }
}
