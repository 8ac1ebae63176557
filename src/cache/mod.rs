//! Cache module for storing the downloaded lootpool on disk
//!
//! The lootpool changes weekly, so a single snapshot is kept on disk and
//! reused by every run until the file is removed.

mod manager;

pub use manager::{CacheError, CacheStatus, LootCache};
