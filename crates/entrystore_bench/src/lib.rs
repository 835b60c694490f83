//! Benchmark utilities.

use entrystore_testkit::TestEntry;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random name of the specified length.
pub fn random_name(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` entries with ids `0..count` and random names.
pub fn generate_entries(count: u32, name_len: usize) -> Vec<TestEntry> {
    (0..count)
        .map(|id| TestEntry::new(id, random_name(name_len)))
        .collect()
}

/// Pick a random id in `0..count`.
pub fn random_id(count: u32) -> u32 {
    rand::thread_rng().gen_range(0..count)
}
