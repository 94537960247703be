use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tagpull_types::Sample;

/// Sort samples ascending by timestamp, keeping the relative order of
/// samples that share a timestamp.
pub fn sort_samples(samples: &mut [Sample]) {
    samples.sort_by_key(|s| s.ts);
}

/// Drop every sample whose timestamp was already seen, keeping the first.
///
/// Order of the survivors is unchanged.
#[must_use]
pub fn dedup_first(samples: Vec<Sample>) -> Vec<Sample> {
    let mut seen: HashSet<DateTime<Utc>> = HashSet::with_capacity(samples.len());
    samples.into_iter().filter(|s| seen.insert(s.ts)).collect()
}
